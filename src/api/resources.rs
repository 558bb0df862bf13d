use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::entities::{location, meetup, movie, restaurant, trail, weather};
use crate::models::LocationPoint;

use super::{ApiError, AppState};

/// Every resource endpoint takes one `data` parameter: the raw search text
/// for `/location`, the JSON-encoded location object for everything else.
#[derive(Debug, Deserialize)]
pub struct DataParam {
    data: Option<String>,
}

fn search_text(param: &DataParam) -> Result<&str, ApiError> {
    match param.data.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ApiError::validation("the data parameter is required")),
    }
}

fn location_point(param: &DataParam) -> Result<LocationPoint, ApiError> {
    let raw = search_text(param)?;
    serde_json::from_str(raw).map_err(|_| {
        ApiError::validation(
            "the data parameter must be a location object with search_query, latitude and longitude",
        )
    })
}

pub async fn location(
    State(state): State<AppState>,
    Query(param): Query<DataParam>,
) -> Result<Json<Option<location::Model>>, ApiError> {
    let text = search_text(&param)?.to_string();

    let outcome = state.cache.fetch_through(&state.locations, &text).await?;

    Ok(Json(outcome.into_records().into_iter().next()))
}

pub async fn weather(
    State(state): State<AppState>,
    Query(param): Query<DataParam>,
) -> Result<Json<Vec<weather::Model>>, ApiError> {
    let point = location_point(&param)?;

    let outcome = state.cache.fetch_through(&state.weather, &point).await?;

    Ok(Json(outcome.into_records()))
}

pub async fn yelp(
    State(state): State<AppState>,
    Query(param): Query<DataParam>,
) -> Result<Json<Vec<restaurant::Model>>, ApiError> {
    let point = location_point(&param)?;

    let outcome = state
        .cache
        .fetch_through(&state.restaurants, &point)
        .await?;

    Ok(Json(outcome.into_records()))
}

pub async fn movies(
    State(state): State<AppState>,
    Query(param): Query<DataParam>,
) -> Result<Json<Vec<movie::Model>>, ApiError> {
    let point = location_point(&param)?;

    let outcome = state.cache.fetch_through(&state.movies, &point).await?;

    Ok(Json(outcome.into_records()))
}

pub async fn meetups(
    State(state): State<AppState>,
    Query(param): Query<DataParam>,
) -> Result<Json<Vec<meetup::Model>>, ApiError> {
    let point = location_point(&param)?;

    let outcome = state.cache.fetch_through(&state.meetups, &point).await?;

    Ok(Json(outcome.into_records()))
}

pub async fn trails(
    State(state): State<AppState>,
    Query(param): Query<DataParam>,
) -> Result<Json<Vec<trail::Model>>, ApiError> {
    let point = location_point(&param)?;

    let outcome = state.cache.fetch_through(&state.trails, &point).await?;

    Ok(Json(outcome.into_records()))
}
