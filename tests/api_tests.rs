use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cityscout::config::Config;
use cityscout::entities::{location, weather};
use cityscout::state::SharedState;

async fn spawn_app() -> (Router, Arc<SharedState>) {
    let mut config = Config::default();
    config.general.database_url = "sqlite::memory:".to_string();

    let state = Arc::new(
        SharedState::new(config)
            .await
            .expect("Failed to create app state"),
    );
    (cityscout::api::router(state.clone()), state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn seattle_data_param() -> String {
    let point = serde_json::json!({
        "search_query": "seattle, wa",
        "formatted_query": "Seattle, WA, USA",
        "latitude": 47.6,
        "longitude": -122.3
    });
    urlencoding::encode(&point.to_string()).into_owned()
}

#[tokio::test]
async fn status_reports_a_reachable_database() {
    let (app, _state) = spawn_app().await;

    let (status, body) = get(&app, "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn a_missing_data_parameter_is_rejected() {
    let (app, _state) = spawn_app().await;

    for uri in ["/location", "/weather", "/trails", "/location?data=%20"] {
        let (status, _body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "expected 400 for {uri}");
    }
}

#[tokio::test]
async fn a_malformed_location_object_is_rejected() {
    let (app, _state) = spawn_app().await;

    let (status, body) = get(&app, "/weather?data=not-json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("location object"));
}

#[tokio::test]
async fn a_cached_location_is_served_as_a_single_object() {
    let (app, state) = spawn_app().await;

    state
        .store
        .insert_record::<location::Entity>(location::Model {
            id: 0,
            search_query: "seattle, wa".to_string(),
            formatted_query: Some("Seattle, WA, USA".to_string()),
            latitude: 47.6,
            longitude: -122.3,
            created_at: Utc::now().timestamp_millis(),
        })
        .await
        .unwrap();

    let (status, body) = get(&app, "/location?data=seattle,%20wa").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["search_query"], "seattle, wa");
    assert_eq!(body["formatted_query"], "Seattle, WA, USA");
    assert!((body["latitude"].as_f64().unwrap() - 47.6).abs() < 1e-9);
    // Row ids are storage detail, not payload.
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn locations_never_expire() {
    let (app, state) = spawn_app().await;

    state
        .store
        .insert_record::<location::Entity>(location::Model {
            id: 0,
            search_query: "seattle, wa".to_string(),
            formatted_query: Some("Seattle, WA, USA".to_string()),
            latitude: 47.6,
            longitude: -122.3,
            // Stamped at the epoch; a non-expiring resource must still hit.
            created_at: 0,
        })
        .await
        .unwrap();

    let (status, body) = get(&app, "/location?data=seattle,%20wa").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["formatted_query"], "Seattle, WA, USA");
}

#[tokio::test]
async fn fresh_weather_rows_are_served_as_an_array() {
    let (app, state) = spawn_app().await;

    let now = Utc::now().timestamp_millis();
    for (summary, day) in [("Clear all day.", "Mon Aug 03 2026"), ("Rain.", "Tue Aug 04 2026")] {
        state
            .store
            .insert_record::<weather::Entity>(weather::Model {
                id: 0,
                search_query: "seattle, wa".to_string(),
                forecast: Some(summary.to_string()),
                time: Some(day.to_string()),
                created_at: now,
            })
            .await
            .unwrap();
    }

    let uri = format!("/weather?data={}", seattle_data_param());
    let (status, body) = get(&app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["forecast"], "Clear all day.");
    assert_eq!(rows[1]["time"], "Tue Aug 04 2026");
}

#[tokio::test]
async fn an_unknown_route_is_not_found() {
    let (app, _state) = spawn_app().await;

    let (status, _body) = get(&app, "/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
