use async_trait::async_trait;

use crate::clients::ProviderError;
use crate::clients::hiking::{HikingClient, RawTrail};
use crate::entities::trail;
use crate::models::{LocationPoint, ResourceKind};
use crate::services::cache::ResourceProvider;

pub struct TrailsProvider {
    client: HikingClient,
}

impl TrailsProvider {
    #[must_use]
    pub const fn new(client: HikingClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceProvider for TrailsProvider {
    type Query = LocationPoint;
    type Raw = RawTrail;
    type Table = trail::Entity;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Trails
    }

    fn cache_key<'q>(&self, query: &'q LocationPoint) -> &'q str {
        &query.search_query
    }

    async fn fetch(&self, query: &LocationPoint) -> Result<Vec<RawTrail>, ProviderError> {
        self.client
            .nearby_trails(query.latitude, query.longitude)
            .await
    }

    fn normalize(
        &self,
        raw: RawTrail,
        query: &LocationPoint,
        fetched_at: i64,
    ) -> Option<trail::Model> {
        // Upstream reports one "YYYY-MM-DD HH:MM:SS" stamp; the record keeps
        // the date and time halves separately.
        let (condition_date, condition_time) = match raw.condition_date {
            Some(stamp) => (
                stamp.get(..10).map(str::to_string),
                stamp.get(11..19).map(str::to_string),
            ),
            None => (None, None),
        };

        Some(trail::Model {
            id: 0,
            search_query: query.search_query.clone(),
            name: raw.name,
            location: raw.location,
            length: raw.length,
            stars: raw.stars,
            star_votes: raw.star_votes,
            summary: raw.summary,
            trail_url: raw.url,
            conditions: raw.condition_details,
            condition_date,
            condition_time,
            created_at: fetched_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> TrailsProvider {
        TrailsProvider::new(HikingClient::new(reqwest::Client::new(), String::new()))
    }

    fn north_bend() -> LocationPoint {
        LocationPoint {
            search_query: "north bend, wa".to_string(),
            latitude: 47.5,
            longitude: -121.8,
        }
    }

    #[test]
    fn splits_the_condition_stamp_into_date_and_time() {
        let raw = RawTrail {
            name: Some("Rattlesnake Ledge".to_string()),
            location: Some("North Bend, Washington".to_string()),
            length: Some(5.3),
            stars: Some(4.4),
            star_votes: Some(1081),
            summary: Some("An extremely popular out-and-back hike.".to_string()),
            url: Some("https://www.hikingproject.com/trail/7021533".to_string()),
            condition_details: Some("Dry".to_string()),
            condition_date: Some("2019-07-21 14:12:33".to_string()),
        };

        let record = provider().normalize(raw, &north_bend(), 4).unwrap();

        assert_eq!(record.condition_date.as_deref(), Some("2019-07-21"));
        assert_eq!(record.condition_time.as_deref(), Some("14:12:33"));
        assert_eq!(record.trail_url.as_deref(), Some(
            "https://www.hikingproject.com/trail/7021533"
        ));
    }

    #[test]
    fn short_or_missing_condition_stamp_is_tolerated() {
        let raw = RawTrail {
            name: Some("Unnamed spur".to_string()),
            location: None,
            length: None,
            stars: None,
            star_votes: None,
            summary: None,
            url: None,
            condition_details: None,
            condition_date: Some("2019-07".to_string()),
        };

        let record = provider().normalize(raw, &north_bend(), 0).unwrap();

        assert!(record.condition_date.is_none());
        assert!(record.condition_time.is_none());
    }
}
