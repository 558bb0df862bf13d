use async_trait::async_trait;

use crate::clients::ProviderError;
use crate::clients::darksky::{DailyForecast, DarkSkyClient};
use crate::entities::weather;
use crate::models::{LocationPoint, ResourceKind};
use crate::services::cache::ResourceProvider;

pub struct WeatherProvider {
    client: DarkSkyClient,
}

impl WeatherProvider {
    #[must_use]
    pub const fn new(client: DarkSkyClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceProvider for WeatherProvider {
    type Query = LocationPoint;
    type Raw = DailyForecast;
    type Table = weather::Entity;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Weather
    }

    fn cache_key<'q>(&self, query: &'q LocationPoint) -> &'q str {
        &query.search_query
    }

    async fn fetch(&self, query: &LocationPoint) -> Result<Vec<DailyForecast>, ProviderError> {
        self.client
            .daily_forecast(query.latitude, query.longitude)
            .await
    }

    fn normalize(
        &self,
        raw: DailyForecast,
        query: &LocationPoint,
        fetched_at: i64,
    ) -> Option<weather::Model> {
        Some(weather::Model {
            id: 0,
            search_query: query.search_query.clone(),
            forecast: raw.summary,
            time: raw.time.and_then(format_forecast_day),
            created_at: fetched_at,
        })
    }
}

/// "Tue Aug 04 2026", the day label clients render as-is.
fn format_forecast_day(unix_seconds: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(unix_seconds, 0)
        .map(|day| day.format("%a %b %d %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> WeatherProvider {
        WeatherProvider::new(DarkSkyClient::new(reqwest::Client::new(), String::new()))
    }

    fn seattle() -> LocationPoint {
        LocationPoint {
            search_query: "seattle, wa".to_string(),
            latitude: 47.6,
            longitude: -122.3,
        }
    }

    #[test]
    fn formats_the_forecast_day() {
        let raw = DailyForecast {
            summary: Some("Partly cloudy throughout the day.".to_string()),
            // 2019-01-01T00:00:00Z
            time: Some(1_546_300_800),
        };

        let record = provider().normalize(raw, &seattle(), 7).unwrap();

        assert_eq!(record.time.as_deref(), Some("Tue Jan 01 2019"));
        assert_eq!(
            record.forecast.as_deref(),
            Some("Partly cloudy throughout the day.")
        );
        assert_eq!(record.search_query, "seattle, wa");
        assert_eq!(record.created_at, 7);
    }

    #[test]
    fn missing_summary_and_time_become_null() {
        let raw = DailyForecast {
            summary: None,
            time: None,
        };

        let record = provider().normalize(raw, &seattle(), 0).unwrap();
        assert!(record.forecast.is_none());
        assert!(record.time.is_none());
    }
}
