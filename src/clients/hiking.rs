use reqwest::Client;
use serde::Deserialize;

use super::ProviderError;

const HIKING_API: &str = "https://www.hikingproject.com/data/get-trails";
const SERVICE: &str = "Hiking Project";

#[derive(Debug, Deserialize)]
struct TrailsResponse {
    #[serde(default)]
    trails: Vec<RawTrail>,
}

#[derive(Debug, Deserialize)]
pub struct RawTrail {
    pub name: Option<String>,
    pub location: Option<String>,
    pub length: Option<f64>,
    pub stars: Option<f64>,
    #[serde(rename = "starVotes")]
    pub star_votes: Option<i64>,
    pub summary: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "conditionDetails")]
    pub condition_details: Option<String>,
    /// "YYYY-MM-DD HH:MM:SS" as reported by the trail API.
    #[serde(rename = "conditionDate")]
    pub condition_date: Option<String>,
}

#[derive(Clone)]
pub struct HikingClient {
    client: Client,
    api_key: String,
}

impl HikingClient {
    #[must_use]
    pub const fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// Trails near a coordinate pair.
    pub async fn nearby_trails(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<RawTrail>, ProviderError> {
        let url = format!(
            "{HIKING_API}?lat={latitude}&lon={longitude}&key={}",
            self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::http(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(ProviderError::status(SERVICE, response.status()));
        }

        let body: TrailsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::http(SERVICE, e))?;

        if body.trails.is_empty() {
            return Err(ProviderError::no_data(SERVICE));
        }

        Ok(body.trails)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_camel_case_upstream_fields() {
        let raw: RawTrail = serde_json::from_value(serde_json::json!({
            "name": "Rattlesnake Ledge",
            "location": "North Bend, Washington",
            "length": 5.3,
            "stars": 4.4,
            "starVotes": 1081,
            "summary": "An extremely popular out-and-back hike.",
            "url": "https://www.hikingproject.com/trail/7021533",
            "conditionDetails": "Dry",
            "conditionDate": "2019-07-21 14:12:33"
        }))
        .unwrap();

        assert_eq!(raw.star_votes, Some(1081));
        assert_eq!(raw.condition_details.as_deref(), Some("Dry"));
        assert_eq!(raw.condition_date.as_deref(), Some("2019-07-21 14:12:33"));
    }

    #[test]
    fn tolerates_missing_fields() {
        let raw: RawTrail =
            serde_json::from_value(serde_json::json!({ "name": "Unnamed spur" })).unwrap();

        assert!(raw.length.is_none());
        assert!(raw.condition_date.is_none());
    }
}
