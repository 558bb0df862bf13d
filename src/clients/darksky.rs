use reqwest::Client;
use serde::Deserialize;

use super::ProviderError;

const DARKSKY_API: &str = "https://api.darksky.net/forecast";
const SERVICE: &str = "Dark Sky";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    data: Vec<DailyForecast>,
}

#[derive(Debug, Deserialize)]
pub struct DailyForecast {
    pub summary: Option<String>,
    /// Unix seconds of the forecast day.
    pub time: Option<i64>,
}

#[derive(Clone)]
pub struct DarkSkyClient {
    client: Client,
    api_key: String,
}

impl DarkSkyClient {
    #[must_use]
    pub const fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// Day-by-day forecast for a coordinate pair.
    pub async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<DailyForecast>, ProviderError> {
        let url = format!("{DARKSKY_API}/{}/{latitude},{longitude}", self.api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::http(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(ProviderError::status(SERVICE, response.status()));
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::http(SERVICE, e))?;

        let days = body.daily.map(|block| block.data).unwrap_or_default();
        if days.is_empty() {
            return Err(ProviderError::no_data(SERVICE));
        }

        Ok(days)
    }
}
