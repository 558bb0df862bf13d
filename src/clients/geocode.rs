use reqwest::Client;
use serde::Deserialize;

use super::ProviderError;

const GEOCODE_API: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const SERVICE: &str = "Google Geocoding";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeCandidate {
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: Option<Coordinates>,
}

#[derive(Debug, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    api_key: String,
}

impl GeocodeClient {
    #[must_use]
    pub const fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// Geocode a free-text address. Candidates come back in upstream
    /// relevance order; callers typically keep only the first.
    pub async fn lookup(&self, address: &str) -> Result<Vec<GeocodeCandidate>, ProviderError> {
        let url = format!(
            "{GEOCODE_API}?address={}&key={}",
            urlencoding::encode(address),
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

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::http(SERVICE, e))?;

        if body.results.is_empty() {
            return Err(ProviderError::no_data(SERVICE));
        }

        Ok(body.results)
    }
}
