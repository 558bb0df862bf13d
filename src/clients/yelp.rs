use reqwest::Client;
use serde::Deserialize;

use super::ProviderError;

const YELP_API: &str = "https://api.yelp.com/v3/businesses/search";
const SERVICE: &str = "Yelp";

#[derive(Debug, Deserialize)]
struct BusinessSearchResponse {
    #[serde(default)]
    businesses: Vec<Business>,
}

#[derive(Debug, Deserialize)]
pub struct Business {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub url: Option<String>,
}

#[derive(Clone)]
pub struct YelpClient {
    client: Client,
    api_key: String,
}

impl YelpClient {
    #[must_use]
    pub const fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// Restaurants near a coordinate pair. Yelp authenticates with a bearer
    /// token rather than a query-string key.
    pub async fn search_restaurants(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<Business>, ProviderError> {
        let url = format!(
            "{YELP_API}?latitude={latitude}&longitude={longitude}&categories=restaurants"
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::http(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(ProviderError::status(SERVICE, response.status()));
        }

        let body: BusinessSearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::http(SERVICE, e))?;

        if body.businesses.is_empty() {
            return Err(ProviderError::no_data(SERVICE));
        }

        Ok(body.businesses)
    }
}
