use reqwest::Client;
use serde::Deserialize;

use super::ProviderError;

const TMDB_API: &str = "https://api.themoviedb.org/3/search/movie";
const SERVICE: &str = "TMDb";

#[derive(Debug, Deserialize)]
struct MovieSearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbMovie {
    pub title: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub poster_path: Option<String>,
    pub popularity: Option<f64>,
    pub release_date: Option<String>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
}

impl TmdbClient {
    #[must_use]
    pub const fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// Movies matching a place name (TMDb has no geographic search; the
    /// canonical query string stands in for one).
    pub async fn search_movies(&self, query: &str) -> Result<Vec<TmdbMovie>, ProviderError> {
        let url = format!(
            "{TMDB_API}?api_key={}&query={}",
            self.api_key,
            urlencoding::encode(query)
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

        let body: MovieSearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::http(SERVICE, e))?;

        if body.results.is_empty() {
            return Err(ProviderError::no_data(SERVICE));
        }

        Ok(body.results)
    }
}
