use reqwest::Client;
use serde::Deserialize;

use super::ProviderError;

const MEETUP_API: &str = "https://api.meetup.com/find/groups";
const SERVICE: &str = "Meetup";

#[derive(Debug, Deserialize)]
pub struct MeetupGroup {
    pub link: Option<String>,
    pub name: Option<String>,
    /// Epoch milliseconds of group creation.
    pub created: Option<i64>,
    pub organizer: Option<Organizer>,
}

#[derive(Debug, Deserialize)]
pub struct Organizer {
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct MeetupClient {
    client: Client,
    api_key: String,
}

impl MeetupClient {
    #[must_use]
    pub const fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// Groups matching a place name. Meetup answers with a bare JSON array.
    pub async fn find_groups(&self, query: &str) -> Result<Vec<MeetupGroup>, ProviderError> {
        let url = format!(
            "{MEETUP_API}?key={}&query={}&radius=1",
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

        let groups: Vec<MeetupGroup> = response
            .json()
            .await
            .map_err(|e| ProviderError::http(SERVICE, e))?;

        if groups.is_empty() {
            return Err(ProviderError::no_data(SERVICE));
        }

        Ok(groups)
    }
}
