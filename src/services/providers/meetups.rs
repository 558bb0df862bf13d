use async_trait::async_trait;

use crate::clients::ProviderError;
use crate::clients::meetup::{MeetupClient, MeetupGroup};
use crate::entities::meetup;
use crate::models::{LocationPoint, ResourceKind};
use crate::services::cache::ResourceProvider;

pub struct MeetupsProvider {
    client: MeetupClient,
}

impl MeetupsProvider {
    #[must_use]
    pub const fn new(client: MeetupClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceProvider for MeetupsProvider {
    type Query = LocationPoint;
    type Raw = MeetupGroup;
    type Table = meetup::Entity;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Meetups
    }

    fn cache_key<'q>(&self, query: &'q LocationPoint) -> &'q str {
        &query.search_query
    }

    async fn fetch(&self, query: &LocationPoint) -> Result<Vec<MeetupGroup>, ProviderError> {
        self.client.find_groups(&query.search_query).await
    }

    fn normalize(
        &self,
        raw: MeetupGroup,
        query: &LocationPoint,
        fetched_at: i64,
    ) -> Option<meetup::Model> {
        Some(meetup::Model {
            id: 0,
            search_query: query.search_query.clone(),
            link: raw.link,
            name: raw.name,
            creation_date: raw
                .created
                .and_then(chrono::DateTime::from_timestamp_millis)
                .map(|founded| founded.to_rfc3339()),
            host: raw.organizer.and_then(|organizer| organizer.name),
            created_at: fetched_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::meetup::Organizer;

    #[test]
    fn converts_the_founding_timestamp_and_flattens_the_organizer() {
        let provider =
            MeetupsProvider::new(MeetupClient::new(reqwest::Client::new(), String::new()));
        let query = LocationPoint {
            search_query: "seattle, wa".to_string(),
            latitude: 47.6,
            longitude: -122.3,
        };

        let raw = MeetupGroup {
            link: Some("https://www.meetup.com/seattle-rust".to_string()),
            name: Some("Seattle Rust".to_string()),
            // 2019-01-01T00:00:00Z
            created: Some(1_546_300_800_000),
            organizer: Some(Organizer {
                name: Some("Ada".to_string()),
            }),
        };

        let record = provider.normalize(raw, &query, 9).unwrap();

        assert_eq!(record.host.as_deref(), Some("Ada"));
        assert_eq!(
            record.creation_date.as_deref(),
            Some("2019-01-01T00:00:00+00:00")
        );
    }
}
