use async_trait::async_trait;

use crate::clients::ProviderError;
use crate::clients::geocode::{GeocodeCandidate, GeocodeClient};
use crate::entities::location;
use crate::models::ResourceKind;
use crate::services::cache::ResourceProvider;

/// The root resource: geocodes raw search text into the canonical place every
/// other resource is keyed on. Only the geocoder's first candidate is kept.
pub struct LocationProvider {
    client: GeocodeClient,
}

impl LocationProvider {
    #[must_use]
    pub const fn new(client: GeocodeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceProvider for LocationProvider {
    type Query = String;
    type Raw = GeocodeCandidate;
    type Table = location::Entity;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Locations
    }

    fn cache_key<'q>(&self, query: &'q String) -> &'q str {
        query
    }

    fn single_result(&self) -> bool {
        true
    }

    async fn fetch(&self, query: &String) -> Result<Vec<GeocodeCandidate>, ProviderError> {
        self.client.lookup(query).await
    }

    fn normalize(
        &self,
        raw: GeocodeCandidate,
        query: &String,
        fetched_at: i64,
    ) -> Option<location::Model> {
        // A candidate without coordinates is useless to every derived
        // resource, so it does not become a record at all.
        let point = raw.geometry?.location?;

        Some(location::Model {
            id: 0,
            search_query: query.clone(),
            formatted_query: raw.formatted_address,
            latitude: point.lat,
            longitude: point.lng,
            created_at: fetched_at,
        })
    }
}
