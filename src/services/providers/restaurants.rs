use async_trait::async_trait;

use crate::clients::ProviderError;
use crate::clients::yelp::{Business, YelpClient};
use crate::entities::restaurant;
use crate::models::{LocationPoint, ResourceKind};
use crate::services::cache::ResourceProvider;

pub struct RestaurantsProvider {
    client: YelpClient,
}

impl RestaurantsProvider {
    #[must_use]
    pub const fn new(client: YelpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceProvider for RestaurantsProvider {
    type Query = LocationPoint;
    type Raw = Business;
    type Table = restaurant::Entity;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Restaurants
    }

    fn cache_key<'q>(&self, query: &'q LocationPoint) -> &'q str {
        &query.search_query
    }

    async fn fetch(&self, query: &LocationPoint) -> Result<Vec<Business>, ProviderError> {
        self.client
            .search_restaurants(query.latitude, query.longitude)
            .await
    }

    fn normalize(
        &self,
        raw: Business,
        query: &LocationPoint,
        fetched_at: i64,
    ) -> Option<restaurant::Model> {
        Some(restaurant::Model {
            id: 0,
            search_query: query.search_query.clone(),
            name: raw.name,
            image_url: raw.image_url,
            price: raw.price,
            rating: raw.rating,
            url: raw.url,
            created_at: fetched_at,
        })
    }
}
