use async_trait::async_trait;

use crate::clients::ProviderError;
use crate::clients::tmdb::{TmdbClient, TmdbMovie};
use crate::entities::movie;
use crate::models::{LocationPoint, ResourceKind};
use crate::services::cache::ResourceProvider;

const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

pub struct MoviesProvider {
    client: TmdbClient,
}

impl MoviesProvider {
    #[must_use]
    pub const fn new(client: TmdbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceProvider for MoviesProvider {
    type Query = LocationPoint;
    type Raw = TmdbMovie;
    type Table = movie::Entity;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Movies
    }

    fn cache_key<'q>(&self, query: &'q LocationPoint) -> &'q str {
        &query.search_query
    }

    async fn fetch(&self, query: &LocationPoint) -> Result<Vec<TmdbMovie>, ProviderError> {
        self.client.search_movies(&query.search_query).await
    }

    fn normalize(
        &self,
        raw: TmdbMovie,
        query: &LocationPoint,
        fetched_at: i64,
    ) -> Option<movie::Model> {
        Some(movie::Model {
            id: 0,
            search_query: query.search_query.clone(),
            title: raw.title,
            overview: raw.overview,
            average_votes: raw.vote_average,
            total_votes: raw.vote_count,
            image_url: raw
                .poster_path
                .map(|path| format!("{POSTER_BASE}/{}", path.trim_start_matches('/'))),
            popularity: raw.popularity,
            released_on: raw.release_date,
            created_at: fetched_at,
        })
    }
}
