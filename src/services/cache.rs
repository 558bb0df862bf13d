use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::clients::ProviderError;
use crate::config::CacheConfig;
use crate::db::{ResourceTable, Store};
use crate::models::ResourceKind;

use super::freshness::{self, Freshness};

/// Failure of the cache lookup itself: without a store read there is no way
/// to answer the request, so this is the one error that surfaces to callers.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("record store lookup failed: {0}")]
    Store(#[from] sea_orm::DbErr),
}

/// How a request was answered.
#[derive(Debug)]
pub enum CacheOutcome<M> {
    /// Served from the store without touching the upstream.
    Hit(Vec<M>),
    /// Fetched from the upstream (miss or stale) and re-cached.
    Refetched(Vec<M>),
    /// The upstream had nothing usable; nothing was cached.
    Empty,
}

impl<M> CacheOutcome<M> {
    /// Flattens the outcome into the records to serve; `Empty` becomes no
    /// records.
    #[must_use]
    pub fn into_records(self) -> Vec<M> {
        match self {
            Self::Hit(records) | Self::Refetched(records) => records,
            Self::Empty => Vec::new(),
        }
    }
}

/// One cached resource: which table it lives in, how to fetch it remotely,
/// and how to turn one raw upstream item into a stored record.
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    type Query: Sync;
    type Raw: Send;
    type Table: ResourceTable;

    fn kind(&self) -> ResourceKind;

    /// The store key for a query.
    fn cache_key<'q>(&self, query: &'q Self::Query) -> &'q str;

    /// Whether only the first upstream candidate is kept (geocoding).
    fn single_result(&self) -> bool {
        false
    }

    async fn fetch(&self, query: &Self::Query) -> Result<Vec<Self::Raw>, ProviderError>;

    /// Pure transform of one raw item. `None` drops that item without
    /// failing the rest of the batch.
    fn normalize(
        &self,
        raw: Self::Raw,
        query: &Self::Query,
        fetched_at: i64,
    ) -> Option<<Self::Table as ResourceTable>::Model>;
}

/// The read-through cache pipeline shared by every resource endpoint.
pub struct CacheService {
    store: Store,
    ttls: CacheConfig,
}

impl CacheService {
    #[must_use]
    pub const fn new(store: Store, ttls: CacheConfig) -> Self {
        Self { store, ttls }
    }

    /// Answers a query from the store when the cached rows are still fresh,
    /// otherwise invalidates and refetches.
    ///
    /// Staleness is judged on the first row only: every row of a refetch
    /// batch carries the same `created_at`, so the first row speaks for the
    /// whole set.
    pub async fn fetch_through<P: ResourceProvider>(
        &self,
        provider: &P,
        query: &P::Query,
    ) -> Result<CacheOutcome<<P::Table as ResourceTable>::Model>, LookupError> {
        let kind = provider.kind();
        let key = provider.cache_key(query);

        let rows = self.store.find_records::<P::Table>(key).await?;

        if let Some(first) = rows.first() {
            let age_millis = Utc::now().timestamp_millis() - P::Table::created_at(first);
            match freshness::verdict(self.ttls.ttl_minutes(kind), age_millis) {
                Freshness::NonExpiring | Freshness::Fresh => {
                    debug!(resource = %kind, key, rows = rows.len(), "cache hit");
                    return Ok(CacheOutcome::Hit(rows));
                }
                Freshness::Stale => {
                    info!(resource = %kind, key, age_millis, "cached rows are stale, discarding");
                    if let Err(e) = self.store.delete_records::<P::Table>(key).await {
                        warn!(resource = %kind, key, error = %e, "failed to drop stale rows");
                    }
                }
            }
        } else {
            debug!(resource = %kind, key, "cache miss");
        }

        self.refetch(provider, query).await
    }

    async fn refetch<P: ResourceProvider>(
        &self,
        provider: &P,
        query: &P::Query,
    ) -> Result<CacheOutcome<<P::Table as ResourceTable>::Model>, LookupError> {
        let kind = provider.kind();
        let key = provider.cache_key(query);

        let mut raw = match provider.fetch(query).await {
            Ok(items) => items,
            Err(e) => {
                // Upstreams legitimately have nothing for many queries; an
                // empty answer is a valid answer.
                warn!(resource = %kind, key, error = %e, "upstream fetch yielded nothing");
                return Ok(CacheOutcome::Empty);
            }
        };

        if provider.single_result() {
            raw.truncate(1);
        }

        // One stamp for the whole batch.
        let fetched_at = Utc::now().timestamp_millis();

        let mut records = Vec::with_capacity(raw.len());
        for item in raw {
            let Some(record) = provider.normalize(item, query, fetched_at) else {
                warn!(resource = %kind, key, "skipping upstream item that would not normalize");
                continue;
            };
            // A failed write must not cost us the data we already hold.
            if let Err(e) = self.store.insert_record::<P::Table>(record.clone()).await {
                warn!(resource = %kind, key, error = %e, "failed to cache record");
            }
            records.push(record);
        }

        if records.is_empty() {
            return Ok(CacheOutcome::Empty);
        }

        info!(resource = %kind, key, rows = records.len(), "refetched and cached");
        Ok(CacheOutcome::Refetched(records))
    }
}
