pub mod cache;
pub mod freshness;
pub mod providers;

pub use cache::{CacheOutcome, CacheService, LookupError, ResourceProvider};
pub use freshness::Freshness;
