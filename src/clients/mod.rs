use reqwest::StatusCode;
use thiserror::Error;

pub mod darksky;
pub mod geocode;
pub mod hiking;
pub mod meetup;
pub mod tmdb;
pub mod yelp;

pub use darksky::DarkSkyClient;
pub use geocode::GeocodeClient;
pub use hiking::HikingClient;
pub use meetup::MeetupClient;
pub use tmdb::TmdbClient;
pub use yelp::YelpClient;

/// Failure of an upstream fetch. `NoData` is the expected "nothing there"
/// case (empty result collection); the cache pipeline turns every variant
/// into an empty result rather than a server error.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {service} failed: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned status {status}")]
    Status {
        service: &'static str,
        status: StatusCode,
    },

    #[error("{service} returned no usable data")]
    NoData { service: &'static str },
}

impl ProviderError {
    pub fn http(service: &'static str, source: reqwest::Error) -> Self {
        Self::Http { service, source }
    }

    pub const fn status(service: &'static str, status: StatusCode) -> Self {
        Self::Status { service, status }
    }

    pub const fn no_data(service: &'static str) -> Self {
        Self::NoData { service }
    }
}
