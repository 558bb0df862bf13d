use std::time::Instant;

use crate::clients::{
    DarkSkyClient, GeocodeClient, HikingClient, MeetupClient, TmdbClient, YelpClient,
};
use crate::config::Config;
use crate::db::Store;
use crate::services::CacheService;
use crate::services::providers::{
    LocationProvider, MeetupsProvider, MoviesProvider, RestaurantsProvider, TrailsProvider,
    WeatherProvider,
};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// Reused across all providers to enable connection pooling and avoid
/// socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("CityScout/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Everything a request handler needs, built once at startup.
pub struct SharedState {
    pub config: Config,

    pub store: Store,

    pub cache: CacheService,

    pub locations: LocationProvider,

    pub weather: WeatherProvider,

    pub restaurants: RestaurantsProvider,

    pub movies: MoviesProvider,

    pub meetups: MeetupsProvider,

    pub trails: TrailsProvider,

    pub start_time: Instant,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client =
            build_shared_http_client(config.general.request_timeout_seconds.into())?;

        let keys = &config.providers;
        let locations = LocationProvider::new(GeocodeClient::new(
            http_client.clone(),
            keys.geocode_api_key.clone(),
        ));
        let weather = WeatherProvider::new(DarkSkyClient::new(
            http_client.clone(),
            keys.weather_api_key.clone(),
        ));
        let restaurants = RestaurantsProvider::new(YelpClient::new(
            http_client.clone(),
            keys.yelp_api_key.clone(),
        ));
        let movies = MoviesProvider::new(TmdbClient::new(
            http_client.clone(),
            keys.movies_api_key.clone(),
        ));
        let meetups = MeetupsProvider::new(MeetupClient::new(
            http_client.clone(),
            keys.meetups_api_key.clone(),
        ));
        let trails =
            TrailsProvider::new(HikingClient::new(http_client, keys.trails_api_key.clone()));

        let cache = CacheService::new(store.clone(), config.cache.clone());

        Ok(Self {
            config,
            store,
            cache,
            locations,
            weather,
            restaurants,
            movies,
            meetups,
            trails,
            start_time: Instant::now(),
        })
    }
}
