use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::models::ResourceKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub cache: CacheConfig,

    pub providers: ProviderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            providers: ProviderConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Any sea-orm connection URL; SQLite for a single box, Postgres when the
    /// cache is shared.
    pub database_url: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,

    /// Upstream request timeout in seconds (default: 30)
    pub request_timeout_seconds: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:data/cityscout.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Per-resource time-to-live, in minutes. Zero means the resource never
/// expires; leaving a resource unset means every request refetches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub locations_ttl_minutes: Option<i64>,

    pub weather_ttl_minutes: Option<i64>,

    pub restaurants_ttl_minutes: Option<i64>,

    pub movies_ttl_minutes: Option<i64>,

    pub meetups_ttl_minutes: Option<i64>,

    pub trails_ttl_minutes: Option<i64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            locations_ttl_minutes: Some(0),
            weather_ttl_minutes: Some(60),
            restaurants_ttl_minutes: Some(24 * 60),
            // Unset: movie results refetch on every request.
            movies_ttl_minutes: None,
            meetups_ttl_minutes: Some(24 * 60),
            trails_ttl_minutes: Some(60),
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn ttl_minutes(&self, kind: ResourceKind) -> Option<i64> {
        match kind {
            ResourceKind::Locations => self.locations_ttl_minutes,
            ResourceKind::Weather => self.weather_ttl_minutes,
            ResourceKind::Restaurants => self.restaurants_ttl_minutes,
            ResourceKind::Movies => self.movies_ttl_minutes,
            ResourceKind::Meetups => self.meetups_ttl_minutes,
            ResourceKind::Trails => self.trails_ttl_minutes,
        }
    }
}

/// Upstream API keys. Usually supplied through the environment rather than
/// the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub geocode_api_key: String,

    pub weather_api_key: String,

    pub yelp_api_key: String,

    pub movies_api_key: String,

    pub meetups_api_key: String,

    pub trails_api_key: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Pulls a local .env into the process environment when present.
        let _ = dotenvy::dotenv();

        let mut config = Self::load_file().unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });
        config.apply_env_overrides();

        Ok(config)
    }

    fn load_file() -> Option<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return None;
        }

        info!("Loading config from: {}", path.display());
        Self::load_from_path(&path).ok()
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn config_path() -> PathBuf {
        std::env::var("CITYSCOUT_CONFIG")
            .map_or_else(|_| PathBuf::from("config.toml"), PathBuf::from)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.general.database_url = url;
        }
        if let Ok(port) = std::env::var("PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
        }

        env_override(&mut self.providers.geocode_api_key, "GEOCODE_API_KEY");
        env_override(&mut self.providers.weather_api_key, "WEATHER_API_KEY");
        env_override(&mut self.providers.yelp_api_key, "YELP_API_KEY");
        env_override(&mut self.providers.movies_api_key, "MOVIES_API_KEY");
        env_override(&mut self.providers.meetups_api_key, "MEETUPS_API_KEY");
        env_override(&mut self.providers.trails_api_key, "TRAILS_API_KEY");
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_url.trim().is_empty() {
            anyhow::bail!("database_url must not be empty");
        }
        if self.general.max_db_connections < self.general.min_db_connections {
            anyhow::bail!("max_db_connections must be >= min_db_connections");
        }
        Ok(())
    }
}

fn env_override(target: &mut String, var: &str) {
    if let Ok(value) = std::env::var(var) {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let toml_str = r#"
            [server]
            port = 8080

            [cache]
            weather_ttl_minutes = 5
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.weather_ttl_minutes, Some(5));
        assert_eq!(config.cache.locations_ttl_minutes, Some(0));
        assert_eq!(config.general.database_url, "sqlite:data/cityscout.db");
    }

    #[test]
    fn ttl_lookup_matches_each_resource() {
        let cache = CacheConfig::default();

        assert_eq!(cache.ttl_minutes(ResourceKind::Locations), Some(0));
        assert_eq!(cache.ttl_minutes(ResourceKind::Weather), Some(60));
        assert_eq!(cache.ttl_minutes(ResourceKind::Trails), Some(60));
        assert_eq!(cache.ttl_minutes(ResourceKind::Restaurants), Some(1440));
        assert_eq!(cache.ttl_minutes(ResourceKind::Meetups), Some(1440));
        assert_eq!(cache.ttl_minutes(ResourceKind::Movies), None);
    }

    #[test]
    fn default_config_validates() {
        Config::default().validate().unwrap();
    }
}
