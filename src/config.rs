//! Configuration module
//!
//! `AppConfig` is read from a TOML file. Every section and field has a
//! default, so a missing file or a partial file is valid.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//!
//! [database]
//! backend = "sea_orm"
//! url = "sqlite://./restaurants.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//!
//! [listing]
//! page_size = 10
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::application::ListingSettings;
use crate::infrastructure::DatabaseConfig;

/// Environment variable holding an explicit config file path
pub const CONFIG_PATH_ENV: &str = "RESTAURANT_CONFIG";

/// Environment variable overriding `database.url`
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where repositories keep their data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// SQL database through SeaORM
    #[default]
    SeaOrm,
    /// Process memory, preloaded with demo data
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub backend: StorageBackend,
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let defaults = DatabaseConfig::default();
        Self {
            backend: StorageBackend::default(),
            url: defaults.url,
            max_connections: defaults.max_connections,
        }
    }
}

impl DatabaseSection {
    pub fn connection(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub page_size: u64,
    pub description_excerpt: usize,
    pub feed_limit: u64,
    pub top_limit: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        let defaults = ListingSettings::default();
        Self {
            page_size: defaults.page_size,
            description_excerpt: defaults.description_excerpt,
            feed_limit: defaults.feed_limit,
            top_limit: defaults.top_limit,
        }
    }
}

impl From<&ListingConfig> for ListingSettings {
    fn from(cfg: &ListingConfig) -> Self {
        Self {
            page_size: cfg.page_size,
            description_excerpt: cfg.description_excerpt,
            feed_limit: cfg.feed_limit,
            top_limit: cfg.top_limit,
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults; `DATABASE_URL`
    /// wins over the file's `database.url`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_database_url(path, std::env::var(DATABASE_URL_ENV).ok())
    }

    /// Like [`AppConfig::load`], with the database url override passed in.
    /// Blank overrides are ignored.
    pub fn load_with_database_url(
        path: &Path,
        database_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut cfg = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::default()
        };

        if let Some(url) = database_url.filter(|url| !url.trim().is_empty()) {
            cfg.database.url = url;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listing.page_size == 0 {
            return Err(ConfigError::Invalid("listing.page_size must be >= 1".into()));
        }
        if self.database.backend == StorageBackend::SeaOrm && self.database.url.trim().is_empty()
        {
            return Err(ConfigError::Invalid(format!(
                "database.url is empty; set it in the config file or {}",
                DATABASE_URL_ENV
            )));
        }
        Ok(())
    }

    pub fn listing_settings(&self) -> ListingSettings {
        ListingSettings::from(&self.listing)
    }
}

/// `$RESTAURANT_CONFIG`, or `<config dir>/restaurant-review/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("restaurant-review")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.database.backend, StorageBackend::SeaOrm);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.listing_settings(), ListingSettings::default());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 8080

            [database]
            backend = "memory"

            [listing]
            page_size = 5
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.database.backend, StorageBackend::Memory);
        assert_eq!(cfg.listing.page_size, 5);
        assert_eq!(cfg.listing.description_excerpt, 50);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let cfg = AppConfig::from_toml("[listing]\npage_size = 0").unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_backend_fails_to_parse() {
        assert!(AppConfig::from_toml("[database]\nbackend = \"redis\"").is_err());
    }

    fn missing_path() -> PathBuf {
        std::env::temp_dir().join("restaurant-review-missing-config.toml")
    }

    #[test]
    fn missing_file_loads_defaults() {
        let cfg = AppConfig::load_with_database_url(&missing_path(), None).unwrap();
        assert_eq!(cfg.server.address(), "0.0.0.0:3000");
        assert_eq!(cfg.database.url, DatabaseConfig::default().url);
    }

    #[test]
    fn database_url_override_replaces_configured_url() {
        let url = "sqlite://./override.db?mode=rwc".to_string();
        let cfg = AppConfig::load_with_database_url(&missing_path(), Some(url.clone())).unwrap();
        assert_eq!(cfg.database.url, url);

        let cfg = AppConfig::load_with_database_url(&missing_path(), Some("  ".into())).unwrap();
        assert_eq!(cfg.database.url, DatabaseConfig::default().url);
    }
}
