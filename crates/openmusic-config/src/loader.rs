//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use openmusic_core::CatalogError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `OPENMUSIC__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, CatalogError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, CatalogError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), CatalogError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, CatalogError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("OPENMUSIC_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("OPENMUSIC")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_catalog_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_catalog_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the configuration.
    pub fn validate_config(config: &AppConfig) -> Result<(), CatalogError> {
        if config.database.url.is_empty() {
            return Err(CatalogError::Configuration("Database URL is required".to_string()));
        }

        if config.database.query_timeout_ms == 0 {
            return Err(CatalogError::Configuration(
                "database.query_timeout_ms must be greater than zero".to_string(),
            ));
        }

        if config.cache.invalidation_attempts == 0 {
            return Err(CatalogError::Configuration(
                "cache.invalidation_attempts must be at least 1".to_string(),
            ));
        }

        if config.cache.enabled && config.cache.url.is_empty() {
            return Err(CatalogError::Configuration(
                "cache.url is required when the cache is enabled".to_string(),
            ));
        }

        if config.cache.ttl().is_none() {
            warn!("Cache entries have no expiry; a crash between commit and invalidation leaves them stale until the next write");
        }

        Ok(())
    }
}

fn config_error_to_catalog_error(err: ConfigError) -> CatalogError {
    CatalogError::Configuration(err.to_string())
}
