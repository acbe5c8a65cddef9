//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `P24_GATEWAY` prefix and
//! `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use przelewy24_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod przelewy24;
mod server;
mod settings_store;
mod site;

pub use error::{ConfigError, ValidationError};
pub use przelewy24::Przelewy24Config;
pub use server::{Environment, LogFormat, ServerConfig};
pub use settings_store::ConfigSettingsStore;
pub use site::{LexiconConfig, SiteConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Merchant credentials and gateway switches
    #[serde(default)]
    pub przelewy24: Przelewy24Config,

    /// Shop URLs
    #[serde(default)]
    pub site: SiteConfig,

    /// Localized strings
    #[serde(default)]
    pub lexicon: LexiconConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `P24_GATEWAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `P24_GATEWAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `P24_GATEWAY__PRZELEWY24__POS_ID=...` -> `przelewy24.pos_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("P24_GATEWAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Missing merchant credentials are not an error.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.przelewy24.validate()?;
        self.site.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
