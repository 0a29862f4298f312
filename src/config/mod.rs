//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `LIBERASPHERE_` prefix and nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use liberasphere::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.telemetry.init_tracing();
//! ```

mod database;
mod error;
mod reconciler;
mod telemetry;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use reconciler::ReconcilerConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Reconciliation sweep configuration
    #[serde(default)]
    pub reconciler: ReconcilerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `LIBERASPHERE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `LIBERASPHERE__DATABASE__URL=...` -> `database.url = ...`
    /// - `LIBERASPHERE__TELEMETRY__LOG_LEVEL=debug` -> `telemetry.log_level = debug`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LIBERASPHERE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.telemetry.validate()?;
        self.reconciler.validate()?;
        Ok(())
    }
}
