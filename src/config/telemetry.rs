//! Logging and tracing configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Default log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,
}

impl TelemetryConfig {
    /// Validate telemetry configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !VALID_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ValidationError::InvalidLogLevel(self.log_level.clone()));
        }
        Ok(())
    }

    /// Installs the global tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured level. Safe to call
    /// only once per process.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.clone()));

        if self.json_logs {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .init();
        } else {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
