use crate::config::constants::telemetry;
use serde::{Deserialize, Serialize};

/// Logging configuration; `RUST_LOG` takes precedence when set
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    telemetry::DEFAULT_LOG_LEVEL.to_string()
}
