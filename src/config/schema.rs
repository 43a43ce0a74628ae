//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Advertise only read verbs for every kind
    #[serde(default = "default_false")]
    pub read_only: bool,

    /// Starting namespace (`*` or `-A` for all namespaces)
    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// Seconds between reconciliations
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate: u64,

    /// Per-request deadline in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

// Default value functions
fn default_false() -> bool {
    false
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_refresh_rate() -> u64 {
    2
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_only: default_false(),
            default_namespace: default_namespace(),
            refresh_rate: default_refresh_rate(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Config {
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_rate.max(1))
    }

    pub fn request_deadline(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout.max(1))
    }
}
