//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the ledger client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL and network topology discovery.
    pub discovery: DiscoveryConfig,

    /// Transaction submission settings.
    pub gateway: GatewayConfig,

    /// Confirmation polling settings.
    pub poller: PollerConfig,

    /// Key material source.
    pub signer: SignerConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Application base URL (e.g., "https://app.example.org").
    /// Overridden by the `LEDGER_BASE_URL` environment variable.
    pub base_url: Option<String>,

    /// Path of the network topology document, relative to the base URL.
    pub network_config_path: String,

    /// Hard timeout for each discovery fetch, in milliseconds.
    pub fetch_timeout_ms: u64,

    /// Maximum number of redirects followed per fetch.
    pub max_redirects: u32,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            network_config_path: "network.json".to_string(),
            fetch_timeout_ms: 15_000,
            max_redirects: 5,
        }
    }
}

impl DiscoveryConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// Gateway submission configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Timeout for the inject POST in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 15_000,
        }
    }
}

/// Confirmation poller configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Delay between consecutive polls in milliseconds.
    pub poll_interval_ms: u64,

    /// Elapsed time after which the collector endpoint is queried instead
    /// of the primary one, in milliseconds.
    pub collector_switch_ms: u64,

    /// Overall deadline for a confirmation wait in milliseconds.
    pub timeout_ms: u64,

    /// Timeout for each individual poll request in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2_000,
            collector_switch_ms: 20_000,
            timeout_ms: 30_000,
            request_timeout_ms: 10_000,
        }
    }
}

/// Signer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Environment variable holding the hex-encoded private key.
    pub private_key_env: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            private_key_env: crate::signer::wallet::PRIVATE_KEY_ENV_VAR.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format ("pretty" or "json").
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}
