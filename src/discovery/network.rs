//! Network discovery: base URL → gateway URL → zero-account constants.
//!
//! # Responsibilities
//! - Resolve the application base URL from environment or config
//! - Locate the active gateway from the topology document
//! - Fetch and validate the economic constants
//!
//! No step falls back to a default value. Any failure aborts discovery.

use reqwest::Client;

use crate::config::DiscoveryConfig;
use crate::discovery::fetch::{discovery_client, fetch_text};
use crate::discovery::parameters::{parse_zero_account, ZERO_ACCOUNT_ID};
use crate::discovery::topology::parse_gateway_url;
use crate::discovery::types::{DiscoveryError, DiscoveryResult, NetworkParameters};
use crate::observability::metrics;

/// Environment variable that overrides `discovery.base_url`.
pub const BASE_URL_ENV_VAR: &str = "LEDGER_BASE_URL";

/// Resolve the application base URL.
///
/// `LEDGER_BASE_URL` takes precedence over the configured value.
pub fn resolve_base_url(config: &DiscoveryConfig) -> DiscoveryResult<String> {
    let from_env = std::env::var(BASE_URL_ENV_VAR).ok();
    resolve_base_url_from(from_env.as_deref(), config.base_url.as_deref())
}

fn resolve_base_url_from(env: Option<&str>, configured: Option<&str>) -> DiscoveryResult<String> {
    let candidate = env
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| configured.map(str::trim).filter(|s| !s.is_empty()))
        .ok_or_else(|| {
            DiscoveryError::BaseUrlUnresolved(format!(
                "set {} or discovery.base_url",
                BASE_URL_ENV_VAR
            ))
        })?;

    match url::Url::parse(candidate) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Ok(candidate.trim_end_matches('/').to_string())
        }
        _ => Err(DiscoveryError::InvalidUrl(candidate.to_string())),
    }
}

/// Discovery driver holding the HTTP client and fetch limits.
#[derive(Debug, Clone)]
pub struct NetworkDiscovery {
    client: Client,
    config: DiscoveryConfig,
}

impl NetworkDiscovery {
    pub fn new(config: DiscoveryConfig) -> DiscoveryResult<Self> {
        let client = discovery_client()?;
        Ok(Self { client, config })
    }

    /// Fetch the topology document and return the first gateway's URL.
    pub async fn extract_gateway_url(&self, base_url: &str) -> DiscoveryResult<String> {
        let url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.config.network_config_path.trim_start_matches('/')
        );
        tracing::debug!(url = %url, "Fetching network config");

        let source = self.fetch(&url).await?;
        parse_gateway_url(&source)
    }

    /// Fetch the zero-account and derive validated network parameters.
    pub async fn fetch_network_parameters(
        &self,
        base_url: &str,
        gateway_url: &str,
    ) -> DiscoveryResult<NetworkParameters> {
        let url = format!(
            "{}/account/{}",
            gateway_url.trim_end_matches('/'),
            ZERO_ACCOUNT_ID
        );
        tracing::debug!(url = %url, "Fetching network constants");

        let body = self.fetch(&url).await?;
        let raw = parse_zero_account(&body)?;
        NetworkParameters::new(base_url, gateway_url, raw)
    }

    /// Run the full discovery sequence.
    pub async fn discover(&self) -> DiscoveryResult<NetworkParameters> {
        let result = self.discover_inner().await;
        match &result {
            Ok(params) => {
                metrics::record_discovery("ok");
                tracing::info!(
                    base_url = %params.base_url(),
                    gateway_url = %params.gateway_url(),
                    stability_factor = params.stability_factor(),
                    network_fee = params.network_fee_asset(),
                    default_toll = params.default_toll_asset(),
                    toll_tax_rate = params.network_toll_tax_rate(),
                    "Network parameters discovered"
                );
            }
            Err(e) => {
                metrics::record_discovery("error");
                tracing::error!(error = %e, "Network discovery failed");
            }
        }
        result
    }

    async fn discover_inner(&self) -> DiscoveryResult<NetworkParameters> {
        let base_url = resolve_base_url(&self.config)?;
        let gateway_url = self.extract_gateway_url(&base_url).await?;
        self.fetch_network_parameters(&base_url, &gateway_url).await
    }

    async fn fetch(&self, url: &str) -> DiscoveryResult<String> {
        Ok(fetch_text(
            &self.client,
            url,
            self.config.fetch_timeout(),
            self.config.max_redirects,
        )
        .await?)
    }
}
