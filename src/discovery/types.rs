//! Discovery types and error definitions.

use std::time::SystemTime;

use alloy::primitives::U256;
use thiserror::Error;

use crate::transaction::amount::{to_minor_units, DEFAULT_DECIMALS};
use crate::transaction::types::AmountError;

/// Errors from a single HTTP exchange.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// The request did not complete within its deadline.
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// The redirect chain was longer than allowed.
    #[error("Too many redirects (limit {limit}) starting at {url}")]
    TooManyRedirects { url: String, limit: u32 },

    /// The server answered with an error status.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// Connection, TLS or body read failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A URL could not be parsed or joined.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Errors that can occur while discovering the network.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// No base URL was configured.
    #[error("Base URL not resolvable: {0}")]
    BaseUrlUnresolved(String),

    /// The configured base URL is not an absolute http(s) URL.
    #[error("Invalid base URL '{0}'")]
    InvalidUrl(String),

    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The topology document is malformed or lacks a gateway.
    #[error("Network config parse error: {0}")]
    ConfigParse(String),

    /// The zero-account constants failed validation.
    #[error("Invalid network parameters: {0}")]
    InvalidNetworkParameters(String),
}

/// Result type for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Network-wide constants derived from the zero-account.
///
/// Only constructed through [`NetworkParameters::new`], which refuses
/// non-positive stability factors and non-finite derived amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkParameters {
    base_url: String,
    gateway_url: String,
    stability_factor: f64,
    network_fee_usd: f64,
    network_fee_asset: f64,
    default_toll_usd: f64,
    default_toll_asset: f64,
    network_toll_tax_rate: f64,
    fetched_at: SystemTime,
}

/// Raw constants as published by the zero-account, before derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawNetworkConstants {
    pub stability_factor: f64,
    pub transaction_fee_usd: f64,
    pub min_toll_usd: f64,
    pub toll_tax_percent: f64,
}

impl NetworkParameters {
    /// Derive and validate parameters from the raw zero-account constants.
    pub fn new(
        base_url: impl Into<String>,
        gateway_url: impl Into<String>,
        raw: RawNetworkConstants,
    ) -> DiscoveryResult<Self> {
        let base_url = base_url.into();
        let gateway_url = gateway_url.into();
        if base_url.is_empty() || gateway_url.is_empty() {
            return Err(DiscoveryError::InvalidNetworkParameters(
                "base and gateway URLs must be non-empty".to_string(),
            ));
        }

        let sf = raw.stability_factor;
        if !sf.is_finite() || sf <= 0.0 {
            return Err(DiscoveryError::InvalidNetworkParameters(format!(
                "stability factor must be positive, got {}",
                sf
            )));
        }

        let network_fee_asset = usd_to_asset(raw.transaction_fee_usd, sf);
        if !network_fee_asset.is_finite() {
            return Err(DiscoveryError::InvalidNetworkParameters(format!(
                "network fee is not derivable from {} USD",
                raw.transaction_fee_usd
            )));
        }

        let default_toll_asset = usd_to_asset(raw.min_toll_usd, sf);
        if !default_toll_asset.is_finite() {
            return Err(DiscoveryError::InvalidNetworkParameters(format!(
                "default toll is not derivable from {} USD",
                raw.min_toll_usd
            )));
        }

        let tax = raw.toll_tax_percent;
        if !tax.is_finite() || !(0.0..100.0).contains(&tax) {
            return Err(DiscoveryError::InvalidNetworkParameters(format!(
                "toll tax percent must be within [0, 100), got {}",
                tax
            )));
        }

        Ok(Self {
            base_url,
            gateway_url,
            stability_factor: sf,
            network_fee_usd: raw.transaction_fee_usd,
            network_fee_asset,
            default_toll_usd: raw.min_toll_usd,
            default_toll_asset,
            network_toll_tax_rate: tax / 100.0,
            fetched_at: SystemTime::now(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    pub fn stability_factor(&self) -> f64 {
        self.stability_factor
    }

    pub fn network_fee_usd(&self) -> f64 {
        self.network_fee_usd
    }

    pub fn network_fee_asset(&self) -> f64 {
        self.network_fee_asset
    }

    pub fn default_toll_usd(&self) -> f64 {
        self.default_toll_usd
    }

    pub fn default_toll_asset(&self) -> f64 {
        self.default_toll_asset
    }

    pub fn network_toll_tax_rate(&self) -> f64 {
        self.network_toll_tax_rate
    }

    pub fn fetched_at(&self) -> SystemTime {
        self.fetched_at
    }

    /// Network fee in minor units (18 decimals, truncated).
    pub fn fee_minor_units(&self) -> Result<U256, AmountError> {
        to_minor_units(self.network_fee_asset, DEFAULT_DECIMALS)
    }

    /// Default toll in minor units (18 decimals, truncated).
    pub fn default_toll_minor_units(&self) -> Result<U256, AmountError> {
        to_minor_units(self.default_toll_asset, DEFAULT_DECIMALS)
    }
}

/// `usd / stability_factor`, or NaN when either side is not positive.
fn usd_to_asset(usd: f64, stability_factor: f64) -> f64 {
    if stability_factor > 0.0 && usd > 0.0 {
        usd / stability_factor
    } else {
        f64::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(sf: f64, fee: f64, toll: f64, tax: f64) -> RawNetworkConstants {
        RawNetworkConstants {
            stability_factor: sf,
            transaction_fee_usd: fee,
            min_toll_usd: toll,
            toll_tax_percent: tax,
        }
    }

    fn params(raw: RawNetworkConstants) -> DiscoveryResult<NetworkParameters> {
        NetworkParameters::new("http://app", "http://gw", raw)
    }

    #[test]
    fn test_derivation() {
        let params = params(raw(2.0, 0.2, 1.0, 1.0)).unwrap();
        assert!((params.network_fee_asset() - 0.1).abs() < 1e-12);
        assert!((params.default_toll_asset() - 0.5).abs() < 1e-12);
        assert!((params.network_toll_tax_rate() - 0.01).abs() < 1e-12);
        assert_eq!(params.stability_factor(), 2.0);
        assert_eq!(params.gateway_url(), "http://gw");
    }

    #[test]
    fn test_rejects_non_positive_stability_factor() {
        for sf in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = params(raw(sf, 0.2, 1.0, 1.0)).unwrap_err();
            assert!(
                matches!(err, DiscoveryError::InvalidNetworkParameters(_)),
                "sf = {}",
                sf
            );
        }
    }

    #[test]
    fn test_rejects_non_derivable_amounts() {
        let err = params(raw(2.0, 0.0, 1.0, 1.0)).unwrap_err();
        assert!(err.to_string().contains("network fee"));

        let err = params(raw(2.0, 0.2, f64::NAN, 1.0)).unwrap_err();
        assert!(err.to_string().contains("default toll"));
    }

    #[test]
    fn test_rejects_tax_out_of_range() {
        assert!(params(raw(2.0, 0.2, 1.0, -1.0)).is_err());
        assert!(params(raw(2.0, 0.2, 1.0, 100.0)).is_err());
        assert!(params(raw(2.0, 0.2, 1.0, 0.0)).is_ok());
    }

    #[test]
    fn test_minor_unit_accessors() {
        let params = params(raw(2.0, 0.2, 1.0, 1.0)).unwrap();
        assert_eq!(params.fee_minor_units().unwrap().to_string(), "100000000000000000");
        assert_eq!(
            params.default_toll_minor_units().unwrap().to_string(),
            "500000000000000000"
        );
    }

    #[test]
    fn test_minor_units_overflow_is_reported() {
        // Finite as f64, but beyond 256 bits once scaled to 18 decimals.
        let params = params(raw(1.0, 1e80, 1.0, 1.0)).unwrap();
        assert!(matches!(params.fee_minor_units(), Err(AmountError::Overflow(_))));
        assert!(params.default_toll_minor_units().is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = NetworkError::Timeout(15000);
        assert_eq!(err.to_string(), "Request timed out after 15000 ms");

        let err = DiscoveryError::from(NetworkError::Http {
            status: 404,
            url: "http://x/a".into(),
        });
        assert_eq!(err.to_string(), "HTTP 404 from http://x/a");
    }
}
