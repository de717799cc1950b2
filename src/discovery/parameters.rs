//! Zero-account decoding.
//!
//! The gateway publishes network-wide constants on a reserved account:
//!
//! ```text
//! GET {gateway}/account/0000…0000
//! { "account": { "current": {
//!     "stabilityFactorStr": "2.0",
//!     "transactionFeeUsdStr": "0.01",
//!     "minTollUsdStr": "1",
//!     "tollNetworkTaxPercent": 1 } } }
//! ```
//!
//! Each field may arrive as a JSON string or number.

use serde_json::Value;

use crate::discovery::types::{DiscoveryError, DiscoveryResult, RawNetworkConstants};

/// Id of the account that carries network-wide constants.
pub const ZERO_ACCOUNT_ID: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Decode the zero-account response body into raw constants.
pub fn parse_zero_account(body: &str) -> DiscoveryResult<RawNetworkConstants> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        DiscoveryError::InvalidNetworkParameters(format!(
            "zero-account response is not JSON: {}",
            e
        ))
    })?;

    let current = value
        .pointer("/account/current")
        .filter(|v| v.is_object())
        .ok_or_else(|| {
            DiscoveryError::InvalidNetworkParameters("missing account.current".to_string())
        })?;

    Ok(RawNetworkConstants {
        stability_factor: scalar(current, "stabilityFactorStr")?,
        transaction_fee_usd: scalar(current, "transactionFeeUsdStr")?,
        min_toll_usd: scalar(current, "minTollUsdStr")?,
        toll_tax_percent: scalar(current, "tollNetworkTaxPercent")?,
    })
}

fn scalar(current: &Value, field: &str) -> DiscoveryResult<f64> {
    let parsed = match current.get(field) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        DiscoveryError::InvalidNetworkParameters(format!(
            "field '{}' is missing or not numeric",
            field
        ))
    })
}
