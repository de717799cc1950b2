//! Shared fixtures for integration tests.

#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

use ledger_client::config::{ClientConfig, DiscoveryConfig, PollerConfig};
use ledger_client::discovery::parameters::ZERO_ACCOUNT_ID;

/// Anvil's first account. Publicly known; never holds real funds.
pub const TEST_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_LEDGER_ADDRESS: &str =
    "f39fd6e51aad88f6f4ce6ab8827279cfffb92266000000000000000000000000";

/// Client config pointing discovery at `base_url` with short poll timings.
pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        discovery: DiscoveryConfig {
            base_url: Some(base_url.to_string()),
            fetch_timeout_ms: 2_000,
            ..DiscoveryConfig::default()
        },
        poller: PollerConfig {
            poll_interval_ms: 50,
            collector_switch_ms: 300,
            timeout_ms: 3_000,
            request_timeout_ms: 500,
        },
        ..ClientConfig::default()
    }
}

/// Zero-account response body.
pub fn zero_account_body(
    stability: &str,
    fee_usd: &str,
    toll_usd: &str,
    tax_percent: Value,
) -> Value {
    json!({
        "account": {
            "id": ZERO_ACCOUNT_ID,
            "current": {
                "stabilityFactorStr": stability,
                "transactionFeeUsdStr": fee_usd,
                "minTollUsdStr": toll_usd,
                "tollNetworkTaxPercent": tax_percent
            }
        }
    })
}

/// Serve `/network.json` listing `gateway_url` as the only gateway.
pub async fn mock_topology<'a>(server: &'a MockServer, gateway_url: &str) -> Mock<'a> {
    let body = json!({ "gateways": [{ "ip": "127.0.0.1", "web": gateway_url }] });
    server
        .mock_async(|when, then| {
            when.method(GET).path("/network.json");
            then.status(200).json_body(body);
        })
        .await
}

/// Serve the zero-account with the given body.
pub async fn mock_zero_account<'a>(server: &'a MockServer, body: Value) -> Mock<'a> {
    let path = format!("/account/{}", ZERO_ACCOUNT_ID);
    server
        .mock_async(|when, then| {
            when.method(GET).path(path);
            then.status(200).json_body(body);
        })
        .await
}
