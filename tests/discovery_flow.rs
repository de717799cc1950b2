//! Discovery against a mocked application server and gateway.

use httpmock::prelude::*;
use serde_json::json;

use ledger_client::discovery::{DiscoveryError, NetworkDiscovery, NetworkError};

mod common;

#[tokio::test]
async fn test_discover_derives_parameters() {
    let server = MockServer::start_async().await;
    let gateway = MockServer::start_async().await;

    let topology = common::mock_topology(&server, &gateway.base_url()).await;
    let account = common::mock_zero_account(
        &gateway,
        common::zero_account_body("2.0", "0.2", "1.0", json!(1)),
    )
    .await;

    let config = common::test_config(&server.base_url());
    let discovery = NetworkDiscovery::new(config.discovery).unwrap();
    let params = discovery.discover().await.expect("discovery should succeed");

    assert_eq!(params.base_url(), server.base_url());
    assert_eq!(params.gateway_url(), gateway.base_url());
    assert!((params.network_fee_asset() - 0.1).abs() < 1e-12);
    assert!((params.default_toll_asset() - 0.5).abs() < 1e-12);
    assert!((params.network_toll_tax_rate() - 0.01).abs() < 1e-12);
    assert_eq!(params.network_fee_usd(), 0.2);
    assert_eq!(params.default_toll_usd(), 1.0);

    topology.assert_async().await;
    account.assert_async().await;
}

#[tokio::test]
async fn test_topology_behind_redirect() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/network.json");
            then.status(302).header("Location", "/static/network.json");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/static/network.json");
            then.status(200)
                .body(r#"const network = {"gateways": [{"web": "http://gw.example.org:3030/"}]};"#);
        })
        .await;

    let config = common::test_config(&server.base_url());
    let discovery = NetworkDiscovery::new(config.discovery).unwrap();
    let gateway_url = discovery.extract_gateway_url(&server.base_url()).await.unwrap();
    assert_eq!(gateway_url, "http://gw.example.org:3030");
}

#[tokio::test]
async fn test_malformed_topology() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/network.json");
            then.status(200).json_body(json!({ "nodes": [] }));
        })
        .await;

    let config = common::test_config(&server.base_url());
    let discovery = NetworkDiscovery::new(config.discovery).unwrap();
    let err = discovery.discover().await.unwrap_err();
    assert!(matches!(err, DiscoveryError::ConfigParse(_)));
}

#[tokio::test]
async fn test_missing_topology_is_http_error() {
    let server = MockServer::start_async().await;

    let config = common::test_config(&server.base_url());
    let discovery = NetworkDiscovery::new(config.discovery).unwrap();
    let err = discovery.extract_gateway_url(&server.base_url()).await.unwrap_err();
    assert!(matches!(
        err,
        DiscoveryError::Network(NetworkError::Http { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_zero_stability_factor_rejected() {
    let gateway = MockServer::start_async().await;
    let body = common::zero_account_body("0", "0.2", "1.0", json!(1));
    common::mock_zero_account(&gateway, body).await;

    let config = common::test_config("http://app.example.org");
    let discovery = NetworkDiscovery::new(config.discovery).unwrap();
    let err = discovery
        .fetch_network_parameters("http://app.example.org", &gateway.base_url())
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::InvalidNetworkParameters(_)));
}

#[tokio::test]
async fn test_zero_fee_is_not_derivable() {
    let gateway = MockServer::start_async().await;
    let body = common::zero_account_body("2.0", "0", "1.0", json!("1"));
    common::mock_zero_account(&gateway, body).await;

    let config = common::test_config("http://app.example.org");
    let discovery = NetworkDiscovery::new(config.discovery).unwrap();
    let err = discovery
        .fetch_network_parameters("http://app.example.org", &gateway.base_url())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DiscoveryError::InvalidNetworkParameters(ref m) if m.contains("network fee")
    ));
}
