//! Network topology document parsing.
//!
//! The topology source is treated strictly as data. Two encodings are
//! accepted:
//!
//! ```text
//! {"gateways": [{"web": "https://gw1.example.org"}, ...]}
//! const network = {"gateways": [{"web": "https://gw1.example.org"}]};
//! ```
//!
//! For the second form the source is scanned for the first `{` that opens a
//! complete JSON object, preferring one with a `gateways` key. Text after that
//! object is ignored. Nothing is ever evaluated.

use serde::Deserialize;
use serde_json::{Deserializer, Value};

use crate::discovery::types::{DiscoveryError, DiscoveryResult};

#[derive(Debug, Deserialize)]
struct Topology {
    gateways: Option<Vec<GatewayEntry>>,
}

#[derive(Debug, Deserialize)]
struct GatewayEntry {
    web: Option<String>,
}

/// Extract the first gateway's externally reachable URL.
pub fn parse_gateway_url(source: &str) -> DiscoveryResult<String> {
    let document = find_document(source).ok_or_else(|| {
        DiscoveryError::ConfigParse("no JSON object found in network config".to_string())
    })?;

    let topology: Topology = serde_json::from_value(document)
        .map_err(|e| DiscoveryError::ConfigParse(format!("malformed network config: {}", e)))?;

    let gateways = topology
        .gateways
        .ok_or_else(|| DiscoveryError::ConfigParse("missing 'gateways' list".to_string()))?;

    let first = gateways
        .into_iter()
        .next()
        .ok_or_else(|| DiscoveryError::ConfigParse("'gateways' list is empty".to_string()))?;

    let web = first
        .web
        .map(|w| w.trim().trim_end_matches('/').to_string())
        .filter(|w| !w.is_empty())
        .ok_or_else(|| DiscoveryError::ConfigParse("first gateway has no 'web' URL".to_string()))?;

    Ok(web)
}

/// First JSON object in `source` carrying a `gateways` key, else the first
/// JSON object at all.
fn find_document(source: &str) -> Option<Value> {
    let mut fallback = None;
    for (start, _) in source.match_indices('{') {
        let mut stream = Deserializer::from_str(&source[start..]).into_iter::<Value>();
        let Some(Ok(value)) = stream.next() else {
            continue;
        };
        if value.get("gateways").is_some() {
            return Some(value);
        }
        if fallback.is_none() && value.is_object() {
            fallback = Some(value);
        }
    }
    fallback
}
