//! Tolerant decoding of gateway and collector responses.
//!
//! The same logical fields show up at different nesting levels depending on
//! the endpoint. Every lookup here walks a fixed, ordered list of candidate
//! shapes and takes the first match.
//!
//! | Field          | Candidates (in order)                                     |
//! |----------------|-----------------------------------------------------------|
//! | tx id          | `txId`, `txid`, `result.txId`, `result.txid`              |
//! | receipt        | `transaction`, `result`, `transactions[0]`                |
//! | error reason   | `error.reason`, `error.message`, `error` (string)         |
//! | rejection      | `result.success == false`, `success == false`             |

use serde_json::Value;

/// Where a payload may live in a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// Object under a top-level key.
    Key(&'static str),
    /// First element of an array under a top-level key.
    FirstOf(&'static str),
}

pub const TX_ID_PATHS: &[&[&str]] = &[
    &["txId"],
    &["txid"],
    &["result", "txId"],
    &["result", "txid"],
];

pub const RECEIPT_SHAPES: &[PayloadShape] = &[
    PayloadShape::Key("transaction"),
    PayloadShape::Key("result"),
    PayloadShape::FirstOf("transactions"),
];

pub const DEFAULT_REJECTION_REASON: &str = "transaction rejected";
pub const DEFAULT_FAILURE_REASON: &str = "transaction failed";

/// Outcome carried by a receipt payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptStatus {
    Succeeded,
    Failed(String),
    /// No boolean `success` yet.
    Pending,
}

/// Parse a response body; empty bodies become `Null`, non-JSON bodies a string.
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Gateway transaction id, if any candidate carries one.
pub fn extract_tx_id(body: &Value) -> Option<String> {
    TX_ID_PATHS.iter().find_map(|path| {
        let value = path.iter().try_fold(body, |v, key| v.get(*key))?;
        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    })
}

/// Explicit error object in a response body.
pub fn error_reason(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => Some(
            ["reason", "message"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str))
                .map(str::to_owned)
                .unwrap_or_else(|| Value::Object(map.clone()).to_string()),
        ),
        other => Some(other.to_string()),
    }
}

/// Reason for an explicit `success: false`, checked on `result` then top level.
pub fn rejection_reason(body: &Value) -> Option<String> {
    [body.get("result"), Some(body)]
        .into_iter()
        .flatten()
        .find(|v| v.get("success").and_then(Value::as_bool) == Some(false))
        .map(|v| reason_or(v, DEFAULT_REJECTION_REASON))
}

/// First non-empty receipt payload.
pub fn locate_receipt(body: &Value) -> Option<&Value> {
    RECEIPT_SHAPES.iter().find_map(|shape| {
        let candidate = match shape {
            PayloadShape::Key(key) => body.get(*key),
            PayloadShape::FirstOf(key) => body.get(*key).and_then(|v| v.get(0)),
        }?;
        match candidate {
            Value::Object(map) if !map.is_empty() => Some(candidate),
            _ => None,
        }
    })
}

/// Interpret a located receipt payload.
pub fn receipt_status(payload: &Value) -> ReceiptStatus {
    match payload.get("success").and_then(Value::as_bool) {
        Some(true) => ReceiptStatus::Succeeded,
        Some(false) => ReceiptStatus::Failed(reason_or(payload, DEFAULT_FAILURE_REASON)),
        None => ReceiptStatus::Pending,
    }
}

fn reason_or(v: &Value, default: &str) -> String {
    v.get("reason")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}
