//! Canonical encoding and hashing.
//!
//! The canonical form is compact JSON with object keys sorted at every
//! level. It does not depend on struct field order, map insertion order, or
//! on which serde_json map backend is compiled in.

use std::fmt::Write;

use alloy::primitives::{keccak256, B256};
use serde_json::Value;

use crate::transaction::types::{SignedTransaction, UnsignedTransaction};

/// Key that carries the signature and is excluded from the signing hash.
pub const SIGN_FIELD: &str = "sign";

/// Canonical encoding of an unsigned transaction.
pub fn canonicalize(tx: &UnsignedTransaction) -> String {
    canonical_json(&to_value(tx))
}

/// Canonical encoding of a signed transaction, `sign` included.
pub fn canonicalize_signed(tx: &SignedTransaction) -> String {
    canonical_json(&to_value(tx))
}

/// Signing hash of an unsigned transaction.
pub fn hash(tx: &UnsignedTransaction) -> B256 {
    keccak256(canonicalize(tx).as_bytes())
}

/// Signing hash of any JSON transaction object; a top-level `sign` is ignored.
pub fn hash_value(value: &Value) -> B256 {
    let stripped = match value {
        Value::Object(map) if map.contains_key(SIGN_FIELD) => {
            let mut map = map.clone();
            map.remove(SIGN_FIELD);
            Value::Object(map)
        }
        other => other.clone(),
    };
    keccak256(canonical_json(&stripped).as_bytes())
}

/// Serialize any JSON value with sorted object keys and no whitespace.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => {
            let _ = write!(out, "{}", n);
        }
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
    }
}

fn write_string(s: &str, out: &mut String) {
    // serde_json's string escaping is deterministic.
    match serde_json::to_string(s) {
        Ok(escaped) => out.push_str(&escaped),
        Err(_) => out.push_str("\"\""),
    }
}

fn to_value<T: serde::Serialize>(tx: &T) -> Value {
    // Transaction types only contain strings, integers and an enum tag.
    serde_json::to_value(tx).unwrap_or(Value::Null)
}
