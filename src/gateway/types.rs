//! Gateway submission types and error definitions.

use alloy::primitives::B256;
use serde_json::Value;
use thiserror::Error;

use crate::discovery::types::NetworkError;
use crate::gateway::response::extract_tx_id;

/// Errors from submitting a signed transaction.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The gateway answered with a non-success status.
    #[error("Gateway returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The gateway accepted the request but rejected the transaction.
    #[error("Transaction rejected: {0}")]
    Application(String),

    /// Timeout or transport failure.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The HTTP client could not be constructed.
    #[error("Client setup failed: {0}")]
    Setup(String),
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, SubmissionError>;

/// Normalized inject response.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    /// Parsed body as received.
    pub raw: Value,
}

impl SubmissionResult {
    /// The `result` object when present, else the whole body.
    pub fn result(&self) -> &Value {
        match self.raw.get("result") {
            Some(result) if result.is_object() => result,
            _ => &self.raw,
        }
    }

    /// Gateway-assigned transaction id.
    pub fn tx_id(&self) -> Option<String> {
        extract_tx_id(&self.raw)
    }

    /// Gateway id, or the hex signing hash when the gateway assigned none.
    pub fn tx_id_or(&self, hash: &B256) -> String {
        self.tx_id().unwrap_or_else(|| alloy::hex::encode(hash))
    }
}
