//! Confirmation polling types.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::discovery::types::NetworkError;

/// Terminal outcome of a confirmation wait.
#[derive(Debug, Clone, PartialEq)]
pub enum PollResult {
    /// The ledger reports the transaction as applied.
    Success { receipt: Value },
    /// The ledger reports the transaction as failed.
    Failed { reason: String },
    /// No terminal state before the deadline.
    Timeout,
}

impl PollResult {
    pub fn label(&self) -> &'static str {
        match self {
            PollResult::Success { .. } => "success",
            PollResult::Failed { .. } => "failed",
            PollResult::Timeout => "timeout",
        }
    }
}

/// Error form of the non-success outcomes, for `?`-style callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("Transaction failed: {0}")]
    Failed(String),

    #[error("Transaction not confirmed within {} ms", .0.as_millis())]
    Timeout(Duration),

    /// The HTTP client could not be constructed.
    #[error("Poller setup failed: {0}")]
    Setup(String),
}

/// Which store a poll is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEndpoint {
    /// Recent-transaction store: `GET {base}/transaction/{id}`.
    Primary,
    /// Durable collector: `GET {base}/collector/api/transaction?appReceiptId={id}`.
    Collector,
}

impl PollEndpoint {
    /// Endpoint for a poll issued `elapsed` after the wait started.
    pub fn select(elapsed: Duration, collector_switch: Duration) -> Self {
        if elapsed <= collector_switch {
            PollEndpoint::Primary
        } else {
            PollEndpoint::Collector
        }
    }

    /// Poll URL for `tx_id`. The id is percent-encoded as a path segment or
    /// query value.
    pub fn url(&self, base_url: &str, tx_id: &str) -> Result<Url, NetworkError> {
        let invalid = |reason: String| NetworkError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };
        let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| invalid("cannot be a base URL".to_string()))?;
            segments.pop_if_empty();
            match self {
                PollEndpoint::Primary => {
                    segments.push("transaction").push(tx_id);
                }
                PollEndpoint::Collector => {
                    segments.extend(["collector", "api", "transaction"]);
                }
            }
        }
        if *self == PollEndpoint::Collector {
            url.query_pairs_mut().append_pair("appReceiptId", tx_id);
        }
        Ok(url)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PollEndpoint::Primary => "primary",
            PollEndpoint::Collector => "collector",
        }
    }
}
