//! Confirmation polling.
//!
//! # States
//! ```text
//! Polling ──success: true──▶ Success
//!    │    ──success: false─▶ Failed
//!    │    ──deadline───────▶ Timeout
//!    └── error / no payload: sleep, poll again
//! ```
//!
//! Polls are strictly sequential. The endpoint of each poll depends only on
//! the time elapsed since the wait started.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tokio::time::{sleep, timeout, Instant};
use url::Url;

use crate::config::PollerConfig;
use crate::gateway::response::{locate_receipt, receipt_status, ReceiptStatus};
use crate::observability::metrics;
use crate::poller::types::{PollEndpoint, PollError, PollResult};

/// Outcome of a single poll.
#[derive(Debug)]
enum Attempt {
    Terminal(PollResult),
    Pending,
    Error(String),
}

/// Polls the ledger until a transaction reaches a terminal state.
#[derive(Debug, Clone)]
pub struct ConfirmationPoller {
    client: Client,
    poll_interval: Duration,
    collector_switch: Duration,
    timeout: Duration,
    request_timeout: Duration,
}

impl ConfirmationPoller {
    pub fn new(config: &PollerConfig) -> Result<Self, PollError> {
        let client = Client::builder()
            .build()
            .map_err(|e| PollError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            collector_switch: Duration::from_millis(config.collector_switch_ms),
            timeout: Duration::from_millis(config.timeout_ms),
            request_timeout: Duration::from_millis(config.request_timeout_ms),
        })
    }

    /// Wait for `tx_id` to reach a terminal state. Never fails; transient
    /// errors are retried until the deadline.
    pub async fn wait(&self, base_url: &str, tx_id: &str) -> PollResult {
        let start = Instant::now();
        let mut attempt = 0u32;

        tracing::info!(
            tx_id = %tx_id,
            timeout_ms = self.timeout.as_millis() as u64,
            "Waiting for confirmation"
        );

        let result = loop {
            let elapsed = start.elapsed();
            if elapsed >= self.timeout {
                break PollResult::Timeout;
            }
            attempt += 1;

            let endpoint = PollEndpoint::select(elapsed, self.collector_switch);
            let limit = self.request_timeout.min(self.timeout - elapsed);
            let attempt_result = match endpoint.url(base_url, tx_id) {
                Ok(url) => self.poll_once(url, limit).await,
                Err(e) => Attempt::Error(e.to_string()),
            };

            match attempt_result {
                Attempt::Terminal(result) => {
                    metrics::record_poll(endpoint.label(), result.label());
                    break result;
                }
                Attempt::Pending => {
                    metrics::record_poll(endpoint.label(), "pending");
                    tracing::debug!(
                        tx_id = %tx_id,
                        endpoint = endpoint.label(),
                        attempt,
                        "Transaction pending"
                    );
                }
                Attempt::Error(reason) => {
                    metrics::record_poll(endpoint.label(), "error");
                    tracing::debug!(
                        tx_id = %tx_id,
                        endpoint = endpoint.label(),
                        attempt,
                        error = %reason,
                        "Poll failed, retrying"
                    );
                }
            }

            let remaining = self.timeout.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                break PollResult::Timeout;
            }
            sleep(self.poll_interval.min(remaining)).await;
        };

        let elapsed = start.elapsed();
        metrics::record_confirmation(result.label(), elapsed);
        match &result {
            PollResult::Success { .. } => {
                tracing::info!(
                    tx_id = %tx_id,
                    attempts = attempt,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Transaction confirmed"
                );
            }
            PollResult::Failed { reason } => {
                tracing::warn!(tx_id = %tx_id, reason = %reason, "Transaction failed");
            }
            PollResult::Timeout => {
                tracing::warn!(tx_id = %tx_id, attempts = attempt, "Confirmation timed out");
            }
        }
        result
    }

    /// [`wait`](Self::wait), with `Failed` and `Timeout` turned into errors.
    pub async fn wait_for_receipt(&self, base_url: &str, tx_id: &str) -> Result<Value, PollError> {
        match self.wait(base_url, tx_id).await {
            PollResult::Success { receipt } => Ok(receipt),
            PollResult::Failed { reason } => Err(PollError::Failed(reason)),
            PollResult::Timeout => Err(PollError::Timeout(self.timeout)),
        }
    }

    async fn poll_once(&self, url: Url, limit: Duration) -> Attempt {
        let request = async {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };

        let (status, text) = match timeout(limit, request).await {
            Ok(Ok(exchange)) => exchange,
            Ok(Err(e)) => return Attempt::Error(e.to_string()),
            Err(_) => {
                return Attempt::Error(format!("request timed out after {} ms", limit.as_millis()));
            }
        };

        if !status.is_success() {
            return Attempt::Error(format!("HTTP {}", status.as_u16()));
        }

        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(e) => return Attempt::Error(format!("unparsable body: {}", e)),
        };

        let Some(payload) = locate_receipt(&body) else {
            return Attempt::Pending;
        };

        match receipt_status(payload) {
            ReceiptStatus::Succeeded => Attempt::Terminal(PollResult::Success {
                receipt: payload.clone(),
            }),
            ReceiptStatus::Failed(reason) => Attempt::Terminal(PollResult::Failed { reason }),
            ReceiptStatus::Pending => Attempt::Pending,
        }
    }
}
