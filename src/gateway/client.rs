//! Gateway HTTP client.
//!
//! # Responsibilities
//! - POST signed transactions to `{gateway}/inject`
//! - Normalize the response into success or a typed rejection
//! - One attempt per call; retry policy belongs to the caller

use std::time::Duration;

use reqwest::Client;
use serde_json::json;

use crate::config::GatewayConfig;
use crate::discovery::types::{NetworkError, NetworkParameters};
use crate::gateway::response::{error_reason, parse_body, rejection_reason};
use crate::gateway::types::{GatewayResult, SubmissionError, SubmissionResult};
use crate::observability::metrics;
use crate::resilience::timeouts::with_deadline;
use crate::transaction::codec::canonicalize_signed;
use crate::transaction::types::SignedTransaction;

/// Client for the gateway's transaction injection endpoint.
#[derive(Clone)]
pub struct GatewayClient {
    client: Client,
    gateway_url: String,
    request_timeout: Duration,
}

impl GatewayClient {
    pub fn new(gateway_url: impl Into<String>, config: &GatewayConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| SubmissionError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            gateway_url: gateway_url.into().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_millis(config.request_timeout_ms),
        })
    }

    /// Client for the gateway discovered in `params`.
    pub fn from_parameters(
        params: &NetworkParameters,
        config: &GatewayConfig,
    ) -> GatewayResult<Self> {
        Self::new(params.gateway_url(), config)
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    /// Submit a signed transaction.
    pub async fn submit(&self, tx: &SignedTransaction) -> GatewayResult<SubmissionResult> {
        let url = format!("{}/inject", self.gateway_url);
        let envelope = json!({ "tx": canonicalize_signed(tx) });

        tracing::debug!(url = %url, tx_type = ?tx.payload().tx_type(), "Submitting transaction");

        let exchange = async {
            let response = self
                .client
                .post(&url)
                .json(&envelope)
                .send()
                .await
                .map_err(|e| NetworkError::Transport(e.to_string()))?;
            let status = response.status().as_u16();
            let text = response
                .text()
                .await
                .map_err(|e| NetworkError::Transport(format!("Failed to read body: {}", e)))?;
            Ok::<_, NetworkError>((status, text))
        };

        let (status, text) = match with_deadline(self.request_timeout, exchange).await {
            Ok(exchange) => exchange,
            Err(e) => {
                metrics::record_submission("network_error");
                tracing::warn!(url = %url, error = %e, "Submission failed");
                return Err(e.into());
            }
        };

        let result = interpret_response(status, &text);
        match &result {
            Ok(res) => {
                metrics::record_submission("accepted");
                tracing::info!(tx_id = ?res.tx_id(), "Transaction accepted by gateway");
            }
            Err(SubmissionError::Http { status, .. }) => {
                metrics::record_submission("http_error");
                tracing::warn!(status = *status, "Gateway returned error status");
            }
            Err(e) => {
                metrics::record_submission("rejected");
                tracing::warn!(error = %e, "Transaction rejected by gateway");
            }
        }
        result
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("gateway_url", &self.gateway_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Map an inject response to a result, checking status, then `error`, then
/// `success: false`.
pub fn interpret_response(status: u16, text: &str) -> GatewayResult<SubmissionResult> {
    if !(200..300).contains(&status) {
        return Err(SubmissionError::Http {
            status,
            body: text.to_string(),
        });
    }

    let body = parse_body(text);

    if let Some(reason) = error_reason(&body) {
        return Err(SubmissionError::Application(reason));
    }
    if let Some(reason) = rejection_reason(&body) {
        return Err(SubmissionError::Application(reason));
    }

    Ok(SubmissionResult { raw: body })
}
