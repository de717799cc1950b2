//! Metrics collection.
//!
//! # Metrics
//! - `ledger_client_discovery_total` (counter): discovery runs by outcome
//! - `ledger_client_submissions_total` (counter): inject POSTs by outcome
//! - `ledger_client_polls_total` (counter): poll requests by endpoint, outcome
//! - `ledger_client_confirmation_seconds` (histogram): wait duration by result
//!
//! # Design Decisions
//! - Uses the `metrics` facade; the embedding process installs a recorder
//! - Without a recorder every call is a no-op

use std::time::Duration;

pub fn record_discovery(outcome: &'static str) {
    metrics::counter!("ledger_client_discovery_total", "outcome" => outcome).increment(1);
}

pub fn record_submission(outcome: &'static str) {
    metrics::counter!("ledger_client_submissions_total", "outcome" => outcome).increment(1);
}

pub fn record_poll(endpoint: &'static str, outcome: &'static str) {
    metrics::counter!(
        "ledger_client_polls_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_confirmation(result: &'static str, elapsed: Duration) {
    metrics::histogram!("ledger_client_confirmation_seconds", "result" => result)
        .record(elapsed.as_secs_f64());
}
