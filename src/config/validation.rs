//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, switch before deadline)
//! - Validate the base URL when one is configured
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::ClientConfig;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "poller.timeout_ms").
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(base_url) = &config.discovery.base_url {
        match url::Url::parse(base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::new(
                "discovery.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(
                "discovery.base_url",
                format!("invalid URL: {}", e),
            )),
        }
    }

    if config.discovery.network_config_path.trim().is_empty() {
        errors.push(ValidationError::new(
            "discovery.network_config_path",
            "must not be empty",
        ));
    }

    if config.discovery.fetch_timeout_ms == 0 {
        errors.push(ValidationError::new(
            "discovery.fetch_timeout_ms",
            "must be greater than zero",
        ));
    }

    if config.gateway.request_timeout_ms == 0 {
        errors.push(ValidationError::new(
            "gateway.request_timeout_ms",
            "must be greater than zero",
        ));
    }

    let poller = &config.poller;
    if poller.poll_interval_ms == 0 {
        errors.push(ValidationError::new(
            "poller.poll_interval_ms",
            "must be greater than zero",
        ));
    }
    if poller.timeout_ms == 0 {
        errors.push(ValidationError::new(
            "poller.timeout_ms",
            "must be greater than zero",
        ));
    }
    if poller.request_timeout_ms == 0 {
        errors.push(ValidationError::new(
            "poller.request_timeout_ms",
            "must be greater than zero",
        ));
    }
    if poller.collector_switch_ms >= poller.timeout_ms {
        // The collector would never be consulted.
        tracing::warn!(
            collector_switch_ms = poller.collector_switch_ms,
            timeout_ms = poller.timeout_ms,
            "Collector switch is at or beyond the poll deadline"
        );
    }

    if config.signer.private_key_env.trim().is_empty() {
        errors.push(ValidationError::new(
            "signer.private_key_env",
            "must not be empty",
        ));
    }

    if !matches!(
        config.observability.log_format.to_lowercase().as_str(),
        "pretty" | "json"
    ) {
        errors.push(ValidationError::new(
            "observability.log_format",
            format!("expected 'pretty' or 'json', got '{}'", config.observability.log_format),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
