//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap network futures with a hard deadline
//! - Keep timeout errors distinct from other failures
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - The deadline covers the whole exchange (connect, redirects, body read)

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::discovery::types::NetworkError;

/// Run `fut` under `limit`, mapping expiry to [`NetworkError::Timeout`].
pub async fn with_deadline<T, F>(limit: Duration, fut: F) -> Result<T, NetworkError>
where
    F: Future<Output = Result<T, NetworkError>>,
{
    match timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(NetworkError::Timeout(limit.as_millis() as u64)),
    }
}
