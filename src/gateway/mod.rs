//! Gateway submission subsystem.
//!
//! # Data Flow
//! ```text
//! SignedTransaction
//!     → transaction::codec (canonical JSON, `sign` included)
//!     → client.rs (POST {gateway}/inject with {"tx": "<json>"})
//!     → response.rs (status → error object → success flag)
//!     → SubmissionResult (tx id lookup over known shapes)
//! ```

pub mod client;
pub mod response;
pub mod types;

pub use client::GatewayClient;
pub use response::extract_tx_id;
pub use types::{GatewayResult, SubmissionError, SubmissionResult};
