//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to gateway / base URL:
//!     → timeouts.rs (enforce a hard deadline per request)
//!     → discovery and submission: failure surfaces to the caller
//!     → polling: failure is absorbed and retried until the poll deadline
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No automatic retries for discovery or submission (fail fast)

pub mod timeouts;
