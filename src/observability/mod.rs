//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! discovery / gateway / poller produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stderr (pretty or JSON lines)
//!     → whatever metrics recorder the host process installs
//! ```

pub mod logging;
pub mod metrics;
