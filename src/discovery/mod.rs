//! Network discovery subsystem.
//!
//! # Data Flow
//! ```text
//! LEDGER_BASE_URL / discovery.base_url
//!     → network.rs (resolve base URL)
//!     → fetch.rs (GET {base}/network.json, redirects + deadline)
//!     → topology.rs (first gateway's `web` URL)
//!     → fetch.rs (GET {gateway}/account/{zero id})
//!     → parameters.rs (decode constants)
//!     → NetworkParameters (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Run once per process; the result is passed by reference, never cached globally
//! - No fallback values: every failure surfaces to the caller

pub mod fetch;
pub mod network;
pub mod parameters;
pub mod topology;
pub mod types;

pub use network::{resolve_base_url, NetworkDiscovery};
pub use types::{DiscoveryError, DiscoveryResult, NetworkError, NetworkParameters};
