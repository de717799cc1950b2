//! Confirmation polling subsystem.
//!
//! # Data Flow
//! ```text
//! tx id (gateway-assigned or signing hash)
//!     → confirmation.rs (poll loop with overall deadline)
//!         elapsed <= collector_switch → GET {base}/transaction/{id}
//!         elapsed >  collector_switch → GET {base}/collector/api/transaction?appReceiptId={id}
//!     → gateway::response (locate receipt payload)
//!     → PollResult (Success | Failed | Timeout)
//! ```

pub mod confirmation;
pub mod types;

pub use confirmation::ConfirmationPoller;
pub use types::{PollEndpoint, PollError, PollResult};
