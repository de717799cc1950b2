//! Ledger gateway client library.
//!
//! Discovers the active gateway and network constants, builds and signs
//! transactions, submits them, and waits for confirmation.
//!
//! ```text
//! NetworkDiscovery::discover()           → NetworkParameters (once per process)
//! Wallet::create_account_tx / transfer_tx → UnsignedTransaction
//! Wallet::sign                            → (SignedTransaction, hash)
//! GatewayClient::submit                   → SubmissionResult (tx id)
//! ConfirmationPoller::wait                → PollResult
//! ```

pub mod config;
pub mod discovery;
pub mod gateway;
pub mod observability;
pub mod poller;
pub mod resilience;
pub mod signer;
pub mod transaction;

pub use config::ClientConfig;
pub use discovery::{NetworkDiscovery, NetworkParameters};
pub use gateway::GatewayClient;
pub use poller::{ConfirmationPoller, PollResult};
pub use signer::Wallet;
