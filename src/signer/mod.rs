//! Signing subsystem.
//!
//! # Data Flow
//! ```text
//! Private key (argument or environment variable)
//!     → wallet.rs (key loading, ledger address derivation)
//!     → transaction::codec (signing hash over the payload without `sign`)
//!     → wallet.rs (secp256k1 signature → SignedTransaction)
//! ```
//!
//! # Security Constraints
//! - Never log private keys
//! - `owner` is derived from the key, never taken from the caller

pub mod types;
pub mod wallet;

pub use types::{SignerError, SignerResult};
pub use wallet::{recover_owner, Wallet, PRIVATE_KEY_ENV_VAR};
