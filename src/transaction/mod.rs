//! Transaction construction and encoding.
//!
//! # Data Flow
//! ```text
//! raw inputs (from, amount "1.5", network id)
//!     → amount.rs (decimal → 18-decimal minor units)
//!     → builder.rs (single-use builder → UnsignedTransaction)
//!     → codec.rs (sorted-key JSON → keccak256 signing hash)
//!     → signer (attaches {owner, sig} → SignedTransaction)
//! ```

pub mod address;
pub mod amount;
pub mod builder;
pub mod codec;
pub mod types;

pub use amount::{from_minor_units, to_minor_units, AmountInput, DEFAULT_DECIMALS};
pub use builder::TransactionBuilder;
pub use types::{
    AmountError, Sign, SignedTransaction, TransactionError, TxType, UnsignedTransaction,
};
