//! Transaction types and error definitions.

use alloy::primitives::U256;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors from amount conversion.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmountError {
    /// Not a plain non-negative decimal.
    #[error("Invalid decimal amount '{0}'")]
    Invalid(String),

    /// Does not fit in 256 bits once scaled.
    #[error("Amount '{0}' overflows 256 bits")]
    Overflow(String),
}

/// Errors from building a transaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Missing transaction field: {0}")]
    MissingField(&'static str),

    #[error("Invalid ledger address '{0}'")]
    InvalidAddress(String),

    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Transaction kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    /// Account funding / initialization.
    Create,
    /// Native asset transfer to a recipient.
    Transfer,
}

/// Signature block attached to a signed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sign {
    /// Ledger address derived from the signing key.
    pub owner: String,
    /// `0x`-prefixed hex of the 65-byte `r‖s‖v` signature.
    pub sig: String,
}

/// A transaction ready to be hashed and signed.
///
/// Fields are private; construct via
/// [`TransactionBuilder`](crate::transaction::builder::TransactionBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsignedTransaction {
    #[serde(rename = "type")]
    pub(crate) tx_type: TxType,
    pub(crate) from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) to: Option<String>,
    #[serde(serialize_with = "serialize_decimal")]
    pub(crate) amount: U256,
    pub(crate) timestamp: u64,
    #[serde(rename = "networkId")]
    pub(crate) network_id: String,
}

impl UnsignedTransaction {
    pub fn tx_type(&self) -> TxType {
        self.tx_type
    }

    /// Sender ledger address (`from`).
    pub fn sender(&self) -> &str {
        &self.from
    }

    /// Recipient ledger address (`to`), transfers only.
    pub fn recipient(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn network_id(&self) -> &str {
        &self.network_id
    }
}

/// A signed transaction. Immutable: there is no way back to a mutable payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub(crate) payload: UnsignedTransaction,
    pub(crate) sign: Sign,
}

impl SignedTransaction {
    pub fn payload(&self) -> &UnsignedTransaction {
        &self.payload
    }

    pub fn sign(&self) -> &Sign {
        &self.sign
    }
}

fn serialize_decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}
