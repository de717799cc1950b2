//! Single-use transaction builder.
//!
//! `build` consumes the builder and yields an [`UnsignedTransaction`] whose
//! fields can no longer change. Signing then consumes that value.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::U256;

use crate::transaction::address::normalize_address;
use crate::transaction::types::{TransactionError, TxType, UnsignedTransaction};

#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    tx_type: TxType,
    from: Option<String>,
    to: Option<String>,
    amount: U256,
    timestamp: Option<u64>,
    network_id: Option<String>,
}

impl TransactionBuilder {
    fn new(tx_type: TxType, to: Option<String>) -> Self {
        Self {
            tx_type,
            from: None,
            to,
            amount: U256::ZERO,
            timestamp: None,
            network_id: None,
        }
    }

    /// Account funding / initialization.
    pub fn create() -> Self {
        Self::new(TxType::Create, None)
    }

    /// Transfer to `to`.
    pub fn transfer(to: impl Into<String>) -> Self {
        Self::new(TxType::Transfer, Some(to.into()))
    }

    pub fn from_address(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Amount in minor units.
    pub fn amount(mut self, amount: U256) -> Self {
        self.amount = amount;
        self
    }

    /// Milliseconds since the Unix epoch. Defaults to now.
    pub fn timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp = Some(timestamp_ms);
        self
    }

    pub fn network_id(mut self, network_id: impl Into<String>) -> Self {
        self.network_id = Some(network_id.into());
        self
    }

    pub fn build(self) -> Result<UnsignedTransaction, TransactionError> {
        let from = self.from.ok_or(TransactionError::MissingField("from"))?;
        let from = normalize_address(&from)?;

        let to = match (self.tx_type, self.to) {
            (TxType::Transfer, Some(to)) => Some(normalize_address(&to)?),
            (TxType::Transfer, None) => return Err(TransactionError::MissingField("to")),
            (TxType::Create, _) => None,
        };

        let network_id = self
            .network_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(TransactionError::MissingField("networkId"))?;

        Ok(UnsignedTransaction {
            tx_type: self.tx_type,
            from,
            to,
            amount: self.amount,
            timestamp: self.timestamp.unwrap_or_else(now_ms),
            network_id,
        })
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
