//! Ledger address formatting.
//!
//! Ledger addresses are 64 lower-case hex characters. Accounts backed by a
//! secp256k1 key use their 20-byte Ethereum-style address, hex encoded
//! without prefix, right-padded with zeros.

use alloy::primitives::Address;

use crate::transaction::types::TransactionError;

/// Width of a ledger address in hex characters.
pub const LEDGER_ADDRESS_LEN: usize = 64;

/// Format a key-derived address in the ledger's fixed-width scheme.
pub fn to_ledger_address(address: Address) -> String {
    let hex = alloy::hex::encode(address.as_slice());
    format!("{:0<width$}", hex, width = LEDGER_ADDRESS_LEN)
}

/// Normalize a user-supplied address.
///
/// Accepts either a 40-character Ethereum-style address (with or without
/// `0x`) or a full 64-character ledger address, in any case.
pub fn normalize_address(input: &str) -> Result<String, TransactionError> {
    let trimmed = input.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
        .to_ascii_lowercase();

    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TransactionError::InvalidAddress(input.to_string()));
    }

    match hex.len() {
        40 => Ok(format!("{:0<width$}", hex, width = LEDGER_ADDRESS_LEN)),
        LEDGER_ADDRESS_LEN => Ok(hex),
        _ => Err(TransactionError::InvalidAddress(input.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_ledger_address() {
        let addr: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();
        assert_eq!(
            to_ledger_address(addr),
            "f39fd6e51aad88f6f4ce6ab8827279cfffb92266000000000000000000000000"
        );
    }

    #[test]
    fn test_normalize_short_form() {
        let normalized = normalize_address("0xF39FD6E51AAD88F6F4CE6AB8827279CFFFB92266").unwrap();
        assert_eq!(normalized.len(), LEDGER_ADDRESS_LEN);
        assert!(normalized.starts_with("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"));
        assert!(normalized.ends_with(&"0".repeat(24)));
    }

    #[test]
    fn test_normalize_full_form() {
        let full = "ab".repeat(32);
        assert_eq!(normalize_address(&full.to_uppercase()).unwrap(), full);
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_address("").is_err());
        assert!(normalize_address("0x1234").is_err());
        assert!(normalize_address(&"g".repeat(40)).is_err());
    }
}
