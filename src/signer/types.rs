//! Signer error definitions.

use thiserror::Error;

/// Errors that can occur while loading keys or signing.
#[derive(Debug, Error)]
pub enum SignerError {
    /// Private key is not 32 bytes of valid hex / not a valid scalar.
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Environment variable holding the key is unset.
    #[error("Environment variable {0} not set")]
    MissingKey(String),

    /// The transaction names a sender other than the signing key's address.
    #[error("Transaction sender {from} does not match signing key address {owner}")]
    SenderMismatch { from: String, owner: String },

    /// Underlying ECDSA failure.
    #[error("Signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Transaction(#[from] crate::transaction::TransactionError),
}

/// Result type for signer operations.
pub type SignerResult<T> = Result<T, SignerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SignerError::MissingKey("LEDGER_PRIVATE_KEY".into());
        assert_eq!(err.to_string(), "Environment variable LEDGER_PRIVATE_KEY not set");

        let err = SignerError::SenderMismatch { from: "aa".into(), owner: "bb".into() };
        assert!(err.to_string().contains("aa"));
        assert!(err.to_string().contains("bb"));
    }
}
