//! Wallet management and transaction signing.
//!
//! # Security
//! - Private keys come from the caller or an environment variable
//! - Keys are never logged or serialized
//! - The `owner` of a signature is always derived from the key

use alloy::primitives::{Address, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, Signer};

use crate::signer::types::{SignerError, SignerResult};
use crate::transaction::address::to_ledger_address;
use crate::transaction::builder::TransactionBuilder;
use crate::transaction::codec;
use crate::transaction::types::{Sign, SignedTransaction, UnsignedTransaction};

/// Default environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "LEDGER_PRIVATE_KEY";

/// Wallet for transaction signing.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    ledger_address: String,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    ///
    /// # Security
    /// The private key is parsed and stored securely. It is never logged.
    pub fn from_private_key(private_key_hex: &str) -> SignerResult<Self> {
        let trimmed = private_key_hex.trim();
        let key_hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        if key_hex.len() != 64 || !key_hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SignerError::InvalidPrivateKey(
                "expected 64 hex characters".to_string(),
            ));
        }

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| SignerError::InvalidPrivateKey(format!("{}", e)))?;
        let ledger_address = to_ledger_address(signer.address());

        tracing::debug!(address = %ledger_address, "Wallet initialized");

        Ok(Self {
            signer,
            ledger_address,
        })
    }

    /// Load wallet from the named environment variable.
    pub fn from_env(var: &str) -> SignerResult<Self> {
        let private_key =
            std::env::var(var).map_err(|_| SignerError::MissingKey(var.to_string()))?;

        Self::from_private_key(&private_key)
    }

    /// Ethereum-style address of the key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Fixed-width ledger address of the key.
    pub fn ledger_address(&self) -> &str {
        &self.ledger_address
    }

    /// Account creation transaction sent from this wallet.
    pub fn create_account_tx(
        &self,
        amount: U256,
        network_id: &str,
    ) -> SignerResult<UnsignedTransaction> {
        Ok(TransactionBuilder::create()
            .from_address(self.ledger_address.as_str())
            .amount(amount)
            .network_id(network_id)
            .build()?)
    }

    /// Transfer transaction sent from this wallet.
    pub fn transfer_tx(
        &self,
        to: &str,
        amount: U256,
        network_id: &str,
    ) -> SignerResult<UnsignedTransaction> {
        Ok(TransactionBuilder::transfer(to)
            .from_address(self.ledger_address.as_str())
            .amount(amount)
            .network_id(network_id)
            .build()?)
    }

    /// Sign a transaction.
    ///
    /// Returns the signed transaction and the signing hash, which doubles as
    /// a client-side transaction id until the gateway assigns one.
    pub async fn sign(&self, tx: UnsignedTransaction) -> SignerResult<(SignedTransaction, B256)> {
        if tx.sender() != self.ledger_address {
            return Err(SignerError::SenderMismatch {
                from: tx.sender().to_string(),
                owner: self.ledger_address.clone(),
            });
        }

        let hash = codec::hash(&tx);
        let signature = self.sign_hash(hash).await?;

        let sign = Sign {
            owner: self.ledger_address.clone(),
            sig: format!("0x{}", alloy::hex::encode(signature.as_bytes())),
        };

        tracing::debug!(tx_hash = %hash, owner = %sign.owner, "Transaction signed");

        Ok((SignedTransaction { payload: tx, sign }, hash))
    }

    /// Sign a 32-byte hash without any message prefix.
    pub async fn sign_hash(&self, hash: B256) -> SignerResult<Signature> {
        self.signer
            .sign_hash(&hash)
            .await
            .map_err(|e| SignerError::Signing(e.to_string()))
    }
}

/// Recover the ledger address that produced a signed transaction's signature.
pub fn recover_owner(tx: &SignedTransaction) -> SignerResult<String> {
    let hex = tx.sign().sig.strip_prefix("0x").unwrap_or(&tx.sign().sig);
    let bytes = alloy::hex::decode(hex).map_err(|e| SignerError::Signing(e.to_string()))?;
    let signature =
        Signature::try_from(bytes.as_slice()).map_err(|e| SignerError::Signing(e.to_string()))?;

    let hash = codec::hash(tx.payload());
    let address = signature
        .recover_address_from_prehash(&hash)
        .map_err(|e| SignerError::Signing(e.to_string()))?;
    Ok(to_ledger_address(address))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_LEDGER_ADDRESS: &str =
        "f39fd6e51aad88f6f4ce6ab8827279cfffb92266000000000000000000000000";

    #[test]
    fn test_wallet_from_private_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
        assert_eq!(wallet.ledger_address(), TEST_LEDGER_ADDRESS);
        assert_eq!(wallet.ledger_address().len(), 64);
    }

    #[test]
    fn test_wallet_with_0x_prefix() {
        let wallet = Wallet::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY)).unwrap();
        assert_eq!(wallet.ledger_address(), TEST_LEDGER_ADDRESS);
    }

    #[test]
    fn test_invalid_private_key() {
        let zero_key = "0".repeat(64);
        for key in ["invalid_key", "", "0x1234", zero_key.as_str()] {
            let result = Wallet::from_private_key(key);
            assert!(
                matches!(result, Err(SignerError::InvalidPrivateKey(_))),
                "expected invalid for {:?}",
                key
            );
        }
    }

    #[test]
    fn test_from_env_missing() {
        let err = Wallet::from_env("LEDGER_CLIENT_TEST_UNSET_KEY_VAR").unwrap_err();
        assert!(matches!(err, SignerError::MissingKey(_)));
    }

    #[tokio::test]
    async fn test_sign_attaches_derived_owner() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let tx = wallet.create_account_tx(U256::from(1u64), "devnet").unwrap();
        let expected_hash = codec::hash(&tx);

        let (signed, hash) = wallet.sign(tx).await.unwrap();
        assert_eq!(hash, expected_hash);
        assert_eq!(signed.sign().owner, TEST_LEDGER_ADDRESS);
        // 0x + 65 bytes (r, s, v)
        assert_eq!(signed.sign().sig.len(), 2 + 130);
        assert_eq!(recover_owner(&signed).unwrap(), TEST_LEDGER_ADDRESS);
    }

    #[tokio::test]
    async fn test_signing_is_deterministic() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let tx = TransactionBuilder::create()
            .from_address(TEST_LEDGER_ADDRESS)
            .amount(U256::from(7u64))
            .timestamp(1_700_000_000_000)
            .network_id("devnet")
            .build()
            .unwrap();

        let (a, _) = wallet.sign(tx.clone()).await.unwrap();
        let (b, _) = wallet.sign(tx).await.unwrap();
        assert_eq!(a.sign(), b.sign());
    }

    #[tokio::test]
    async fn test_rejects_foreign_sender() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let tx = TransactionBuilder::create()
            .from_address("70997970c51812dc3a010c7d01b50e0d17dc79c8")
            .network_id("devnet")
            .build()
            .unwrap();

        let err = wallet.sign(tx).await.unwrap_err();
        assert!(matches!(err, SignerError::SenderMismatch { .. }));
    }

    #[tokio::test]
    async fn test_transfer_tx() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let tx = wallet
            .transfer_tx("0x70997970C51812dc3A010C7d01b50e0d17dc79C8", U256::from(3u64), "devnet")
            .unwrap();
        assert_eq!(tx.sender(), TEST_LEDGER_ADDRESS);
        assert!(tx.recipient().unwrap().starts_with("70997970c51812dc3a010c7d01b50e0d17dc79c8"));

        let (signed, _) = wallet.sign(tx).await.unwrap();
        assert_eq!(recover_owner(&signed).unwrap(), TEST_LEDGER_ADDRESS);
    }
}
