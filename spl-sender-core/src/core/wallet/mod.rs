//! Keypair-backed wallet
//!
//! Implements the wallet capability with a local Solana keypair, read either
//! from a CLI-format JSON file or from a base58 secret key.

use crate::domain::repositories::{LedgerRpc, WalletAdapter};
use crate::shared::constants::MSG_WALLET_NOT_CONNECTED;
use crate::shared::error::SenderError;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair, Signature, Signer};
use solana_sdk::transaction::VersionedTransaction;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Where the signing key comes from
#[derive(Clone, PartialEq, Eq)]
pub enum KeypairSource {
    File(PathBuf),
    Base58(String),
}

impl KeypairSource {
    /// Paths (anything with a separator, `~` prefix or `.json` suffix) are
    /// files; everything else is treated as a base58 secret key.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if let Some(rest) = value.strip_prefix("~/") {
            if let Ok(home) = std::env::var("HOME") {
                return Self::File(PathBuf::from(home).join(rest));
            }
        }
        if value.contains('/') || value.contains('\\') || value.ends_with(".json") {
            Self::File(PathBuf::from(value))
        } else {
            Self::Base58(value.to_string())
        }
    }

    pub fn load(&self) -> Result<Keypair, SenderError> {
        match self {
            Self::File(path) => read_keypair_file(path).map_err(|e| {
                SenderError::wallet(format!("Failed to read keypair file {}: {}", path.display(), e))
            }),
            Self::Base58(secret) => {
                let bytes = bs58::decode(secret)
                    .into_vec()
                    .map_err(|e| SenderError::wallet(format!("Invalid base58 secret key: {}", e)))?;
                Keypair::from_bytes(&bytes)
                    .map_err(|e| SenderError::wallet(format!("Invalid secret key: {}", e)))
            }
        }
    }
}

impl fmt::Debug for KeypairSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Base58(_) => f.write_str("Base58(<redacted>)"),
        }
    }
}

/// Wallet adapter holding a local keypair while connected
pub struct KeypairWallet {
    source: Option<KeypairSource>,
    keypair: RwLock<Option<Arc<Keypair>>>,
}

impl KeypairWallet {
    pub fn new(source: Option<KeypairSource>) -> Self {
        Self {
            source,
            keypair: RwLock::new(None),
        }
    }

    fn current(&self) -> Option<Arc<Keypair>> {
        self.keypair
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl WalletAdapter for KeypairWallet {
    fn identity(&self) -> Option<Pubkey> {
        self.current().map(|keypair| keypair.pubkey())
    }

    fn connect(&self) -> Result<Pubkey, SenderError> {
        if let Some(pubkey) = self.identity() {
            return Ok(pubkey);
        }

        let source = self
            .source
            .as_ref()
            .ok_or_else(|| SenderError::wallet("No keypair configured"))?;
        let keypair = source.load()?;
        let pubkey = keypair.pubkey();

        *self
            .keypair
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Arc::new(keypair));
        log::info!("Wallet connected: {}", pubkey);
        Ok(pubkey)
    }

    fn disconnect(&self) {
        let previous = self
            .keypair
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(keypair) = previous {
            log::info!("Wallet disconnected: {}", keypair.pubkey());
        }
    }

    async fn sign_and_send(
        &self,
        transaction: VersionedTransaction,
        rpc: Arc<dyn LedgerRpc>,
    ) -> Result<Signature, SenderError> {
        let keypair = self
            .current()
            .ok_or_else(|| SenderError::wallet(MSG_WALLET_NOT_CONNECTED))?;

        let signed = VersionedTransaction::try_new(transaction.message, &[keypair.as_ref()])?;
        log::debug!("Signed transaction {}", signed.signatures[0]);
        rpc.send_transaction(&signed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLedgerRpc;
    use solana_sdk::hash::Hash;
    use solana_sdk::message::{Message, VersionedMessage};
    use solana_sdk::signature::write_keypair_file;
    use solana_sdk::system_instruction;

    fn unsigned_transfer(from: &Pubkey) -> VersionedTransaction {
        let instruction = system_instruction::transfer(from, &Pubkey::new_unique(), 1);
        let message = Message::new_with_blockhash(&[instruction], Some(from), &Hash::new_unique());
        VersionedTransaction {
            signatures: vec![Signature::default(); 1],
            message: VersionedMessage::Legacy(message),
        }
    }

    #[test]
    fn test_parse_source() {
        assert!(matches!(KeypairSource::parse("/tmp/id.json"), KeypairSource::File(_)));
        assert!(matches!(KeypairSource::parse("id.json"), KeypairSource::File(_)));
        assert!(matches!(KeypairSource::parse("4Z7cXSyeFR8wNGMVXUE1TwtKn5D5Vu7FzEv69dokLv7K"), KeypairSource::Base58(_)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let source = KeypairSource::Base58("super-secret".to_string());
        assert!(!format!("{:?}", source).contains("super-secret"));
    }

    #[test]
    fn test_connect_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.json");
        let keypair = Keypair::new();
        write_keypair_file(&keypair, &path).unwrap();

        let wallet = KeypairWallet::new(Some(KeypairSource::File(path)));
        assert!(wallet.identity().is_none());
        assert_eq!(wallet.connect().unwrap(), keypair.pubkey());
        assert_eq!(wallet.identity(), Some(keypair.pubkey()));

        wallet.disconnect();
        assert!(wallet.identity().is_none());
    }

    #[test]
    fn test_connect_from_base58() {
        let keypair = Keypair::new();
        let wallet = KeypairWallet::new(Some(KeypairSource::Base58(keypair.to_base58_string())));
        assert_eq!(wallet.connect().unwrap(), keypair.pubkey());
    }

    #[test]
    fn test_connect_errors() {
        let wallet = KeypairWallet::new(None);
        assert!(matches!(wallet.connect(), Err(SenderError::Wallet(_))));

        let wallet = KeypairWallet::new(Some(KeypairSource::Base58("0OIl".to_string())));
        assert!(matches!(wallet.connect(), Err(SenderError::Wallet(_))));

        let wallet = KeypairWallet::new(Some(KeypairSource::File(PathBuf::from("/nonexistent/id.json"))));
        assert!(matches!(wallet.connect(), Err(SenderError::Wallet(_))));
    }

    #[tokio::test]
    async fn test_sign_and_send() {
        let keypair = Keypair::new();
        let pubkey = keypair.pubkey();
        let wallet = KeypairWallet::new(Some(KeypairSource::Base58(keypair.to_base58_string())));
        wallet.connect().unwrap();

        let mut rpc = MockLedgerRpc::new();
        rpc.expect_send_transaction()
            .times(1)
            .withf(|tx| tx.verify_with_results().iter().all(|ok| *ok))
            .returning(|tx| Ok(tx.signatures[0]));

        let signature = wallet
            .sign_and_send(unsigned_transfer(&pubkey), Arc::new(rpc))
            .await
            .unwrap();
        assert_ne!(signature, Signature::default());
    }

    #[tokio::test]
    async fn test_sign_requires_connection() {
        let wallet = KeypairWallet::new(None);
        let rpc = MockLedgerRpc::new();
        let result = wallet
            .sign_and_send(unsigned_transfer(&Pubkey::new_unique()), Arc::new(rpc))
            .await;
        assert!(matches!(result, Err(SenderError::Wallet(_))));
    }
}
