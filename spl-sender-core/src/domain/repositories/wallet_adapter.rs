//! Wallet capability
//!
//! The wallet owns the signing key. The sender only ever asks it who is
//! connected and to sign and submit a transaction it built.

use crate::domain::repositories::ledger_rpc::LedgerRpc;
use crate::shared::error::SenderError;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use std::sync::Arc;

/// Wallet adapter trait
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    /// Public identity of the connected wallet, if any
    fn identity(&self) -> Option<Pubkey>;

    /// Connect and return the identity
    fn connect(&self) -> Result<Pubkey, SenderError>;

    fn disconnect(&self);

    /// Sign `transaction` and submit it through `rpc`
    async fn sign_and_send(
        &self,
        transaction: VersionedTransaction,
        rpc: Arc<dyn LedgerRpc>,
    ) -> Result<Signature, SenderError>;
}
