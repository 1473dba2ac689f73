//! Ledger RPC capability
//!
//! Everything the sender needs from a Solana RPC node. The HTTP adapter lives
//! in `infrastructure::rpc`; tests use the generated mock.

use crate::shared::error::SenderError;
use crate::shared::types::{Commitment, LatestBlockhash, Lamports, MintInfo, TokenAccountInfo};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use std::sync::Arc;

/// Ledger RPC trait
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Fetch the blockhash a new transaction must reference
    async fn get_latest_blockhash(&self) -> Result<LatestBlockhash, SenderError>;

    /// Wait until `signature` reaches `commitment`, failing once `blockhash` expires
    async fn confirm_transaction(
        &self,
        signature: &Signature,
        blockhash: &LatestBlockhash,
        commitment: Commitment,
    ) -> Result<(), SenderError>;

    /// Native balance of an account
    async fn get_balance(&self, owner: &Pubkey) -> Result<Lamports, SenderError>;

    /// Decode an SPL mint
    async fn get_mint(&self, mint: &Pubkey) -> Result<MintInfo, SenderError>;

    /// Decode an SPL token account; `AccountNotFound` when it does not exist
    async fn get_token_account(&self, address: &Pubkey) -> Result<TokenAccountInfo, SenderError>;

    /// Submit a signed transaction
    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<Signature, SenderError>;
}

/// Endpoint a client is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub commitment: Commitment,
}

/// Builds a client for an endpoint
#[cfg_attr(test, automock)]
pub trait RpcConnector: Send + Sync {
    fn connect(&self, endpoint: &Endpoint) -> Result<Arc<dyn LedgerRpc>, SenderError>;
}
