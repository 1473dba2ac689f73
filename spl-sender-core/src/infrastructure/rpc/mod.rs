//! RPC adapter for the ledger capability
//!
//! Wraps the nonblocking `solana-client` RPC client. Token accounts and mints
//! are decoded with the token program's own `Pack` layouts.

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use spl_token::solana_program::program_pack::Pack;
use spl_token::state::{Account as TokenAccount, Mint};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::repositories::{Endpoint, LedgerRpc, RpcConnector};
use crate::shared::error::SenderError;
use crate::shared::types::{Commitment, LatestBlockhash, Lamports, MintInfo, TokenAccountInfo};

/// RPC client bound to one endpoint
pub struct SolanaRpcClient {
    client: RpcClient,
    endpoint: Endpoint,
    poll_interval: Duration,
}

impl SolanaRpcClient {
    pub fn new(endpoint: Endpoint, timeout: Duration, poll_interval: Duration) -> Self {
        let client = RpcClient::new_with_timeout_and_commitment(
            endpoint.url.clone(),
            timeout,
            endpoint.commitment.config(),
        );
        Self {
            client,
            endpoint,
            poll_interval,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Owner and data of an account, `None` when it does not exist
    async fn get_account(&self, address: &Pubkey) -> Result<Option<(Pubkey, Vec<u8>)>, SenderError> {
        let account = self
            .client
            .get_account_with_commitment(address, self.endpoint.commitment.config())
            .await?
            .value;
        Ok(account.map(|account| (account.owner, account.data)))
    }
}

fn decode_mint(address: &Pubkey, owner: &Pubkey, data: &[u8]) -> Result<MintInfo, SenderError> {
    if *owner != spl_token::id() {
        return Err(SenderError::validation(format!(
            "Account {} is not owned by the SPL Token program",
            address
        )));
    }
    let mint = Mint::unpack(data)
        .map_err(|e| SenderError::validation(format!("Invalid mint {}: {}", address, e)))?;
    Ok(MintInfo {
        address: *address,
        decimals: mint.decimals,
    })
}

fn decode_token_account(address: &Pubkey, owner: &Pubkey, data: &[u8]) -> Result<TokenAccountInfo, SenderError> {
    if *owner != spl_token::id() {
        return Err(SenderError::validation(format!(
            "Account {} is not owned by the SPL Token program",
            address
        )));
    }
    let account = TokenAccount::unpack(data)
        .map_err(|e| SenderError::validation(format!("Invalid token account {}: {}", address, e)))?;
    Ok(TokenAccountInfo {
        address: *address,
        mint: account.mint,
        owner: account.owner,
        amount: account.amount,
    })
}

#[async_trait]
impl LedgerRpc for SolanaRpcClient {
    async fn get_latest_blockhash(&self) -> Result<LatestBlockhash, SenderError> {
        let (blockhash, last_valid_block_height) = self
            .client
            .get_latest_blockhash_with_commitment(self.endpoint.commitment.config())
            .await?;
        Ok(LatestBlockhash {
            blockhash,
            last_valid_block_height,
        })
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        blockhash: &LatestBlockhash,
        commitment: Commitment,
    ) -> Result<(), SenderError> {
        loop {
            let statuses = self.client.get_signature_statuses(&[*signature]).await?.value;
            if let Some(Some(status)) = statuses.into_iter().next() {
                if let Some(err) = status.err {
                    return Err(SenderError::transaction(format!(
                        "Transaction {} failed: {}",
                        signature, err
                    )));
                }
                if status.satisfies_commitment(commitment.config()) {
                    log::debug!("Signature {} reached {}", signature, commitment.as_str());
                    return Ok(());
                }
            }

            let height = self
                .client
                .get_block_height_with_commitment(commitment.config())
                .await?;
            if height > blockhash.last_valid_block_height {
                return Err(SenderError::transaction(format!(
                    "Signature {} has expired: block height exceeded",
                    signature
                )));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn get_balance(&self, owner: &Pubkey) -> Result<Lamports, SenderError> {
        Ok(self
            .client
            .get_balance_with_commitment(owner, self.endpoint.commitment.config())
            .await?
            .value)
    }

    async fn get_mint(&self, mint: &Pubkey) -> Result<MintInfo, SenderError> {
        let (owner, data) = self
            .get_account(mint)
            .await?
            .ok_or_else(|| SenderError::account_not_found(format!("Mint {} not found", mint)))?;
        decode_mint(mint, &owner, &data)
    }

    async fn get_token_account(&self, address: &Pubkey) -> Result<TokenAccountInfo, SenderError> {
        let (owner, data) = self
            .get_account(address)
            .await?
            .ok_or_else(|| SenderError::account_not_found(format!("Token account {} not found", address)))?;
        decode_token_account(address, &owner, &data)
    }

    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<Signature, SenderError> {
        Ok(self.client.send_transaction(transaction).await?)
    }
}

/// Builds [`SolanaRpcClient`]s for the connection context
pub struct SolanaRpcConnector {
    timeout: Duration,
    poll_interval: Duration,
}

impl SolanaRpcConnector {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }
}

impl RpcConnector for SolanaRpcConnector {
    fn connect(&self, endpoint: &Endpoint) -> Result<Arc<dyn LedgerRpc>, SenderError> {
        log::info!("Connecting RPC client to {}", endpoint.url);
        Ok(Arc::new(SolanaRpcClient::new(
            endpoint.clone(),
            self.timeout,
            self.poll_interval,
        )))
    }
}
