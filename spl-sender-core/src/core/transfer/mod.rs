//! Transfer orchestrator
//!
//! Builds a native or SPL token transfer, hands it to the wallet for signing
//! and submission, waits for confirmation and reports the outcome as exactly
//! one notification. Failures never escape `submit`.

use crate::core::connection::ConnectionContext;
use crate::core::notifications::NotificationSink;
use crate::domain::entities::notification::Notification;
use crate::domain::entities::transfer::TransferRequest;
use crate::domain::repositories::{LedgerRpc, WalletAdapter};
use crate::shared::constants::*;
use crate::shared::error::SenderError;
use crate::shared::types::{Commitment, LatestBlockhash};
use crate::shared::utils::{parse_address, parse_amount};
use solana_sdk::instruction::Instruction;
use solana_sdk::message::{Message, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::system_instruction;
use solana_sdk::transaction::VersionedTransaction;
use spl_associated_token_account::get_associated_token_address;
use spl_associated_token_account::instruction::create_associated_token_account;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of one submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A precondition failed before any network call
    Rejected(String),
    Confirmed(Signature),
    Failed {
        error: SenderError,
        signature: Option<Signature>,
    },
}

impl SubmitOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    pub fn signature(&self) -> Option<Signature> {
        match self {
            Self::Confirmed(signature) => Some(*signature),
            Self::Failed { signature, .. } => *signature,
            Self::Rejected(_) => None,
        }
    }
}

/// Clears the in-flight flag when the submit settles
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct TransferOrchestrator {
    wallet: Arc<dyn WalletAdapter>,
    connection: Arc<ConnectionContext>,
    notifications: NotificationSink,
    commitment: Commitment,
    in_flight: AtomicBool,
}

impl TransferOrchestrator {
    pub fn new(
        wallet: Arc<dyn WalletAdapter>,
        connection: Arc<ConnectionContext>,
        notifications: NotificationSink,
        commitment: Commitment,
    ) -> Self {
        Self {
            wallet,
            connection,
            notifications,
            commitment,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit_request(&self, request: &TransferRequest) -> SubmitOutcome {
        self.submit(&request.amount, &request.recipient, &request.token_address)
            .await
    }

    /// Send `amount` of the token at `token_address` (empty for SOL) to
    /// `recipient`. Posts one notification per call.
    pub async fn submit(&self, amount: &str, recipient: &str, token_address: &str) -> SubmitOutcome {
        let Some(sender) = self.wallet.identity() else {
            return self.reject(MSG_WALLET_NOT_CONNECTED).await;
        };
        if recipient.trim().is_empty() {
            return self.reject(MSG_INVALID_RECIPIENT).await;
        }
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            return self.reject(MSG_TRANSFER_IN_PROGRESS).await;
        };

        // Bound for the whole operation, even if the network changes meanwhile
        let rpc = self.connection.client();

        let (transaction, blockhash) = match self
            .build_transaction(sender, amount, recipient, token_address, rpc.as_ref())
            .await
        {
            Ok(built) => built,
            Err(e) => return self.fail(e, None).await,
        };

        let signature = match self.wallet.sign_and_send(transaction, rpc.clone()).await {
            Ok(signature) => signature,
            Err(e) => return self.fail(e, None).await,
        };
        log::info!("Transaction sent: {}", signature);

        if let Err(e) = rpc
            .confirm_transaction(&signature, &blockhash, self.commitment)
            .await
        {
            return self.fail(e, Some(signature)).await;
        }

        self.notifications
            .post(Notification::success(MSG_TRANSFER_SUCCESS).with_txid(signature.to_string()))
            .await;
        SubmitOutcome::Confirmed(signature)
    }

    async fn build_transaction(
        &self,
        sender: Pubkey,
        amount: &str,
        recipient: &str,
        token_address: &str,
        rpc: &dyn LedgerRpc,
    ) -> Result<(VersionedTransaction, LatestBlockhash), SenderError> {
        let blockhash = rpc.get_latest_blockhash().await?;
        let recipient = parse_address(recipient)?;
        let instructions = build_instructions(sender, recipient, amount, token_address, rpc).await?;

        let message = Message::new_with_blockhash(&instructions, Some(&sender), &blockhash.blockhash);
        let transaction = VersionedTransaction {
            signatures: vec![Signature::default(); message.header.num_required_signatures as usize],
            message: VersionedMessage::Legacy(message),
        };
        Ok((transaction, blockhash))
    }

    async fn reject(&self, message: &str) -> SubmitOutcome {
        self.notifications.post(Notification::error(message)).await;
        SubmitOutcome::Rejected(message.to_string())
    }

    async fn fail(&self, error: SenderError, signature: Option<Signature>) -> SubmitOutcome {
        let mut notification = Notification::error(MSG_TRANSFER_FAILED).with_description(error.to_string());
        if let Some(signature) = signature {
            notification = notification.with_txid(signature.to_string());
        }
        self.notifications.post(notification).await;
        SubmitOutcome::Failed { error, signature }
    }
}

async fn build_instructions(
    sender: Pubkey,
    recipient: Pubkey,
    amount: &str,
    token_address: &str,
    rpc: &dyn LedgerRpc,
) -> Result<Vec<Instruction>, SenderError> {
    let token_address = token_address.trim();
    if token_address.is_empty() {
        let lamports = parse_amount(amount, NATIVE_DECIMALS)?;
        return Ok(vec![system_instruction::transfer(&sender, &recipient, lamports)]);
    }

    // Associated token accounts can only be derived for wallet (on-curve) owners
    if !recipient.is_on_curve() {
        return Err(SenderError::validation(format!(
            "Recipient {} is not a wallet address and cannot own a token account",
            recipient
        )));
    }

    let mint = parse_address(token_address)?;
    let mint_info = rpc.get_mint(&mint).await?;
    let units = parse_amount(amount, mint_info.decimals)?;

    let source = get_associated_token_address(&sender, &mint);
    let destination = get_associated_token_address(&recipient, &mint);

    let mut instructions = Vec::with_capacity(2);
    if let Err(e) = rpc.get_token_account(&destination).await {
        if e.is_account_not_found() {
            log::debug!("Recipient token account {} missing, creating it", destination);
        } else {
            log::warn!("Recipient token account {} lookup failed ({}), creating it", destination, e);
        }
        instructions.push(create_associated_token_account(
            &sender,
            &recipient,
            &mint,
            &spl_token::id(),
        ));
    }
    instructions.push(spl_token::instruction::transfer_checked(
        &spl_token::id(),
        &source,
        &mint,
        &destination,
        &sender,
        &[],
        units,
        mint_info.decimals,
    )?);

    Ok(instructions)
}
