//! Error handling for the sender core
//!
//! This module defines the error type used throughout the sender core.

use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::rpc_request::RpcError;
use thiserror::Error;

/// Sender error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SenderError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Wallet error: {0}")]
    Wallet(String),
}

impl SenderError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create an error from a JSON-RPC error object
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc { code, message: message.into() }
    }

    /// Create an account not found error
    pub fn account_not_found(message: impl Into<String>) -> Self {
        Self::AccountNotFound(message.into())
    }

    /// Create a transaction error
    pub fn transaction(message: impl Into<String>) -> Self {
        Self::Transaction(message.into())
    }

    /// Create a wallet error
    pub fn wallet(message: impl Into<String>) -> Self {
        Self::Wallet(message.into())
    }

    /// Whether the error only says that an account does not exist yet
    pub fn is_account_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound(_))
    }
}

// RPC client error conversions
impl From<ClientError> for SenderError {
    fn from(err: ClientError) -> Self {
        match err.kind() {
            ClientErrorKind::RpcError(RpcError::RpcResponseError { code, message, .. }) => {
                Self::rpc(*code, message.clone())
            }
            _ => Self::network(format!("RPC request failed: {}", err)),
        }
    }
}

// Solana SDK error conversions
impl From<solana_sdk::pubkey::ParsePubkeyError> for SenderError {
    fn from(err: solana_sdk::pubkey::ParsePubkeyError) -> Self {
        Self::validation(format!("Invalid public key: {}", err))
    }
}

impl From<solana_sdk::program_error::ProgramError> for SenderError {
    fn from(err: solana_sdk::program_error::ProgramError) -> Self {
        Self::transaction(format!("Instruction error: {}", err))
    }
}

impl From<solana_sdk::signer::SignerError> for SenderError {
    fn from(err: solana_sdk::signer::SignerError) -> Self {
        Self::wallet(format!("Signing failed: {}", err))
    }
}
