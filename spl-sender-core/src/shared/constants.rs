//! Constants for the sender core
//!
//! This module contains all constants used throughout the sender core.

pub use solana_sdk::native_token::LAMPORTS_PER_SOL;

// Native asset
pub const NATIVE_SYMBOL: &str = "SOL";
pub const NATIVE_DECIMALS: u8 = 9;

// Transfer form defaults
pub const DEFAULT_TRANSFER_AMOUNT: &str = "1";

// User-facing messages
pub const MSG_WALLET_NOT_CONNECTED: &str = "Wallet not connected!";
pub const MSG_INVALID_RECIPIENT: &str = "Invalid recepient Address!";
pub const MSG_TRANSFER_IN_PROGRESS: &str = "Transaction already in progress!";
pub const MSG_TRANSFER_SUCCESS: &str = "Transaction successful!";
pub const MSG_TRANSFER_FAILED: &str = "Transaction failed!";

// Notifications
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 50;

// RPC
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONFIRM_POLL_MS: u64 = 500;

// Environment keys
pub const ENV_NETWORK: &str = "SPL_SENDER_NETWORK";
pub const ENV_RPC_MAINNET: &str = "SPL_SENDER_RPC_MAINNET";
pub const ENV_RPC_DEVNET: &str = "SPL_SENDER_RPC_DEVNET";
pub const ENV_RPC_TESTNET: &str = "SPL_SENDER_RPC_TESTNET";
pub const ENV_KEYPAIR: &str = "SPL_SENDER_KEYPAIR";
pub const ENV_AUTO_CONNECT: &str = "SPL_SENDER_AUTO_CONNECT";
pub const ENV_COMMITMENT: &str = "SPL_SENDER_COMMITMENT";
pub const ENV_NOTIFICATION_CAPACITY: &str = "SPL_SENDER_NOTIFICATION_CAPACITY";
pub const ENV_RPC_TIMEOUT_SECS: &str = "SPL_SENDER_RPC_TIMEOUT_SECS";
pub const ENV_CONFIRM_POLL_MS: &str = "SPL_SENDER_CONFIRM_POLL_MS";
