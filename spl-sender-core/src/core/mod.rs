//! Core sender functionality
//!
//! Application state objects (balance, notifications, network selection),
//! the keypair wallet and the transfer orchestrator.

pub mod balance;
pub mod connection;
pub mod notifications;
pub mod transfer;
pub mod wallet;

pub use balance::BalanceStore;
pub use connection::ConnectionContext;
pub use notifications::NotificationSink;
pub use transfer::{SubmitOutcome, TransferOrchestrator};
pub use wallet::{KeypairSource, KeypairWallet};
