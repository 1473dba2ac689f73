//! Domain repositories
//!
//! Capability traits for the external collaborators: the ledger RPC node and
//! the wallet.

pub mod ledger_rpc;
pub mod wallet_adapter;

// Re-export repositories
pub use ledger_rpc::*;
pub use wallet_adapter::*;
