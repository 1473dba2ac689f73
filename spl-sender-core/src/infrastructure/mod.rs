//! Infrastructure layer - configuration and external integrations
//!
//! This module contains the configuration loader and the JSON-RPC adapter
//! that implements the ledger capability.

pub mod config;
pub mod rpc;

// Re-export infrastructure components
pub use config::*;
pub use rpc::*;
