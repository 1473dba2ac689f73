//! Domain layer - entities and repositories
//!
//! This module contains the domain types of the sender and the capability
//! traits through which it reaches the wallet and the ledger.

pub mod entities;
pub mod repositories;

// Re-export domain components
pub use entities::*;
pub use repositories::*;
