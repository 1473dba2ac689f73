//! Domain entities and value objects
//!
//! This module contains the core domain entities and value objects
//! that represent the business concepts of the sender.

pub mod token;
pub mod transfer;
pub mod notification;
pub mod balance;

// Re-export entities
pub use token::*;
pub use transfer::*;
pub use notification::*;
pub use balance::*;
