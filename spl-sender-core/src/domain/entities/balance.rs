//! Native balance of the connected wallet

use chrono::{DateTime, Utc};
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::shared::constants::NATIVE_DECIMALS;
use crate::shared::types::{Lamports, Network};
use crate::shared::utils::format_amount;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BalanceRecord {
    pub owner: Pubkey,
    pub network: Network,
    pub lamports: Lamports,
    pub fetched_at: DateTime<Utc>,
}

impl BalanceRecord {
    pub fn new(owner: Pubkey, network: Network, lamports: Lamports) -> Self {
        Self {
            owner,
            network,
            lamports,
            fetched_at: Utc::now(),
        }
    }

    /// Balance rendered in SOL
    pub fn sol(&self) -> String {
        format_amount(self.lamports, NATIVE_DECIMALS)
    }
}
