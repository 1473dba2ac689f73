//! Balance store
//!
//! Holds the native balance of the connected wallet. Every refresh is a full
//! refetch that replaces the record; nothing is updated incrementally. The
//! lock is never held across the RPC call, so readers may briefly see the
//! previous owner's balance while a refresh is in flight.
//!
//! Each refresh takes a generation ticket before fetching. A result is only
//! stored if no later refresh, `invalidate` or `clear` happened meanwhile;
//! otherwise it is dropped.

use crate::domain::entities::balance::BalanceRecord;
use crate::domain::repositories::LedgerRpc;
use crate::shared::error::SenderError;
use crate::shared::types::Network;
use solana_sdk::pubkey::Pubkey;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct BalanceStore {
    record: Arc<RwLock<Option<BalanceRecord>>>,
    generation: Arc<AtomicU64>,
}

impl BalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and replace the balance for `owner`. On failure the record is
    /// cleared so no stale figure is shown for the new owner. Returns
    /// `Ok(None)` when the result was superseded before it arrived.
    pub async fn refresh(
        &self,
        owner: Pubkey,
        network: Network,
        rpc: &dyn LedgerRpc,
    ) -> Result<Option<BalanceRecord>, SenderError> {
        let ticket = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let fetched = rpc.get_balance(&owner).await;

        let mut slot = self.record.write().await;
        if self.generation.load(Ordering::Acquire) != ticket {
            log::debug!("Discarding superseded balance of {} on {}", owner, network);
            return Ok(None);
        }

        match fetched {
            Ok(lamports) => {
                let record = BalanceRecord::new(owner, network, lamports);
                log::debug!("Balance of {} on {}: {} SOL", owner, network, record.sol());
                *slot = Some(record.clone());
                Ok(Some(record))
            }
            Err(e) => {
                log::warn!("Failed to fetch balance of {}: {}", owner, e);
                *slot = None;
                Err(e)
            }
        }
    }

    pub async fn get(&self) -> Option<BalanceRecord> {
        self.record.read().await.clone()
    }

    /// Drop any refresh still in flight
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    pub async fn clear(&self) {
        self.invalidate();
        *self.record.write().await = None;
    }
}
