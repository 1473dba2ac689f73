//! SPL Sender Core
//!
//! Send SOL or SPL tokens from a connected Solana wallet.
//!
//! ## Architecture
//!
//! - **Core**: balance store, notification sink, network/connection context,
//!   keypair wallet and the transfer orchestrator
//! - **Domain**: entities (token registry, transfer form, notifications) and
//!   the capability traits for the wallet and the ledger RPC node
//! - **Infrastructure**: configuration and the JSON-RPC client
//! - **Shared**: common types, constants, and utilities
//!
//! ## Usage
//!
//! ```rust,no_run
//! use spl_sender_core::{init_sender_core, TransferForm};
//!
//! # async fn run() -> Result<(), spl_sender_core::SenderError> {
//! let core = init_sender_core().await?;
//!
//! let mut form = TransferForm::new();
//! form.set_recipient("D3V8DhfG3nKLL99Ywb6ThuU8DxxbBgnPQmA3piqQ2ec2");
//! let outcome = core.send(&form).await;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use crate::core::{
    BalanceStore, ConnectionContext, KeypairSource, KeypairWallet, NotificationSink, SubmitOutcome,
    TransferOrchestrator,
};
pub use domain::entities::{token_list, BalanceRecord, Notification, Severity, TokenDescriptor, TransferForm};
pub use domain::repositories::{LedgerRpc, RpcConnector, WalletAdapter};
pub use infrastructure::{SolanaRpcConnector, SenderConfig};
pub use shared::error::SenderError;
pub use shared::types::{Commitment, Network};

use solana_sdk::pubkey::Pubkey;

/// Initialize logging. Safe to call more than once.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build the sender from `.env`/environment configuration, connecting the
/// wallet right away when auto-connect is enabled
pub async fn init_sender_core() -> Result<SenderCore, SenderError> {
    let config = SenderConfig::from_env()?;
    let connector = Arc::new(SolanaRpcConnector::new(config.rpc_timeout, config.confirm_poll_interval));
    let wallet = Arc::new(KeypairWallet::new(config.keypair.clone()));

    let core = SenderCore::new(config, connector, wallet)?;
    if core.config.auto_connect {
        core.connect_wallet().await;
    }
    Ok(core)
}

/// Application state: owns every store for the lifetime of the process
pub struct SenderCore {
    pub config: SenderConfig,
    pub connection: Arc<ConnectionContext>,
    pub wallet: Arc<dyn WalletAdapter>,
    pub balances: BalanceStore,
    pub notifications: NotificationSink,
    pub transfer: TransferOrchestrator,
}

impl SenderCore {
    pub fn new(
        config: SenderConfig,
        connector: Arc<dyn RpcConnector>,
        wallet: Arc<dyn WalletAdapter>,
    ) -> Result<Self, SenderError> {
        let connection = Arc::new(ConnectionContext::new(&config, connector)?);
        let notifications = NotificationSink::new(config.notification_capacity);
        let transfer = TransferOrchestrator::new(
            wallet.clone(),
            connection.clone(),
            notifications.clone(),
            config.commitment,
        );

        log::info!("Sender core ready on {}", connection.network());
        Ok(Self {
            config,
            connection,
            wallet,
            balances: BalanceStore::new(),
            notifications,
            transfer,
        })
    }

    pub fn identity(&self) -> Option<Pubkey> {
        self.wallet.identity()
    }

    pub fn network(&self) -> Network {
        self.connection.network()
    }

    /// Connect the wallet. Failures become error notifications.
    pub async fn connect_wallet(&self) -> Option<Pubkey> {
        match self.wallet.connect() {
            Ok(pubkey) => {
                self.refresh_balance().await;
                Some(pubkey)
            }
            Err(e) => {
                self.notifications
                    .post(Notification::error(e.to_string()))
                    .await;
                None
            }
        }
    }

    pub async fn disconnect_wallet(&self) {
        self.wallet.disconnect();
        self.balances.clear().await;
    }

    /// Switch network; the balance is refetched against the new endpoint
    pub async fn select_network(&self, network: Network) -> Result<(), SenderError> {
        if self.connection.select(network)? {
            self.balances.invalidate();
            self.refresh_balance().await;
        }
        Ok(())
    }

    /// Refetch the balance of the connected wallet, if any
    pub async fn refresh_balance(&self) -> Option<BalanceRecord> {
        let owner = self.wallet.identity()?;
        let (network, rpc) = self.connection.snapshot();
        self.balances
            .refresh(owner, network, rpc.as_ref())
            .await
            .ok()
            .flatten()
    }

    pub fn can_submit(&self, form: &TransferForm) -> bool {
        form.can_submit(self.identity().is_some(), self.transfer.is_in_flight())
    }

    /// Submit the form; a confirmed transfer refreshes the balance
    pub async fn send(&self, form: &TransferForm) -> SubmitOutcome {
        let outcome = self.transfer.submit_request(&form.to_request()).await;
        if outcome.is_confirmed() {
            self.refresh_balance().await;
        }
        outcome
    }

    pub fn explorer_url(&self, signature: &str) -> String {
        self.network().explorer_tx_url(signature)
    }

    /// Tear down application state
    pub async fn shutdown(&self) {
        log::info!("Shutting down sender core");
        self.wallet.disconnect();
        self.balances.clear().await;
        self.notifications.clear().await;
    }
}
