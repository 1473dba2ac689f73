//! Network/connection context
//!
//! Holds the single active network selection together with the RPC client
//! bound to it. Callers capture `client()` once per operation; a later
//! `select` does not affect clients already handed out.

use crate::domain::repositories::{Endpoint, LedgerRpc, RpcConnector};
use crate::infrastructure::config::SenderConfig;
use crate::shared::error::SenderError;
use crate::shared::types::Network;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

struct ActiveConnection {
    network: Network,
    endpoint: Endpoint,
    client: Arc<dyn LedgerRpc>,
}

pub struct ConnectionContext {
    endpoints: HashMap<Network, Endpoint>,
    connector: Arc<dyn RpcConnector>,
    active: RwLock<ActiveConnection>,
}

impl ConnectionContext {
    /// Connect to the configured network
    pub fn new(config: &SenderConfig, connector: Arc<dyn RpcConnector>) -> Result<Self, SenderError> {
        let endpoints: HashMap<Network, Endpoint> = Network::ALL
            .iter()
            .map(|network| (*network, config.endpoint(*network)))
            .collect();
        let endpoint = config.endpoint(config.network);
        let client = connector.connect(&endpoint)?;

        Ok(Self {
            endpoints,
            connector,
            active: RwLock::new(ActiveConnection {
                network: config.network,
                endpoint,
                client,
            }),
        })
    }

    /// Switch the active network. Returns whether the selection changed.
    pub fn select(&self, network: Network) -> Result<bool, SenderError> {
        if self.network() == network {
            return Ok(false);
        }

        let endpoint = self
            .endpoints
            .get(&network)
            .cloned()
            .ok_or_else(|| SenderError::config(format!("No endpoint configured for {}", network)))?;
        let client = self.connector.connect(&endpoint)?;

        let mut active = self.active.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        log::info!("Network changed: {} -> {}", active.network, network);
        *active = ActiveConnection {
            network,
            endpoint,
            client,
        };
        Ok(true)
    }

    pub fn network(&self) -> Network {
        self.active.read().unwrap_or_else(|poisoned| poisoned.into_inner()).network
    }

    pub fn endpoint(&self) -> Endpoint {
        self.active
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .endpoint
            .clone()
    }

    /// Network and client of the active selection, read together
    pub fn snapshot(&self) -> (Network, Arc<dyn LedgerRpc>) {
        let active = self.active.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        (active.network, active.client.clone())
    }

    /// RPC client of the active network
    pub fn client(&self) -> Arc<dyn LedgerRpc> {
        self.active
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .client
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockLedgerRpc, MockRpcConnector};

    fn connector() -> MockRpcConnector {
        let mut connector = MockRpcConnector::new();
        connector
            .expect_connect()
            .returning(|_| Ok(Arc::new(MockLedgerRpc::new()) as Arc<dyn LedgerRpc>));
        connector
    }

    #[test]
    fn test_starts_on_configured_network() {
        let config = SenderConfig {
            network: Network::Testnet,
            ..SenderConfig::default()
        };
        let context = ConnectionContext::new(&config, Arc::new(connector())).unwrap();
        assert_eq!(context.network(), Network::Testnet);
        assert_eq!(context.endpoint(), config.endpoint(Network::Testnet));
    }

    #[test]
    fn test_round_trip_keeps_endpoint() {
        let config = SenderConfig::default();
        let context = ConnectionContext::new(&config, Arc::new(connector())).unwrap();

        assert!(context.select(Network::MainnetBeta).unwrap());
        let first = context.endpoint();
        assert!(context.select(Network::Testnet).unwrap());
        assert_ne!(context.endpoint(), first);
        assert!(context.select(Network::MainnetBeta).unwrap());
        assert_eq!(context.endpoint(), first);
    }

    #[test]
    fn test_reselect_is_noop() {
        let mut connector = MockRpcConnector::new();
        connector
            .expect_connect()
            .times(1)
            .returning(|_| Ok(Arc::new(MockLedgerRpc::new()) as Arc<dyn LedgerRpc>));

        let context = ConnectionContext::new(&SenderConfig::default(), Arc::new(connector)).unwrap();
        assert!(!context.select(Network::Devnet).unwrap());
    }

    #[test]
    fn test_captured_client_survives_switch() {
        let config = SenderConfig::default();
        let context = ConnectionContext::new(&config, Arc::new(connector())).unwrap();

        let captured = context.client();
        context.select(Network::MainnetBeta).unwrap();
        assert!(!Arc::ptr_eq(&captured, &context.client()));
    }

    #[test]
    fn test_snapshot_pairs_network_with_client() {
        let config = SenderConfig::default();
        let context = ConnectionContext::new(&config, Arc::new(connector())).unwrap();

        context.select(Network::Testnet).unwrap();
        let (network, client) = context.snapshot();
        assert_eq!(network, Network::Testnet);
        assert!(Arc::ptr_eq(&client, &context.client()));
    }

    #[test]
    fn test_failed_connect_keeps_selection() {
        let mut connector = MockRpcConnector::new();
        connector
            .expect_connect()
            .withf(|endpoint| endpoint.url.contains("devnet"))
            .returning(|_| Ok(Arc::new(MockLedgerRpc::new()) as Arc<dyn LedgerRpc>));
        connector
            .expect_connect()
            .returning(|_| Err(SenderError::network("unreachable")));

        let context = ConnectionContext::new(&SenderConfig::default(), Arc::new(connector)).unwrap();
        assert!(context.select(Network::Testnet).is_err());
        assert_eq!(context.network(), Network::Devnet);
    }
}
