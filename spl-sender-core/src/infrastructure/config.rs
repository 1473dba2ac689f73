//! Sender configuration
//!
//! Resolved from the process environment (after loading `.env`), with safe
//! defaults for every setting.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use crate::core::wallet::KeypairSource;
use crate::domain::repositories::Endpoint;
use crate::shared::constants::*;
use crate::shared::error::SenderError;
use crate::shared::types::{Commitment, Network};

#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub network: Network,
    pub rpc_urls: HashMap<Network, String>,
    pub keypair: Option<KeypairSource>,
    pub auto_connect: bool,
    pub commitment: Commitment,
    pub notification_capacity: usize,
    pub rpc_timeout: Duration,
    pub confirm_poll_interval: Duration,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            rpc_urls: Network::ALL
                .iter()
                .map(|network| (*network, network.rpc_url().to_string()))
                .collect(),
            keypair: None,
            auto_connect: true,
            commitment: Commitment::default(),
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
            rpc_timeout: Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS),
            confirm_poll_interval: Duration::from_millis(DEFAULT_CONFIRM_POLL_MS),
        }
    }
}

impl SenderConfig {
    /// Load `.env` if present and read the configuration from the environment
    pub fn from_env() -> Result<Self, SenderError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SenderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(value) = get(ENV_NETWORK) {
            match Network::from_str(&value) {
                Ok(network) => config.network = network,
                Err(e) => errors.push(e.to_string()),
            }
        }

        for (network, key) in [
            (Network::MainnetBeta, ENV_RPC_MAINNET),
            (Network::Devnet, ENV_RPC_DEVNET),
            (Network::Testnet, ENV_RPC_TESTNET),
        ] {
            if let Some(url) = get(key) {
                config.rpc_urls.insert(network, url);
            }
        }

        config.keypair = get(ENV_KEYPAIR).map(|value| KeypairSource::parse(&value));

        if let Some(value) = get(ENV_AUTO_CONNECT) {
            match value.to_lowercase().as_str() {
                "true" | "1" | "yes" => config.auto_connect = true,
                "false" | "0" | "no" => config.auto_connect = false,
                other => errors.push(format!("{} must be true or false, got '{}'", ENV_AUTO_CONNECT, other)),
            }
        }

        if let Some(value) = get(ENV_COMMITMENT) {
            match Commitment::from_str(&value) {
                Ok(commitment) => config.commitment = commitment,
                Err(e) => errors.push(e.to_string()),
            }
        }

        if let Some(value) = get(ENV_NOTIFICATION_CAPACITY) {
            match value.parse::<usize>() {
                Ok(capacity) => config.notification_capacity = capacity,
                Err(_) => errors.push(format!("{} must be a number, got '{}'", ENV_NOTIFICATION_CAPACITY, value)),
            }
        }

        if let Some(value) = get(ENV_RPC_TIMEOUT_SECS) {
            match value.parse::<u64>() {
                Ok(secs) => config.rpc_timeout = Duration::from_secs(secs),
                Err(_) => errors.push(format!("{} must be a number, got '{}'", ENV_RPC_TIMEOUT_SECS, value)),
            }
        }

        if let Some(value) = get(ENV_CONFIRM_POLL_MS) {
            match value.parse::<u64>() {
                Ok(ms) => config.confirm_poll_interval = Duration::from_millis(ms),
                Err(_) => errors.push(format!("{} must be a number, got '{}'", ENV_CONFIRM_POLL_MS, value)),
            }
        }

        errors.extend(config.validate());
        if !errors.is_empty() {
            return Err(SenderError::config(format!(
                "Configuration validation failed: {}",
                errors.join(", ")
            )));
        }

        Ok(config)
    }

    /// Every problem with the configuration; empty when valid
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for network in Network::ALL {
            match self.rpc_urls.get(&network) {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
                Some(url) => errors.push(format!("RPC URL for {} must be http(s): '{}'", network, url)),
                None => errors.push(format!("RPC URL for {} is not set", network)),
            }
        }
        if self.notification_capacity == 0 {
            errors.push("Notification capacity must be at least 1".to_string());
        }
        if self.rpc_timeout.is_zero() {
            errors.push("RPC timeout must be greater than zero".to_string());
        }
        if self.confirm_poll_interval.is_zero() {
            errors.push("Confirmation poll interval must be greater than zero".to_string());
        }

        errors
    }

    /// Endpoint for a network. Pure, so switching back to a network always
    /// yields the same endpoint.
    pub fn endpoint(&self, network: Network) -> Endpoint {
        Endpoint {
            url: self
                .rpc_urls
                .get(&network)
                .cloned()
                .unwrap_or_else(|| network.rpc_url().to_string()),
            commitment: self.commitment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SenderConfig::from_lookup(lookup(&[])).expect("defaults are valid");
        assert_eq!(config.network, Network::Devnet);
        assert_eq!(config.commitment, Commitment::Confirmed);
        assert_eq!(config.notification_capacity, DEFAULT_NOTIFICATION_CAPACITY);
        assert!(config.auto_connect);
        assert!(config.keypair.is_none());
        assert_eq!(config.endpoint(Network::Devnet).url, "https://api.devnet.solana.com");
    }

    #[test]
    fn test_overrides() {
        let config = SenderConfig::from_lookup(lookup(&[
            (ENV_NETWORK, "mainnet-beta"),
            (ENV_RPC_MAINNET, "https://rpc.example.org"),
            (ENV_AUTO_CONNECT, "false"),
            (ENV_COMMITMENT, "finalized"),
            (ENV_NOTIFICATION_CAPACITY, "5"),
            (ENV_RPC_TIMEOUT_SECS, "3"),
            (ENV_CONFIRM_POLL_MS, "100"),
            (ENV_KEYPAIR, "/tmp/id.json"),
        ]))
        .expect("valid overrides");

        assert_eq!(config.network, Network::MainnetBeta);
        assert_eq!(config.endpoint(Network::MainnetBeta).url, "https://rpc.example.org");
        assert_eq!(config.endpoint(Network::MainnetBeta).commitment, Commitment::Finalized);
        assert!(!config.auto_connect);
        assert_eq!(config.notification_capacity, 5);
        assert_eq!(config.rpc_timeout, Duration::from_secs(3));
        assert_eq!(config.confirm_poll_interval, Duration::from_millis(100));
        assert!(matches!(config.keypair, Some(KeypairSource::File(_))));
    }

    #[test]
    fn test_all_errors_reported() {
        let err = SenderConfig::from_lookup(lookup(&[
            (ENV_NETWORK, "localnet"),
            (ENV_RPC_DEVNET, "ftp://devnet"),
            (ENV_NOTIFICATION_CAPACITY, "0"),
            (ENV_AUTO_CONNECT, "maybe"),
        ]))
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Unknown network"));
        assert!(message.contains("ftp://devnet"));
        assert!(message.contains("Notification capacity"));
        assert!(message.contains(ENV_AUTO_CONNECT));
    }

    #[test]
    fn test_endpoint_is_stable_across_switches() {
        let config = SenderConfig::default();
        let first = config.endpoint(Network::Testnet);
        let _ = config.endpoint(Network::MainnetBeta);
        assert_eq!(config.endpoint(Network::Testnet), first);
    }
}
