use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use std::fmt;
use std::str::FromStr;

use crate::shared::error::SenderError;

// Basic types for ledger operations
pub type Lamports = u64;
pub type BaseUnits = u64;
pub type BlockHeight = u64;

// Solana clusters selectable from the network switcher
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    MainnetBeta,
    #[default]
    Devnet,
    Testnet,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::MainnetBeta, Network::Devnet, Network::Testnet];

    /// Cluster name as used by RPC providers and the explorer
    pub fn cluster(&self) -> &'static str {
        match self {
            Network::MainnetBeta => "mainnet-beta",
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
        }
    }

    /// Short label shown in the network switcher
    pub fn label(&self) -> &'static str {
        match self {
            Network::MainnetBeta => "main",
            Network::Devnet => "dev",
            Network::Testnet => "test",
        }
    }

    pub fn rpc_url(&self) -> &'static str {
        match self {
            Network::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Network::Devnet => "https://api.devnet.solana.com",
            Network::Testnet => "https://api.testnet.solana.com",
        }
    }

    pub fn block_explorer(&self) -> &'static str {
        "https://explorer.solana.com"
    }

    /// Appends the cluster query parameter for every cluster but mainnet
    pub fn with_cluster(&self, url: &str) -> String {
        match self {
            Network::MainnetBeta => url.to_string(),
            _ => {
                let mark = if url.contains('?') { '&' } else { '?' };
                format!("{}{}cluster={}", url, mark, self.cluster())
            }
        }
    }

    pub fn explorer_tx_url(&self, signature: &str) -> String {
        self.with_cluster(&format!("{}/tx/{}", self.block_explorer(), signature))
    }

    pub fn explorer_address_url(&self, address: &Pubkey) -> String {
        self.with_cluster(&format!("{}/address/{}", self.block_explorer(), address))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cluster())
    }
}

impl FromStr for Network {
    type Err = SenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet-beta" | "mainnet" | "main" => Ok(Network::MainnetBeta),
            "devnet" | "dev" => Ok(Network::Devnet),
            "testnet" | "test" => Ok(Network::Testnet),
            other => Err(SenderError::config(format!("Unknown network: {}", other))),
        }
    }
}

/// Confirmation depth required before a transaction counts as landed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }

    pub fn config(&self) -> CommitmentConfig {
        match self {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

impl FromStr for Commitment {
    type Err = SenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "processed" => Ok(Commitment::Processed),
            "confirmed" => Ok(Commitment::Confirmed),
            "finalized" => Ok(Commitment::Finalized),
            other => Err(SenderError::config(format!("Unknown commitment level: {}", other))),
        }
    }
}

/// Recent blockhash plus the last block height at which it stays valid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestBlockhash {
    pub blockhash: Hash,
    pub last_valid_block_height: BlockHeight,
}

/// Decoded SPL mint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintInfo {
    pub address: Pubkey,
    pub decimals: u8,
}

/// Decoded SPL token account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAccountInfo {
    pub address: Pubkey,
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: BaseUnits,
}
