//! # Network Registry
//!
//! Static table of known chains, used to label the wallet's current network
//! and to describe a chain to the wallet when it has to be added.
//!
//! The registry is built once at startup (see [`Web3Config`](crate::Web3Config))
//! and never mutated afterwards. It is display metadata, not a security
//! authority: the chain id the wallet reports is always the truth.

use crate::types::ChainId;
use serde::{Deserialize, Serialize};
use shared::dto::chain::{AddChainParameter, NativeCurrency, NATIVE_DECIMALS};
use std::collections::BTreeMap;

/// Display name given to chains the registry does not know.
pub const UNKNOWN_NETWORK_NAME: &str = "Unknown Network";

/// Metadata for one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    pub chain_id: ChainId,
    pub name: String,
    /// Native currency symbol
    pub currency: String,
    pub rpc_url: String,
    pub block_explorer_url: String,
    #[serde(default)]
    pub is_testnet: bool,
}

impl NetworkDescriptor {
    /// Descriptor for a chain the registry has no entry for.
    ///
    /// Carries the wallet-reported name when there is one; URLs stay empty,
    /// which is why such a chain can never be added to a wallet.
    pub fn unknown(chain_id: ChainId, reported_name: Option<String>) -> Self {
        Self {
            chain_id,
            name: reported_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_NETWORK_NAME.to_string()),
            currency: "ETH".to_string(),
            rpc_url: String::new(),
            block_explorer_url: String::new(),
            is_testnet: false,
        }
    }

    /// `wallet_addEthereumChain` parameter describing this chain.
    pub fn add_chain_parameter(&self) -> AddChainParameter {
        AddChainParameter {
            chain_id: self.chain_id.to_hex(),
            chain_name: self.name.clone(),
            native_currency: NativeCurrency {
                name: self.currency.clone(),
                symbol: self.currency.clone(),
                decimals: NATIVE_DECIMALS,
            },
            rpc_urls: vec![self.rpc_url.clone()],
            block_explorer_urls: if self.block_explorer_url.is_empty() {
                vec![]
            } else {
                vec![self.block_explorer_url.clone()]
            },
        }
    }
}

/// Immutable `chain id → descriptor` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkRegistry {
    networks: BTreeMap<ChainId, NetworkDescriptor>,
}

impl NetworkRegistry {
    /// Registry seeded with Ethereum Mainnet and Sepolia.
    pub fn builtin() -> Self {
        Self::from_descriptors([
            NetworkDescriptor {
                chain_id: ChainId(1),
                name: "Ethereum Mainnet".to_string(),
                currency: "ETH".to_string(),
                rpc_url: "https://mainnet.infura.io/v3/".to_string(),
                block_explorer_url: "https://etherscan.io".to_string(),
                is_testnet: false,
            },
            NetworkDescriptor {
                chain_id: ChainId(11155111),
                name: "Sepolia".to_string(),
                currency: "SepoliaETH".to_string(),
                rpc_url: "https://sepolia.infura.io/v3/".to_string(),
                block_explorer_url: "https://sepolia.etherscan.io".to_string(),
                is_testnet: true,
            },
        ])
    }

    /// Build a registry; later descriptors replace earlier ones with the same chain id.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = NetworkDescriptor>) -> Self {
        let networks = descriptors
            .into_iter()
            .map(|descriptor| (descriptor.chain_id, descriptor))
            .collect();
        Self { networks }
    }

    pub fn get(&self, chain_id: ChainId) -> Option<&NetworkDescriptor> {
        self.networks.get(&chain_id)
    }

    pub fn contains(&self, chain_id: ChainId) -> bool {
        self.networks.contains_key(&chain_id)
    }

    /// Registered descriptor, or a synthesized unknown-network one.
    pub fn resolve(&self, chain_id: ChainId, reported_name: Option<String>) -> NetworkDescriptor {
        self.get(chain_id)
            .cloned()
            .unwrap_or_else(|| NetworkDescriptor::unknown(chain_id, reported_name))
    }

    /// Descriptors in chain id order.
    pub fn iter(&self) -> impl Iterator<Item = &NetworkDescriptor> {
        self.networks.values()
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}
