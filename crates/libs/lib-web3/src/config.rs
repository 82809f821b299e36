//! # Session Configuration
//!
//! Seeds the network registry and sizes the notice channel.
//!
//! Native builds (tests, tooling) load it from the environment with
//! [`Web3Config::from_env`], honoring a `.env` file. The browser build has no
//! process environment and starts from [`Web3Config::default`], applying the
//! Infura project id captured at compile time.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `WEB3_INFURA_PROJECT_ID` | appended to every Infura RPC URL | unset |
//! | `WEB3_NETWORKS_FILE` | JSON array of extra [`NetworkDescriptor`]s | unset |
//! | `WEB3_NOTICE_CAPACITY` | buffered notices per subscriber | 16 |

use crate::registry::{NetworkDescriptor, NetworkRegistry};
use std::env;
use std::fs;

pub const DEFAULT_NOTICE_CAPACITY: usize = 16;
pub const MAX_NOTICE_CAPACITY: usize = 1024;
const INFURA_HOST: &str = ".infura.io/v3/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Web3Config {
    /// Networks the UI can display and switch to
    pub registry: NetworkRegistry,

    /// Notices buffered per subscriber before the oldest are dropped
    pub notice_capacity: usize,
}

impl Default for Web3Config {
    fn default() -> Self {
        Self {
            registry: NetworkRegistry::builtin(),
            notice_capacity: DEFAULT_NOTICE_CAPACITY,
        }
    }
}

impl Web3Config {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(path) = lookup("WEB3_NETWORKS_FILE") {
            let contents = fs::read_to_string(&path)
                .map_err(|e| format!("WEB3_NETWORKS_FILE could not be read ({}): {}", path, e))?;
            let extra: Vec<NetworkDescriptor> = serde_json::from_str(&contents)
                .map_err(|e| format!("WEB3_NETWORKS_FILE is not a valid network list: {}", e))?;
            config.registry =
                NetworkRegistry::from_descriptors(config.registry.iter().cloned().chain(extra));
        }

        if let Some(project_id) = lookup("WEB3_INFURA_PROJECT_ID") {
            config = config.with_infura_project_id(&project_id);
        }

        if let Some(capacity) = lookup("WEB3_NOTICE_CAPACITY") {
            config.notice_capacity = capacity
                .parse()
                .map_err(|e| format!("WEB3_NOTICE_CAPACITY must be a valid number: {}", e))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Append an Infura project id to every Infura RPC URL that lacks one.
    pub fn with_infura_project_id(self, project_id: &str) -> Self {
        let project_id = project_id.trim();
        if project_id.is_empty() {
            return self;
        }

        let registry = NetworkRegistry::from_descriptors(self.registry.iter().cloned().map(|mut network| {
            if network.rpc_url.ends_with(INFURA_HOST) {
                network.rpc_url.push_str(project_id);
            }
            network
        }));

        Self { registry, ..self }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.notice_capacity == 0 || self.notice_capacity > MAX_NOTICE_CAPACITY {
            return Err(format!(
                "WEB3_NOTICE_CAPACITY must be between 1 and {}",
                MAX_NOTICE_CAPACITY
            ));
        }

        for network in self.registry.iter() {
            if network.chain_id.0 == 0 {
                return Err("Network chain id must be positive".to_string());
            }
            if network.name.trim().is_empty() {
                return Err(format!("Network {} has no name", network.chain_id));
            }
            if !(network.rpc_url.starts_with("https://") || network.rpc_url.starts_with("http://")) {
                return Err(format!("Network {} needs an http(s) RPC URL", network.chain_id));
            }
        }

        Ok(())
    }
}
