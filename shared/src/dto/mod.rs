//! # Wallet Request Payloads
//!
//! Parameters and error objects exchanged with an injected EIP-1193 provider.
//!
//! ## Module Organization
//!
//! - [`chain`] - network switch and add-chain parameters
//! - [`rpc`] - provider rejection payloads
//!
//! ## Example JSON
//!
//! ```text
//! window.ethereum.request({
//!   method: "wallet_addEthereumChain",
//!   params: [{
//!     "chainId": "0xaa36a7",
//!     "chainName": "Sepolia",
//!     "nativeCurrency": { "name": "SepoliaETH", "symbol": "SepoliaETH", "decimals": 18 },
//!     "rpcUrls": ["https://sepolia.infura.io/v3/"],
//!     "blockExplorerUrls": ["https://sepolia.etherscan.io"]
//!   }]
//! })
//! ```

pub mod chain;
pub mod rpc;

pub use chain::*;
pub use rpc::*;
