//! # Shared Wire Types and Utilities
//!
//! Types shared between the session library (`lib-web3`) and the browser app
//! (`wallet-web`). Everything here mirrors what actually crosses the EIP-1193
//! boundary, so field names follow the wallet's JSON, not Rust conventions.
//!
//! ## Structure
//!
//! - **[`dto`]**: request/response payloads for `window.ethereum.request`
//!   - **[`dto::chain`]**: `wallet_switchEthereumChain` / `wallet_addEthereumChain` parameters
//!   - **[`dto::rpc`]**: the error object wallets reject with
//! - **[`utils`]**: display helpers
//!   - **[`utils::truncate_address`]**: `0x1234...abcd` style addresses
//!   - **[`utils::format_ether`]**: wei → whole-unit decimal string
//!
//! ## Wire Format
//!
//! Wallets speak camelCase JSON, so every DTO uses
//! `#[serde(rename_all = "camelCase")]`. Chain ids travel as `0x`-prefixed
//! lowercase hex strings.
//!
//! ```rust
//! use shared::dto::chain::SwitchChainParameter;
//!
//! let param = SwitchChainParameter { chain_id: "0xaa36a7".to_string() };
//! let json = serde_json::to_string(&param).unwrap();
//! assert_eq!(json, r#"{"chainId":"0xaa36a7"}"#);
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
