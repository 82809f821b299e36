//! # Web3 Session Library
//!
//! Keeps one coherent view of an injected Ethereum wallet: active account,
//! chain, network metadata and native balance. The [`SessionController`] is
//! the only writer; the UI reads snapshots and reacts to [`Notice`]s.
//!
//! The wallet itself is abstracted behind [`WalletProvider`], so the whole
//! reconciliation logic runs (and is tested) without a browser.

pub mod config;
pub mod controller;
pub mod error;
pub mod listener;
pub mod notice;
pub mod provider;
pub mod registry;
pub mod session;
pub mod switch;
pub mod types;

// Re-export commonly used types
pub use config::Web3Config;
pub use controller::SessionController;
pub use error::{ProviderError, ReconcileField, Result, SessionError};
pub use listener::{EventStream, Subscription};
pub use notice::Notice;
pub use provider::{EventHandler, EventKind, ListenerId, WalletEvent, WalletProvider};
pub use registry::{NetworkDescriptor, NetworkRegistry};
pub use session::Session;
pub use switch::SwitchOutcome;
pub use types::{Address, ChainId, ParseError, Wei};

#[cfg(test)]
mod tests;
