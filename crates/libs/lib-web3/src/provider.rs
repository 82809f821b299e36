//! # Wallet Provider Capability
//!
//! The contract the session layer needs from an injected wallet. In the
//! browser it is implemented over `window.ethereum` (see the `wallet-web`
//! crate); tests implement it with a scripted mock.
//!
//! ## Method Mapping (EIP-1193)
//!
//! | Trait method | Wallet RPC | May prompt |
//! |---|---|---|
//! | [`request_accounts`](WalletProvider::request_accounts) | `eth_requestAccounts` | yes |
//! | [`list_authorized_accounts`](WalletProvider::list_authorized_accounts) | `eth_accounts` | no |
//! | [`chain_id`](WalletProvider::chain_id) | `eth_chainId` | no |
//! | [`balance`](WalletProvider::balance) | `eth_getBalance` | no |
//! | [`switch_chain`](WalletProvider::switch_chain) | `wallet_switchEthereumChain` | yes |
//! | [`add_chain`](WalletProvider::add_chain) | `wallet_addEthereumChain` | yes |
//!
//! Prompting calls can stay pending for as long as the user leaves the popup
//! open. Implementations must not add timeouts.
//!
//! ## Threading
//!
//! Browser futures are not `Send`, so the trait uses `#[async_trait(?Send)]`
//! and handlers are `Rc`. Everything runs on one event loop.

use crate::error::ProviderError;
use crate::types::{Address, ChainId, Wei};
use async_trait::async_trait;
use shared::dto::chain::AddChainParameter;
use std::fmt;
use std::rc::Rc;

/// Notification pushed by the wallet without a preceding request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    /// New list of authorized accounts, active one first. Empty on lock/revoke.
    AccountsChanged(Vec<Address>),
    /// New chain id as the raw hex string the wallet sent.
    ChainChanged(String),
    /// The wallet lost its connection to every chain.
    Disconnected,
}

impl WalletEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WalletEvent::AccountsChanged(_) => EventKind::AccountsChanged,
            WalletEvent::ChainChanged(_) => EventKind::ChainChanged,
            WalletEvent::Disconnected => EventKind::Disconnect,
        }
    }
}

/// Event names a listener can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AccountsChanged,
    ChainChanged,
    Disconnect,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::AccountsChanged, EventKind::ChainChanged, EventKind::Disconnect];

    /// Name of the event on the EIP-1193 emitter.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::AccountsChanged => "accountsChanged",
            EventKind::ChainChanged => "chainChanged",
            EventKind::Disconnect => "disconnect",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle returned by [`WalletProvider::on`], used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Callback invoked for each wallet event.
pub type EventHandler = Rc<dyn Fn(WalletEvent)>;

/// An injected wallet: request/response calls plus an event emitter.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Whether a wallet is injected at all. Synchronous, no side effects.
    fn is_present(&self) -> bool;

    /// Ask the user to authorize accounts. Rejects with code 4001 on refusal.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Accounts already authorized for this site, without prompting.
    async fn list_authorized_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    async fn chain_id(&self) -> Result<ChainId, ProviderError>;

    async fn balance(&self, address: &Address) -> Result<Wei, ProviderError>;

    /// Rejects with code 4902 when the wallet does not know the chain.
    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), ProviderError>;

    async fn add_chain(&self, parameter: &AddChainParameter) -> Result<(), ProviderError>;

    /// Register `handler` for one event kind.
    fn on(&self, kind: EventKind, handler: EventHandler) -> Result<ListenerId, ProviderError>;

    /// Remove a listener registered with [`on`](WalletProvider::on). Unknown ids are ignored.
    fn off(&self, kind: EventKind, listener: ListenerId);

    /// Display name the wallet associates with a chain, if it exposes one.
    fn chain_name(&self, _chain_id: ChainId) -> Option<String> {
        None
    }
}
