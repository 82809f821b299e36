//! # Network Switching
//!
//! ```text
//! switch_network(target)
//!     │
//!     ├── wallet_switchEthereumChain ── ok ──────────────────────────┐
//!     │        │                                                     │
//!     │        ├── 4902, target not in registry → UnknownNetworkConfig
//!     │        ├── 4902, target in registry                          │
//!     │        │        └── wallet_addEthereumChain ── ok ───────────┤
//!     │        │                     └── err → AddChainRejected      │
//!     │        └── any other error → SwitchRejected                  │
//!     │                                                              ▼
//!     └────────────────────────────────────────────── refresh session
//! ```
//!
//! Wallets switch to a chain right after adding it, so the add path does not
//! issue a second switch. The session is only touched after the wallet
//! confirmed; every failure leaves it exactly as it was.

use crate::controller::SessionController;
use crate::error::{Result, SessionError};
use crate::notice::Notice;
use crate::provider::WalletProvider;
use crate::session::Session;
use crate::types::ChainId;
use tracing::{debug, info, warn};

/// How a successful switch reached the target chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The wallet already knew the chain.
    Switched(Session),
    /// The chain was registered with the wallet first.
    Added(Session),
}

impl SwitchOutcome {
    pub fn session(&self) -> &Session {
        match self {
            SwitchOutcome::Switched(session) | SwitchOutcome::Added(session) => session,
        }
    }

    pub fn into_session(self) -> Session {
        match self {
            SwitchOutcome::Switched(session) | SwitchOutcome::Added(session) => session,
        }
    }

    pub fn was_added(&self) -> bool {
        matches!(self, SwitchOutcome::Added(_))
    }
}

impl<P: WalletProvider> SessionController<P> {
    /// Move the wallet to `target`, registering the chain when the wallet
    /// does not know it yet.
    ///
    /// Works without a connected account: only the chain fields are updated
    /// then.
    pub async fn switch_network(&self, target: ChainId) -> Result<SwitchOutcome> {
        let provider = &self.inner.provider;
        if !provider.is_present() {
            return Err(SessionError::ProviderUnavailable);
        }

        debug!(chain_id = %target, "Requesting network switch");
        match provider.switch_chain(target).await {
            Ok(()) => {
                let session = self.refresh_after_switch(target).await?;
                let name = self.resolve_network(target).name;
                info!(chain_id = %target, network = %name, "Switched network");
                self.notify(Notice::NetworkSwitched { name });
                Ok(SwitchOutcome::Switched(session))
            }
            Err(err) if err.is_unrecognized_chain() => {
                debug!(chain_id = %target, "Wallet does not know the network");
                self.register_network(target).await
            }
            Err(source) => {
                warn!(chain_id = %target, error = %source, "Network switch rejected");
                Err(SessionError::SwitchRejected {
                    chain_id: target,
                    source,
                })
            }
        }
    }

    async fn register_network(&self, target: ChainId) -> Result<SwitchOutcome> {
        let Some(network) = self.registry().get(target).cloned() else {
            warn!(chain_id = %target, "No registry entry to add the network from");
            return Err(SessionError::UnknownNetworkConfig(target));
        };

        debug!(chain_id = %target, network = %network.name, "Adding network to wallet");
        self.inner
            .provider
            .add_chain(&network.add_chain_parameter())
            .await
            .map_err(|source| {
                warn!(chain_id = %target, error = %source, "Adding network rejected");
                SessionError::AddChainRejected {
                    chain_id: target,
                    source,
                }
            })?;

        let session = self.refresh_after_switch(target).await?;
        info!(chain_id = %target, network = %network.name, "Added and switched network");
        self.notify(Notice::NetworkAdded { name: network.name });
        Ok(SwitchOutcome::Added(session))
    }

    async fn refresh_after_switch(&self, target: ChainId) -> Result<Session> {
        if self.session().is_connected() {
            let reconciliation = self.reconcile(Some(target)).await?;
            self.report_degraded(reconciliation.degraded);
        } else {
            self.record_chain(target);
        }
        Ok(self.session())
    }
}
