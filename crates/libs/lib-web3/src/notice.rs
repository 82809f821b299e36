//! User-facing notices about session changes, rendered as toasts by the UI.

use crate::error::SessionError;
use crate::types::{Address, ChainId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// `connect` finished with this active account.
    Connected { account: Address },
    /// The wallet switched the active account.
    AccountChanged { account: Address },
    /// The session was cleared, locally or by the wallet.
    Disconnected,
    /// The wallet moved to another chain on its own.
    NetworkChanged { chain_id: ChainId, name: String },
    /// `switch_network` moved to a chain the wallet already knew.
    NetworkSwitched { name: String },
    /// `switch_network` had to register the chain first.
    NetworkAdded { name: String },
    /// A command succeeded but a reconcile sub-query failed.
    Degraded(SessionError),
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::Connected { .. } => "Wallet connected",
            Notice::AccountChanged { .. } => "Account changed",
            Notice::Disconnected => "Wallet disconnected",
            Notice::NetworkChanged { .. } => "Network changed",
            Notice::NetworkSwitched { .. } => "Network switched",
            Notice::NetworkAdded { .. } => "Network added",
            Notice::Degraded(_) => "Wallet partially loaded",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Notice::Connected { account } | Notice::AccountChanged { account } => {
                format!("Connected to {}", shared::utils::truncate_address(account.as_str()))
            }
            Notice::Disconnected => String::new(),
            Notice::NetworkChanged { name, .. } => format!("Switched to {}", name),
            Notice::NetworkSwitched { name } => format!("Switched to {}", name),
            Notice::NetworkAdded { name } => format!("Added and switched to {}", name),
            Notice::Degraded(err) => err.user_message(),
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Notice::Degraded(_))
    }
}
