//! # Session Error Handling
//!
//! Two layers of errors:
//!
//! - [`ProviderError`]: what the wallet rejected a request with (EIP-1193
//!   `code` + `message`). Produced by [`WalletProvider`](crate::WalletProvider)
//!   implementations.
//! - [`SessionError`]: the typed outcome the
//!   [`SessionController`](crate::SessionController) reports to the
//!   presentation layer. Provider errors never cross that boundary raw; the
//!   controller classifies them first.
//!
//! ## Error Categories
//!
//! | Variant | Raised by | State change |
//! |---|---|---|
//! | [`ProviderUnavailable`](SessionError::ProviderUnavailable) | any command without a wallet | none |
//! | [`UserRejected`](SessionError::UserRejected) | `connect` (code 4001) | none |
//! | [`ConnectInFlight`](SessionError::ConnectInFlight) | overlapping `connect` | none |
//! | [`UnknownNetworkConfig`](SessionError::UnknownNetworkConfig) | `switch_network` | none |
//! | [`SwitchRejected`](SessionError::SwitchRejected) / [`AddChainRejected`](SessionError::AddChainRejected) | `switch_network` | none |
//! | [`PartialReconcileFailure`](SessionError::PartialReconcileFailure) | reconcile | one field absent |
//! | [`Provider`](SessionError::Provider) | any other wallet failure | none |
//!
//! None of these are fatal to the application.

use crate::types::{ChainId, ParseError};
use std::fmt;
use thiserror::Error;

/// Convenience type alias for `Result<T, SessionError>`.
pub type Result<T> = std::result::Result<T, SessionError>;

/// A request the wallet rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("wallet error {code}: {message}")]
pub struct ProviderError {
    pub code: i64,
    pub message: String,
    /// Code of a nested error, when the wallet wrapped the real one
    pub original_code: Option<i64>,
}

impl ProviderError {
    /// EIP-1193: the user rejected the request.
    pub const USER_REJECTED: i64 = 4001;
    /// EIP-1193: the requested method is not authorized.
    pub const UNAUTHORIZED: i64 = 4100;
    /// EIP-1193: the provider is disconnected from all chains.
    pub const DISCONNECTED: i64 = 4900;
    /// MetaMask: the chain has not been added to the wallet.
    pub const UNRECOGNIZED_CHAIN: i64 = 4902;
    /// JSON-RPC internal error.
    pub const INTERNAL: i64 = -32603;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            original_code: None,
        }
    }

    pub fn with_original_code(mut self, code: i64) -> Self {
        self.original_code = Some(code);
        self
    }

    /// Error for a response the wallet returned but that could not be understood.
    pub fn invalid_response(err: ParseError) -> Self {
        Self::new(Self::INTERNAL, err.to_string())
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Self::USER_REJECTED || self.original_code == Some(Self::USER_REJECTED)
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Self::UNRECOGNIZED_CHAIN || self.original_code == Some(Self::UNRECOGNIZED_CHAIN)
    }
}

/// Session field a reconcile pass could not refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileField {
    Chain,
    Balance,
}

impl fmt::Display for ReconcileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileField::Chain => f.write_str("chain id"),
            ReconcileField::Balance => f.write_str("balance"),
        }
    }
}

/// Typed outcome of a failed session operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No injected wallet in this environment.
    #[error("No wallet provider available")]
    ProviderUnavailable,

    /// The user declined the connection prompt.
    #[error("Connection rejected: {0}")]
    UserRejected(ProviderError),

    /// A connect prompt is already open.
    #[error("A connection request is already in progress")]
    ConnectInFlight,

    /// The wallet does not know the chain and neither does the registry.
    #[error("Network {0} is not configured")]
    UnknownNetworkConfig(ChainId),

    /// The wallet refused to register the chain.
    #[error("Failed to add network {chain_id}: {source}")]
    AddChainRejected {
        chain_id: ChainId,
        #[source]
        source: ProviderError,
    },

    /// The wallet refused to switch for a reason other than an unknown chain.
    #[error("Failed to switch to network {chain_id}: {source}")]
    SwitchRejected {
        chain_id: ChainId,
        #[source]
        source: ProviderError,
    },

    /// One sub-query of a reconcile failed; that field was left absent.
    #[error("Could not refresh {field}: {source}")]
    PartialReconcileFailure {
        field: ReconcileField,
        #[source]
        source: ProviderError,
    },

    /// Wallet event listeners are already attached.
    #[error("Wallet events are already being listened to")]
    AlreadyListening,

    /// Any other wallet failure.
    #[error("Wallet request failed: {0}")]
    Provider(#[from] ProviderError),
}

impl SessionError {
    /// Whether the user dismissed a wallet prompt, whatever the operation.
    pub fn is_user_rejection(&self) -> bool {
        match self {
            SessionError::UserRejected(_) => true,
            SessionError::AddChainRejected { source, .. }
            | SessionError::SwitchRejected { source, .. }
            | SessionError::Provider(source) => source.is_user_rejection(),
            _ => false,
        }
    }

    /// Message suitable for a toast.
    ///
    /// Distinguishes "install a wallet", "request rejected" and "network
    /// unknown" so the user knows what to do next.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::ProviderUnavailable => {
                "No wallet detected. Please install MetaMask to connect your wallet".to_string()
            }
            SessionError::UserRejected(_) => "Connection request was rejected in your wallet".to_string(),
            SessionError::ConnectInFlight => {
                "A connection request is already open. Check your wallet".to_string()
            }
            SessionError::UnknownNetworkConfig(chain_id) => {
                format!("Network {} is not configured and cannot be added automatically", chain_id)
            }
            SessionError::AddChainRejected { source, .. } if source.is_user_rejection() => {
                "Adding the network was rejected in your wallet".to_string()
            }
            SessionError::AddChainRejected { source, .. } => {
                format!("Could not add network to your wallet: {}", source.message)
            }
            SessionError::SwitchRejected { source, .. } if source.is_user_rejection() => {
                "Network switch was rejected in your wallet".to_string()
            }
            SessionError::SwitchRejected { source, .. } => {
                format!("Could not switch networks: {}", source.message)
            }
            SessionError::PartialReconcileFailure { field, .. } => {
                format!("Connected, but the {} could not be loaded", field)
            }
            SessionError::AlreadyListening => "Wallet events are already attached".to_string(),
            SessionError::Provider(source) => format!("Wallet request failed: {}", source.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_chain_detection() {
        assert!(ProviderError::new(4902, "Unrecognized chain ID").is_unrecognized_chain());
        assert!(ProviderError::new(-32603, "Internal error")
            .with_original_code(4902)
            .is_unrecognized_chain());
        assert!(!ProviderError::new(4001, "User rejected").is_unrecognized_chain());
    }

    #[test]
    fn test_user_rejection_across_variants() {
        let rejected = ProviderError::new(4001, "User rejected the request.");
        assert!(SessionError::UserRejected(rejected.clone()).is_user_rejection());
        assert!(SessionError::AddChainRejected { chain_id: ChainId(137), source: rejected.clone() }
            .is_user_rejection());
        assert!(!SessionError::UnknownNetworkConfig(ChainId(137)).is_user_rejection());
        assert!(!SessionError::SwitchRejected {
            chain_id: ChainId(1),
            source: ProviderError::new(-32002, "Request already pending"),
        }
        .is_user_rejection());
    }

    #[test]
    fn test_user_messages_are_distinguishable() {
        let unavailable = SessionError::ProviderUnavailable.user_message();
        let rejected = SessionError::UserRejected(ProviderError::new(4001, "no")).user_message();
        let unknown = SessionError::UnknownNetworkConfig(ChainId(137)).user_message();

        assert!(unavailable.contains("install"));
        assert!(rejected.contains("rejected"));
        assert!(unknown.contains("137"));
        assert_ne!(unavailable, rejected);
        assert_ne!(rejected, unknown);
    }

    #[test]
    fn test_display() {
        let err = SessionError::SwitchRejected {
            chain_id: ChainId(11155111),
            source: ProviderError::new(-32002, "Request already pending"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to switch to network 11155111: wallet error -32002: Request already pending"
        );
    }
}
