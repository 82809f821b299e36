//! Session snapshot published to the presentation layer.

use crate::registry::NetworkDescriptor;
use crate::types::{Address, ChainId};
use serde::Serialize;

/// Everything the UI needs to know about the wallet connection.
///
/// Always handed out as an owned snapshot; the controller is the only writer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Active account, the first one the wallet authorized
    pub account: Option<Address>,
    /// Chain the wallet currently reports
    pub chain_id: Option<ChainId>,
    /// Registry entry (or synthesized descriptor) for `chain_id`
    pub network: Option<NetworkDescriptor>,
    /// Native balance of `account` in whole units, e.g. `"1.5"`
    pub balance: Option<String>,
    /// True only while a connect prompt is open
    pub is_connecting: bool,
}

impl Session {
    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// Reset the wallet-derived fields; `is_connecting` belongs to the connect
    /// command and is left alone. Returns whether anything changed.
    pub(crate) fn clear(&mut self) -> bool {
        let changed = self.account.is_some()
            || self.chain_id.is_some()
            || self.network.is_some()
            || self.balance.is_some();

        self.account = None;
        self.chain_id = None;
        self.network = None;
        self.balance = None;

        changed
    }
}
