//! # Session Controller Tests
//!
//! Scenario tests for connect, network switching and wallet events, run
//! against a scripted in-memory wallet.

mod switch;

use crate::config::Web3Config;
use crate::controller::SessionController;
use crate::error::ProviderError;
use crate::notice::Notice;
use crate::provider::{EventHandler, EventKind, ListenerId, WalletEvent, WalletProvider};
use crate::types::{Address, ChainId, Wei};
use async_trait::async_trait;
use shared::dto::chain::AddChainParameter;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tokio::sync::{broadcast, oneshot};

pub const ALICE: &str = "0x52908400098527886E0F7030069857D2E4169EE7";
pub const BOB: &str = "0x8617E340B3D01FA5F11F306F4090FD50E238070D";

pub const MAINNET: ChainId = ChainId(1);
pub const SEPOLIA: ChainId = ChainId(11155111);
/// Not in the built-in registry
pub const POLYGON: ChainId = ChainId(137);

/// 1.5 ETH
pub const ONE_AND_A_HALF: Wei = Wei(1_500_000_000_000_000_000);

pub fn address(value: &str) -> Address {
    value.parse().expect("test address should parse")
}

/// Scripted wallet. Every field can be changed between steps of a test.
pub struct MockWallet {
    pub present: Cell<bool>,
    /// What `eth_accounts` returns
    pub authorized: RefCell<Vec<Address>>,
    /// What a successful `eth_requestAccounts` authorizes
    pub grant: RefCell<Vec<Address>>,
    pub request_error: RefCell<Option<ProviderError>>,
    /// When set, `eth_requestAccounts` waits for this before answering
    pub request_gate: RefCell<Option<oneshot::Receiver<()>>>,
    pub chain: Cell<ChainId>,
    pub known_chains: RefCell<Vec<ChainId>>,
    pub balances: RefCell<HashMap<String, Wei>>,
    pub chain_error: RefCell<Option<ProviderError>>,
    pub balance_error: RefCell<Option<ProviderError>>,
    pub switch_error: RefCell<Option<ProviderError>>,
    pub add_error: RefCell<Option<ProviderError>>,
    /// Refuse listener registration for this kind
    pub refuse_listener: Cell<Option<EventKind>>,
    pub added: RefCell<Vec<AddChainParameter>>,
    calls: RefCell<Vec<&'static str>>,
    listeners: RefCell<Vec<(EventKind, ListenerId, EventHandler)>>,
    next_listener: Cell<u64>,
}

impl MockWallet {
    /// Present wallet on mainnet that knows mainnet and Sepolia, nothing authorized.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            present: Cell::new(true),
            authorized: RefCell::new(Vec::new()),
            grant: RefCell::new(Vec::new()),
            request_error: RefCell::new(None),
            request_gate: RefCell::new(None),
            chain: Cell::new(MAINNET),
            known_chains: RefCell::new(vec![MAINNET, SEPOLIA]),
            balances: RefCell::new(HashMap::new()),
            chain_error: RefCell::new(None),
            balance_error: RefCell::new(None),
            switch_error: RefCell::new(None),
            add_error: RefCell::new(None),
            refuse_listener: Cell::new(None),
            added: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(1),
        })
    }

    pub fn absent() -> Rc<Self> {
        let wallet = Self::new();
        wallet.present.set(false);
        wallet
    }

    /// Wallet that already authorized `account` for this site.
    pub fn authorized(account: &str) -> Rc<Self> {
        let wallet = Self::new();
        *wallet.authorized.borrow_mut() = vec![address(account)];
        wallet
    }

    pub fn set_balance(&self, account: &str, wei: Wei) {
        self.balances.borrow_mut().insert(account.to_lowercase(), wei);
    }

    /// How often `method` was called.
    pub fn calls(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|call| **call == method).count()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Fire an event at every matching listener, like the wallet would.
    pub fn emit(&self, event: WalletEvent) {
        let kind = event.kind();
        let handlers: Vec<EventHandler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, _, handler)| Rc::clone(handler))
            .collect();

        for handler in handlers {
            handler(event.clone());
        }
    }

    fn record(&self, method: &'static str) {
        self.calls.borrow_mut().push(method);
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockWallet {
    fn is_present(&self) -> bool {
        self.present.get()
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.record("eth_requestAccounts");

        let gate = self.request_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if let Some(err) = self.request_error.borrow().clone() {
            return Err(err);
        }

        let granted = self.grant.borrow().clone();
        if !granted.is_empty() {
            *self.authorized.borrow_mut() = granted;
        }
        Ok(self.authorized.borrow().clone())
    }

    async fn list_authorized_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.record("eth_accounts");
        Ok(self.authorized.borrow().clone())
    }

    async fn chain_id(&self) -> Result<ChainId, ProviderError> {
        self.record("eth_chainId");
        match self.chain_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(self.chain.get()),
        }
    }

    async fn balance(&self, address: &Address) -> Result<Wei, ProviderError> {
        self.record("eth_getBalance");
        if let Some(err) = self.balance_error.borrow().clone() {
            return Err(err);
        }
        Ok(self
            .balances
            .borrow()
            .get(&address.as_str().to_lowercase())
            .copied()
            .unwrap_or_default())
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), ProviderError> {
        self.record("wallet_switchEthereumChain");
        if let Some(err) = self.switch_error.borrow().clone() {
            return Err(err);
        }
        if !self.known_chains.borrow().contains(&chain_id) {
            return Err(ProviderError::new(
                ProviderError::UNRECOGNIZED_CHAIN,
                format!("Unrecognized chain ID \"{}\"", chain_id.to_hex()),
            ));
        }
        self.chain.set(chain_id);
        Ok(())
    }

    async fn add_chain(&self, parameter: &AddChainParameter) -> Result<(), ProviderError> {
        self.record("wallet_addEthereumChain");
        if let Some(err) = self.add_error.borrow().clone() {
            return Err(err);
        }
        let chain_id = ChainId::from_hex(&parameter.chain_id).map_err(ProviderError::invalid_response)?;
        self.known_chains.borrow_mut().push(chain_id);
        self.chain.set(chain_id);
        self.added.borrow_mut().push(parameter.clone());
        Ok(())
    }

    fn on(&self, kind: EventKind, handler: EventHandler) -> Result<ListenerId, ProviderError> {
        if self.refuse_listener.get() == Some(kind) {
            return Err(ProviderError::new(ProviderError::INTERNAL, "listener refused"));
        }
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((kind, id, handler));
        Ok(id)
    }

    fn off(&self, kind: EventKind, listener: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|(k, id, _)| !(*k == kind && *id == listener));
    }
}

/// Controller over `wallet` with the built-in registry.
pub fn setup_controller(wallet: &Rc<MockWallet>) -> SessionController<MockWallet> {
    init_tracing();
    SessionController::new(Rc::clone(wallet), &Web3Config::default())
}

/// Show controller logs with `RUST_LOG=lib_web3=debug cargo test`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Notices received so far.
pub fn drain(notices: &mut broadcast::Receiver<Notice>) -> Vec<Notice> {
    let mut received = Vec::new();
    while let Ok(notice) = notices.try_recv() {
        received.push(notice);
    }
    received
}
