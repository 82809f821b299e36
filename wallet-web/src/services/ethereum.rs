//! Injected Ethereum Provider via wasm-bindgen
//!
//! Binds `window.ethereum` (EIP-1193) to the [`WalletProvider`] trait. Only
//! `request`, `on` and `removeListener` are used, so any compliant wallet
//! works, not just MetaMask.

use async_trait::async_trait;
use js_sys::{Array, Function, Object, Promise, Reflect};
use lib_web3::{
    Address, ChainId, EventHandler, EventKind, ListenerId, ProviderError, WalletEvent, WalletProvider, Wei,
};
use shared::dto::chain::{AddChainParameter, SwitchChainParameter};
use shared::dto::rpc::RpcErrorPayload;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

type JsListener = Closure<dyn FnMut(JsValue)>;

/// `window.ethereum`, if a wallet injected one.
pub struct InjectedEthereum {
    ethereum: Option<JsValue>,
    listeners: RefCell<HashMap<ListenerId, (EventKind, JsListener)>>,
    next_listener: Cell<u64>,
}

impl InjectedEthereum {
    /// Look up the injected provider once. Wallets inject before page scripts
    /// run, so a missing provider stays missing for this page load.
    pub fn detect() -> Self {
        let ethereum = web_sys::window()
            .and_then(|window| Reflect::get(&window, &JsValue::from_str("ethereum")).ok())
            .filter(|value| !value.is_undefined() && !value.is_null());

        match &ethereum {
            Some(_) => log::info!("Injected Ethereum provider detected"),
            None => log::info!("No injected Ethereum provider"),
        }

        Self {
            ethereum,
            listeners: RefCell::new(HashMap::new()),
            next_listener: Cell::new(1),
        }
    }

    fn ethereum(&self) -> Result<&JsValue, ProviderError> {
        self.ethereum
            .as_ref()
            .ok_or_else(|| ProviderError::new(ProviderError::DISCONNECTED, "No injected wallet"))
    }

    fn method(&self, name: &str) -> Result<Function, ProviderError> {
        Reflect::get(self.ethereum()?, &JsValue::from_str(name))
            .and_then(|value| value.dyn_into::<Function>().map_err(JsValue::from))
            .map_err(|_| ProviderError::new(ProviderError::INTERNAL, format!("ethereum.{} is not a function", name)))
    }

    /// `ethereum.request({ method, params })`
    async fn request(&self, method: &str, params: Option<JsValue>) -> Result<JsValue, ProviderError> {
        let ethereum = self.ethereum()?;
        let request = self.method("request")?;

        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method)).map_err(to_provider_error)?;
        if let Some(params) = params {
            Reflect::set(&args, &JsValue::from_str("params"), &params).map_err(to_provider_error)?;
        }

        let promise: Promise = request
            .call1(ethereum, &args)
            .map_err(to_provider_error)?
            .dyn_into()
            .map_err(|_| ProviderError::new(ProviderError::INTERNAL, "ethereum.request did not return a promise"))?;

        log::debug!("wallet request: {}", method);
        JsFuture::from(promise).await.map_err(to_provider_error)
    }

    async fn request_addresses(&self, method: &str) -> Result<Vec<Address>, ProviderError> {
        let value = self.request(method, None).await?;
        parse_addresses(value)
    }
}

#[async_trait(?Send)]
impl WalletProvider for InjectedEthereum {
    fn is_present(&self) -> bool {
        self.ethereum.is_some()
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.request_addresses("eth_requestAccounts").await
    }

    async fn list_authorized_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.request_addresses("eth_accounts").await
    }

    async fn chain_id(&self) -> Result<ChainId, ProviderError> {
        let value = self.request("eth_chainId", None).await?;
        let hex = value
            .as_string()
            .ok_or_else(|| ProviderError::new(ProviderError::INTERNAL, "eth_chainId returned a non-string"))?;
        ChainId::from_hex(&hex).map_err(ProviderError::invalid_response)
    }

    async fn balance(&self, address: &Address) -> Result<Wei, ProviderError> {
        let params = Array::of2(&JsValue::from_str(address.as_str()), &JsValue::from_str("latest"));
        let value = self.request("eth_getBalance", Some(params.into())).await?;
        let hex = value
            .as_string()
            .ok_or_else(|| ProviderError::new(ProviderError::INTERNAL, "eth_getBalance returned a non-string"))?;
        Wei::from_hex(&hex).map_err(ProviderError::invalid_response)
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), ProviderError> {
        let params = to_params(&[SwitchChainParameter {
            chain_id: chain_id.to_hex(),
        }])?;
        self.request("wallet_switchEthereumChain", Some(params)).await?;
        Ok(())
    }

    async fn add_chain(&self, parameter: &AddChainParameter) -> Result<(), ProviderError> {
        let params = to_params(std::slice::from_ref(parameter))?;
        self.request("wallet_addEthereumChain", Some(params)).await?;
        Ok(())
    }

    fn on(&self, kind: EventKind, handler: EventHandler) -> Result<ListenerId, ProviderError> {
        let ethereum = self.ethereum()?;
        let on = self.method("on")?;

        let listener: JsListener = Closure::new(move |payload: JsValue| match decode_event(kind, payload) {
            Some(event) => handler(event),
            None => log::warn!("Ignoring malformed {} payload", kind),
        });

        on.call2(ethereum, &JsValue::from_str(kind.as_str()), listener.as_ref().unchecked_ref())
            .map_err(to_provider_error)?;

        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().insert(id, (kind, listener));
        Ok(id)
    }

    fn off(&self, kind: EventKind, listener: ListenerId) {
        let Some((_, closure)) = self.listeners.borrow_mut().remove(&listener) else {
            return;
        };

        let removed = self.ethereum().ok().zip(self.method("removeListener").ok()).map(|(ethereum, remove)| {
            remove.call2(ethereum, &JsValue::from_str(kind.as_str()), closure.as_ref().unchecked_ref())
        });
        if !matches!(removed, Some(Ok(_))) {
            // The wallet may still call it; freeing it would trap on the next event
            log::warn!("Could not remove {} listener from the wallet, leaking it", kind);
            closure.forget();
        }
    }
}

fn to_params<T: serde::Serialize>(params: &[T]) -> Result<JsValue, ProviderError> {
    serde_wasm_bindgen::to_value(params)
        .map_err(|e| ProviderError::new(ProviderError::INTERNAL, format!("Could not encode params: {}", e)))
}

fn parse_addresses(value: JsValue) -> Result<Vec<Address>, ProviderError> {
    let raw: Vec<String> = serde_wasm_bindgen::from_value(value)
        .map_err(|e| ProviderError::new(ProviderError::INTERNAL, format!("Unexpected accounts payload: {}", e)))?;
    raw.iter()
        .map(|account| account.parse().map_err(ProviderError::invalid_response))
        .collect()
}

fn decode_event(kind: EventKind, payload: JsValue) -> Option<WalletEvent> {
    match kind {
        EventKind::AccountsChanged => parse_addresses(payload).ok().map(WalletEvent::AccountsChanged),
        EventKind::ChainChanged => payload.as_string().map(WalletEvent::ChainChanged),
        EventKind::Disconnect => Some(WalletEvent::Disconnected),
    }
}

/// Map a rejected promise to a [`ProviderError`].
///
/// Wallets reject with `{ code, message, data }` objects, `Error` instances
/// or plain strings.
fn to_provider_error(value: JsValue) -> ProviderError {
    let payload: RpcErrorPayload = serde_wasm_bindgen::from_value(value.clone()).unwrap_or_default();

    let message = payload
        .message
        .clone()
        .or_else(|| value.as_string())
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| "Unknown wallet error".to_string());

    let error = ProviderError::new(payload.code.unwrap_or(ProviderError::INTERNAL), message);
    match payload.original_code() {
        Some(code) => error.with_original_code(code),
        None => error,
    }
}
