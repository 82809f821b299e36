//! Wallet Status Page - account, network and balance

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::web3::use_web3_context;
use crate::utils::constants::BALANCE_DISPLAY_DECIMALS;
use crate::utils::format::{format_balance, format_chain_id};

#[component]
pub fn StatusPage() -> impl IntoView {
    let web3 = use_web3_context();
    let navigate = use_navigate();

    let on_disconnect = move |_| {
        web3.disconnect();
        navigate("/", Default::default());
    };

    view! {
        <div class="page-center">
            <div class="card" style="width: 100%; max-width: 500px;">
                <h1 class="card-title">"Wallet Status"</h1>

                {move || {
                    let session = web3.session.get();
                    let disconnect = on_disconnect.clone();

                    let Some(account) = session.account else {
                        return view! {
                            <div>
                                <p class="muted">"No wallet connected"</p>
                                <A href="/">
                                    <span class="btn btn-block">"Connect Wallet"</span>
                                </A>
                            </div>
                        }.into_any();
                    };

                    let network = session
                        .network
                        .as_ref()
                        .map(|network| network.name.clone())
                        .unwrap_or_else(|| "Unavailable".to_string());
                    let chain = session
                        .chain_id
                        .map(format_chain_id)
                        .unwrap_or_else(|| "Unavailable".to_string());
                    let symbol = session
                        .network
                        .as_ref()
                        .map(|network| network.currency.clone())
                        .unwrap_or_else(|| "ETH".to_string());
                    let balance = session
                        .balance
                        .as_deref()
                        .map(|balance| format_balance(balance, BALANCE_DISPLAY_DECIMALS, &symbol))
                        .unwrap_or_else(|| "Unavailable".to_string());

                    view! {
                        <div>
                            <dl class="session-details">
                                <dt>"Account"</dt>
                                <dd class="mono">{account.to_string()}</dd>
                                <dt>"Network"</dt>
                                <dd>{network}</dd>
                                <dt>"Chain ID"</dt>
                                <dd class="mono">{chain}</dd>
                                <dt>"Balance"</dt>
                                <dd>{balance}</dd>
                            </dl>

                            <button class="btn btn-block btn-danger" on:click=disconnect>
                                "Disconnect Wallet"
                            </button>
                            <p class="muted small">
                                "Disconnecting only forgets the wallet here. Revoke site access in your wallet to remove it there."
                            </p>
                        </div>
                    }.into_any()
                }}
            </div>
        </div>
    }
}
