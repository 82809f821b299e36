//! Navigation Bar Component
//!
//! Title, page links and the wallet chip: a connect button while
//! disconnected, the network and truncated account once connected.

use leptos::prelude::*;
use leptos_router::components::A;
use shared::utils::truncate_address;

use crate::state::web3::use_web3_context;

#[component]
pub fn Navbar() -> impl IntoView {
    let web3 = use_web3_context();

    let on_connect = move |_| web3.connect();

    view! {
        <nav>
            <div class="nav-inner">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">"NFT Marketplace"</span>
                </A>
                <div class="nav-links">
                    <A href="/status" attr:class="nav-link">"Wallet"</A>
                    <A href="/network" attr:class="nav-link">"Network"</A>
                </div>
                {move || {
                    let session = web3.session.get();
                    match session.account {
                        Some(account) => {
                            let network = session
                                .network
                                .map(|network| network.name)
                                .unwrap_or_else(|| "Unknown network".to_string());
                            view! {
                                <div class="wallet-chip">
                                    <span class="network-badge">{network}</span>
                                    <span class="account" title=account.to_string()>
                                        {truncate_address(account.as_str())}
                                    </span>
                                </div>
                            }.into_any()
                        }
                        None => view! {
                            <button
                                class="btn"
                                disabled=move || web3.is_connecting()
                                on:click=on_connect
                            >
                                {move || if web3.is_connecting() { "Connecting..." } else { "Connect Wallet" }}
                            </button>
                        }.into_any(),
                    }
                }}
            </div>
        </nav>
    }
}
