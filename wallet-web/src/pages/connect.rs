//! Connect Wallet Page
//!
//! Landing page. Offers the connect prompt, or points to MetaMask when no
//! wallet is injected.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::web3::use_web3_context;
use crate::utils::constants::METAMASK_DOWNLOAD_URL;

#[component]
pub fn ConnectPage() -> impl IntoView {
    let web3 = use_web3_context();

    let on_connect = move |_| web3.connect();

    view! {
        <div class="page-center">
            <div class="card" style="width: 100%; max-width: 500px;">
                <h1 class="card-title">"Connect your wallet"</h1>

                {move || {
                    if !web3.provider_present {
                        view! {
                            <div>
                                <p class="muted">"No Ethereum wallet was found in this browser."</p>
                                <a
                                    href=METAMASK_DOWNLOAD_URL
                                    target="_blank"
                                    rel="noopener noreferrer"
                                    class="btn btn-block"
                                >
                                    "Install MetaMask"
                                </a>
                            </div>
                        }.into_any()
                    } else if web3.is_connected() {
                        view! {
                            <div>
                                <p class="muted">"Your wallet is connected."</p>
                                <A href="/status">
                                    <span class="btn btn-block">"View wallet"</span>
                                </A>
                            </div>
                        }.into_any()
                    } else {
                        view! {
                            <div>
                                <p class="muted">
                                    "Connect a wallet to browse, buy and list NFTs. Approve the request in your wallet popup."
                                </p>
                                <button
                                    class="btn btn-block"
                                    disabled=move || web3.is_connecting()
                                    on:click=on_connect
                                >
                                    {move || if web3.is_connecting() { "Waiting for wallet..." } else { "Connect Wallet" }}
                                </button>
                            </div>
                        }.into_any()
                    }
                }}
            </div>
        </div>
    }
}
