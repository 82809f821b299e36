//! Network Page - switch the wallet between registered networks

use leptos::prelude::*;

use crate::state::web3::use_web3_context;
use crate::utils::format::format_chain_id;

#[component]
pub fn NetworkPage() -> impl IntoView {
    let web3 = use_web3_context();
    let networks = web3.networks();

    let current = move || web3.session.with(|session| session.chain_id);

    view! {
        <div class="page-center">
            <div class="card" style="width: 100%; max-width: 600px;">
                <h1 class="card-title">"Network"</h1>
                <p class="muted">
                    {move || match web3.session.with(|session| session.network.clone()) {
                        Some(network) => format!("Your wallet is on {}", network.name),
                        None => "Your wallet has not reported a network yet".to_string(),
                    }}
                </p>

                <ul class="network-list">
                    {networks
                        .into_iter()
                        .map(|network| {
                            let chain_id = network.chain_id;
                            let is_current = move || current() == Some(chain_id);
                            view! {
                                <li class="network-row" class:active=is_current>
                                    <div>
                                        <strong>{network.name.clone()}</strong>
                                        {network.is_testnet.then(|| view! { <span class="badge">"Testnet"</span> })}
                                        <div class="muted mono small">{format_chain_id(chain_id)}</div>
                                    </div>
                                    <button
                                        class="btn"
                                        disabled=move || is_current() || !web3.provider_present
                                        on:click=move |_| web3.switch_network(chain_id)
                                    >
                                        {move || if is_current() { "Current" } else { "Switch" }}
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}
