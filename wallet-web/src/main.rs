//! NFT Marketplace Wallet Session - Leptos Frontend
//!
//! Connects an injected Ethereum wallet and keeps the account, network and
//! balance shown in the UI in step with it.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

mod app;
mod components;
mod pages;
mod services;
mod state;
pub mod utils;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // lib-web3 logs through `tracing`, which forwards to `log` and lands here
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Wallet session app starting");

    hide_loading_screen();
    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Hide the static loading screen from index.html
fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        log::warn!("No document available");
        return;
    };

    match document.get_element_by_id("leptos-loading") {
        Some(loading) => {
            if let Some(element) = loading.dyn_ref::<HtmlElement>() {
                element.class_list().add_1("hidden").ok();
            }
            loading.set_attribute("style", "display: none !important;").ok();
        }
        None => log::debug!("Loading element not found"),
    }
}
