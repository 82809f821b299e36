//! Toast banner for session notices and command failures

use leptos::prelude::*;

use crate::state::web3::use_web3_context;

#[component]
pub fn ToastBanner() -> impl IntoView {
    let web3 = use_web3_context();

    move || {
        web3.toast.get().map(|toast| {
            let class = if toast.is_error { "toast toast-error" } else { "toast" };
            view! {
                <div class=class role="status">
                    <strong>{toast.title}</strong>
                    <span>{toast.message}</span>
                    <button class="toast-close" on:click=move |_| web3.dismiss()>"×"</button>
                </div>
            }
        })
    }
}
