//! Wallet Session App - Leptos Frontend

use leptos::prelude::*;
use leptos_router::{
    components::{A, Route, Router, Routes},
    path,
};

use crate::components::{Navbar, ToastBanner};
use crate::pages::{ConnectPage, NetworkPage, StatusPage};
use crate::state::web3::provide_web3_context;

#[component]
pub fn App() -> impl IntoView {
    provide_web3_context();

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <ToastBanner/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=ConnectPage/>
                    <Route path=path!("/status") view=StatusPage/>
                    <Route path=path!("/network") view=NetworkPage/>
                </Routes>
            </div>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page-center">
            <div class="card" style="max-width: 500px; text-align: center;">
                <h1 class="card-title">"404 - Page Not Found"</h1>
                <p class="muted">"The page you're looking for doesn't exist."</p>
                <A href="/">
                    <span class="btn" style="margin-top: 20px; display: inline-block;">
                        "Go to Home"
                    </span>
                </A>
            </div>
        </div>
    }
}
