//! Web3 session state
//!
//! One [`SessionController`] per page load, created when the app mounts. The
//! controller owns the session; this context mirrors it into a signal for
//! rendering and turns notices and command failures into toasts.

use crate::services::InjectedEthereum;
use crate::utils::constants::{INFURA_PROJECT_ID, TOAST_DURATION_MS};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_web3::{ChainId, NetworkDescriptor, Notice, Session, SessionController, SessionError, Web3Config};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast::error::RecvError;

type Controller = SessionController<InjectedEthereum>;

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(1);

/// Banner message shown under the navbar.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

impl Toast {
    fn new(title: impl Into<String>, message: impl Into<String>, is_error: bool) -> Self {
        Self {
            id: NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed),
            title: title.into(),
            message: message.into(),
            is_error,
        }
    }

    pub fn from_notice(notice: &Notice) -> Self {
        Self::new(notice.title(), notice.description(), notice.is_warning())
    }

    pub fn from_error(err: &SessionError) -> Self {
        let title = if err.is_user_rejection() { "Request rejected" } else { "Wallet error" };
        Self::new(title, err.user_message(), true)
    }
}

/// Global web3 context
#[derive(Clone, Copy)]
pub struct Web3Context {
    pub session: RwSignal<Session>,
    pub toast: RwSignal<Option<Toast>>,
    pub provider_present: bool,
    controller: StoredValue<Controller, LocalStorage>,
}

impl Web3Context {
    fn controller(&self) -> Option<Controller> {
        self.controller.try_get_value()
    }

    pub fn is_connected(&self) -> bool {
        self.session.with(|session| session.is_connected())
    }

    pub fn is_connecting(&self) -> bool {
        self.session.with(|session| session.is_connecting)
    }

    /// Registered networks, in chain id order.
    pub fn networks(&self) -> Vec<NetworkDescriptor> {
        self.controller
            .try_with_value(|controller| controller.registry().iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn connect(&self) {
        let context = *self;
        let Some(controller) = self.controller() else { return };
        spawn_local(async move {
            if let Err(err) = controller.connect().await {
                log::warn!("connect failed: {}", err);
                context.show(Toast::from_error(&err));
            }
        });
    }

    pub fn disconnect(&self) {
        if let Some(controller) = self.controller() {
            controller.disconnect();
        }
    }

    pub fn switch_network(&self, chain_id: ChainId) {
        let context = *self;
        let Some(controller) = self.controller() else { return };
        spawn_local(async move {
            if let Err(err) = controller.switch_network(chain_id).await {
                log::warn!("switch to {} failed: {}", chain_id, err);
                context.show(Toast::from_error(&err));
            }
        });
    }

    /// Show `toast`, replacing the current one, and hide it after a while.
    pub fn show(&self, toast: Toast) {
        let id = toast.id;
        let slot = self.toast;
        if slot.try_set(Some(toast)).is_some() {
            return;
        }
        spawn_local(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            slot.try_update(|current| {
                if current.as_ref().map(|toast| toast.id) == Some(id) {
                    *current = None;
                }
            });
        });
    }

    pub fn dismiss(&self) {
        self.toast.set(None);
    }
}

fn web3_config() -> Web3Config {
    let config = match INFURA_PROJECT_ID {
        Some(project_id) => Web3Config::default().with_infura_project_id(project_id),
        None => Web3Config::default(),
    };
    if let Err(err) = config.validate() {
        log::warn!("web3 config: {}", err);
    }
    config
}

/// Create the controller, attach wallet events and restore any session the
/// wallet already authorized.
pub fn provide_web3_context() -> Web3Context {
    let provider = Rc::new(InjectedEthereum::detect());
    let controller = SessionController::new(provider, &web3_config());

    let context = Web3Context {
        session: RwSignal::new(controller.session()),
        toast: RwSignal::new(None),
        provider_present: controller.is_provider_present(),
        controller: StoredValue::new_local(controller.clone()),
    };
    provide_context(context);

    // Session -> signal
    let mut watcher = controller.watch();
    spawn_local(async move {
        while watcher.changed().await.is_ok() {
            let session = watcher.borrow_and_update().clone();
            if context.session.try_set(session).is_some() {
                break;
            }
        }
    });

    // Notices -> toasts
    let mut notices = controller.notices();
    spawn_local(async move {
        loop {
            match notices.recv().await {
                Ok(notice) => context.show(Toast::from_notice(&notice)),
                Err(RecvError::Lagged(skipped)) => log::warn!("dropped {} wallet notices", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Wallet events, detached when the app unmounts
    match controller.listen() {
        Ok((subscription, events)) => {
            let subscription = StoredValue::new_local(Some(subscription));
            on_cleanup(move || {
                if let Some(Some(subscription)) = subscription.try_update_value(Option::take) {
                    drop(subscription);
                }
            });

            let runner = controller.clone();
            spawn_local(async move { runner.run(events).await });
        }
        Err(SessionError::ProviderUnavailable) => {}
        Err(err) => log::warn!("wallet events unavailable: {}", err),
    }

    spawn_local(async move {
        controller.initialize().await;
    });

    context
}

pub fn use_web3_context() -> Web3Context {
    expect_context::<Web3Context>()
}
