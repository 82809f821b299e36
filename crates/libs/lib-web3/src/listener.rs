//! # Wallet Event Subscription
//!
//! Wallet events arrive as callbacks. The handlers registered here only
//! forward into an unbounded channel; [`SessionController::run`] drains it
//! and applies events one at a time, in arrival order.
//!
//! ```text
//! provider.on(kind, handler) ──► mpsc ──► run() ──► handle_event()
//! ```
//!
//! Dropping the [`Subscription`] removes every listener. That drops the
//! channel senders held by the handlers, which ends `run()`.

use crate::controller::SessionController;
use crate::error::{Result, SessionError};
use crate::provider::{EventHandler, EventKind, ListenerId, WalletEvent, WalletProvider};
use std::cell::Cell;
use std::rc::Rc;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Attached wallet listeners. Detaches all of them on drop.
pub struct Subscription<P: WalletProvider> {
    provider: Rc<P>,
    listeners: Vec<(EventKind, ListenerId)>,
    listening: Rc<Cell<bool>>,
}

impl<P: WalletProvider> Subscription<P> {
    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<P: WalletProvider> Drop for Subscription<P> {
    fn drop(&mut self) {
        for (kind, listener) in self.listeners.drain(..) {
            self.provider.off(kind, listener);
        }
        self.listening.set(false);
        debug!("Wallet listeners detached");
    }
}

/// Receiving end of the wallet event queue.
pub struct EventStream {
    receiver: mpsc::UnboundedReceiver<WalletEvent>,
}

impl EventStream {
    /// Next event, or `None` once the subscription is gone.
    pub async fn next(&mut self) -> Option<WalletEvent> {
        self.receiver.recv().await
    }
}

impl<P: WalletProvider + 'static> SessionController<P> {
    /// Attach listeners for every [`EventKind`].
    ///
    /// At most one subscription exists per controller. If the wallet refuses
    /// one registration, the ones already made are removed again.
    pub fn listen(&self) -> Result<(Subscription<P>, EventStream)> {
        if !self.inner.provider.is_present() {
            return Err(SessionError::ProviderUnavailable);
        }
        if self.inner.listening.replace(true) {
            return Err(SessionError::AlreadyListening);
        }

        let (sender, receiver) = mpsc::unbounded_channel();
        let mut subscription = Subscription {
            provider: Rc::clone(&self.inner.provider),
            listeners: Vec::with_capacity(EventKind::ALL.len()),
            listening: Rc::clone(&self.inner.listening),
        };

        for kind in EventKind::ALL {
            let sender = sender.clone();
            let handler: EventHandler = Rc::new(move |event: WalletEvent| {
                if sender.send(event).is_err() {
                    trace!("Wallet event after the stream closed");
                }
            });
            let listener = self.inner.provider.on(kind, handler)?;
            subscription.listeners.push((kind, listener));
        }

        debug!(listeners = subscription.len(), "Wallet listeners attached");
        Ok((subscription, EventStream { receiver }))
    }

    /// Apply events until the subscription is dropped.
    pub async fn run(&self, mut events: EventStream) {
        while let Some(event) = events.next().await {
            self.handle_event(event).await;
        }
        debug!("Wallet event stream closed");
    }
}
