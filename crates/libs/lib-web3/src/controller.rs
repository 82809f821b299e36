//! # Session Controller
//!
//! Sole writer of the [`Session`], sole issuer of wallet requests.
//!
//! ## Lifecycle
//!
//! ```text
//! SessionController::new(provider, &config)
//!         │
//!         ├── initialize()      non-prompting account check, reconcile if authorized
//!         ├── listen() + run()  wallet events → handle_event() in arrival order
//!         │
//!         ├── connect()         prompt → reconcile          (is_connecting guarded)
//!         ├── switch_network()  switch → [add] → reconcile  (see switch.rs)
//!         └── disconnect()      local clear only
//! ```
//!
//! Every path that learns something from the wallet ends in `reconcile()`,
//! which re-reads accounts, chain and balance and publishes them as one
//! update on a `watch` channel. Readers never see a half-applied session.
//!
//! ## Races
//!
//! Commands and events interleave at every wallet round trip. The last
//! reconcile to finish wins; both sides read the same wallet state, so they
//! converge. `disconnect()` does not cancel an in-flight `connect()`: if the
//! prompt is approved afterwards, the session reconnects.

use crate::config::{Web3Config, MAX_NOTICE_CAPACITY};
use crate::error::{ReconcileField, Result, SessionError};
use crate::notice::Notice;
use crate::provider::{WalletEvent, WalletProvider};
use crate::registry::{NetworkDescriptor, NetworkRegistry};
use crate::session::Session;
use crate::types::ChainId;
use std::cell::Cell;
use std::rc::Rc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

/// Result of a successful reconcile pass.
#[derive(Debug, Default)]
pub(crate) struct Reconciliation {
    /// Sub-queries that failed; their fields were left absent
    pub(crate) degraded: Vec<SessionError>,
}

/// Handle to the wallet session. Cheap to clone; clones share one session.
pub struct SessionController<P: WalletProvider> {
    pub(crate) inner: Rc<Inner<P>>,
}

pub(crate) struct Inner<P: WalletProvider> {
    pub(crate) provider: Rc<P>,
    pub(crate) registry: NetworkRegistry,
    pub(crate) state: watch::Sender<Session>,
    pub(crate) notices: broadcast::Sender<Notice>,
    pub(crate) listening: Rc<Cell<bool>>,
}

impl<P: WalletProvider> Clone for SessionController<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Holds `is_connecting` for the duration of one connect and clears it on
/// every exit, including early returns and a dropped future.
struct ConnectingGuard<'a> {
    state: &'a watch::Sender<Session>,
}

impl<'a> ConnectingGuard<'a> {
    fn acquire(state: &'a watch::Sender<Session>) -> Result<Self> {
        let acquired = state.send_if_modified(|session| {
            if session.is_connecting {
                false
            } else {
                session.is_connecting = true;
                true
            }
        });

        if acquired {
            Ok(Self { state })
        } else {
            Err(SessionError::ConnectInFlight)
        }
    }
}

impl Drop for ConnectingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|session| session.is_connecting = false);
    }
}

impl<P: WalletProvider> SessionController<P> {
    pub fn new(provider: Rc<P>, config: &Web3Config) -> Self {
        let (state, _) = watch::channel(Session::default());
        let (notices, _) = broadcast::channel(config.notice_capacity.clamp(1, MAX_NOTICE_CAPACITY));

        Self {
            inner: Rc::new(Inner {
                provider,
                registry: config.registry.clone(),
                state,
                notices,
                listening: Rc::new(Cell::new(false)),
            }),
        }
    }

    /// Current session snapshot.
    pub fn session(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Receiver that wakes on every published change.
    pub fn watch(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Receiver for toasts. Notices sent before subscribing are not replayed.
    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.inner.notices.subscribe()
    }

    pub fn registry(&self) -> &NetworkRegistry {
        &self.inner.registry
    }

    pub fn is_provider_present(&self) -> bool {
        self.inner.provider.is_present()
    }

    /// Rebuild the session from whatever the wallet already authorized.
    ///
    /// Never prompts and never fails: a missing wallet is a normal state, and
    /// wallet errors here only leave the session emptier.
    pub async fn initialize(&self) -> Session {
        if !self.inner.provider.is_present() {
            info!("No wallet provider detected, session stays empty");
            return self.session();
        }

        match self.inner.provider.list_authorized_accounts().await {
            Ok(accounts) if accounts.is_empty() => {
                debug!("Wallet present, no account authorized yet");
            }
            Ok(_) => match self.reconcile(None).await {
                Ok(reconciliation) => self.log_degraded(reconciliation.degraded),
                Err(err) => warn!(error = %err, "Initial reconcile failed"),
            },
            Err(err) => warn!(error = %err, "Could not read authorized accounts"),
        }

        let session = self.session();
        if let Some(account) = &session.account {
            info!(account = %account, chain_id = ?session.chain_id, "Restored wallet session");
        }
        session
    }

    /// Ask the wallet for account access and load the session.
    ///
    /// Suspends for as long as the wallet prompt is open.
    pub async fn connect(&self) -> Result<Session> {
        let connecting = ConnectingGuard::acquire(&self.inner.state)?;
        let result = self.request_and_reconcile().await;
        drop(connecting);

        let reconciliation = result?;
        self.report_degraded(reconciliation.degraded);

        let session = self.session();
        if let Some(account) = &session.account {
            info!(account = %account, "Wallet connected");
            self.notify(Notice::Connected {
                account: account.clone(),
            });
        }
        Ok(session)
    }

    async fn request_and_reconcile(&self) -> Result<Reconciliation> {
        if !self.inner.provider.is_present() {
            return Err(SessionError::ProviderUnavailable);
        }

        debug!("Requesting wallet accounts");
        let accounts = self.inner.provider.request_accounts().await.map_err(|err| {
            if err.is_user_rejection() {
                SessionError::UserRejected(err)
            } else {
                SessionError::Provider(err)
            }
        })?;
        debug!(count = accounts.len(), "Wallet authorized accounts");

        self.reconcile(None).await
    }

    /// Forget the local session. The wallet keeps its authorization; there is
    /// no protocol call to revoke it.
    pub fn disconnect(&self) {
        if self.clear() {
            info!("Wallet session cleared");
            self.notify(Notice::Disconnected);
        }
    }

    /// Apply one wallet-emitted event.
    ///
    /// Failures are logged and degrade the session; no command is waiting on
    /// the outcome.
    pub async fn handle_event(&self, event: WalletEvent) {
        debug!(event = %event.kind(), "Wallet event");

        match event {
            WalletEvent::AccountsChanged(accounts) if accounts.is_empty() => {
                debug!("Wallet reported no accounts");
                self.disconnect();
            }
            WalletEvent::AccountsChanged(_) => {
                let before = self.session().account;
                match self.reconcile(None).await {
                    Ok(reconciliation) => self.log_degraded(reconciliation.degraded),
                    Err(err) => {
                        warn!(error = %err, "Reconcile after account change failed");
                        return;
                    }
                }

                match self.session().account {
                    Some(account) if before.as_ref() != Some(&account) => {
                        info!(account = %account, "Active account changed");
                        self.notify(Notice::AccountChanged { account });
                    }
                    None if before.is_some() => self.notify(Notice::Disconnected),
                    _ => {}
                }
            }
            WalletEvent::ChainChanged(raw) => {
                let chain_id = match ChainId::from_hex(&raw) {
                    Ok(chain_id) => chain_id,
                    Err(err) => {
                        warn!(error = %err, "Ignoring chainChanged with unreadable payload");
                        return;
                    }
                };

                let before = self.session().chain_id;
                self.record_chain(chain_id);

                if !self.session().is_connected() {
                    return;
                }

                match self.reconcile(Some(chain_id)).await {
                    Ok(reconciliation) => self.log_degraded(reconciliation.degraded),
                    Err(err) => warn!(error = %err, "Reconcile after chain change failed"),
                }

                if before != Some(chain_id) {
                    let name = self.resolve_network(chain_id).name;
                    info!(chain_id = %chain_id, network = %name, "Wallet changed network");
                    self.notify(Notice::NetworkChanged { chain_id, name });
                }
            }
            WalletEvent::Disconnected => {
                debug!("Wallet disconnected from all chains");
                self.disconnect();
            }
        }
    }

    /// Re-derive the session from the wallet's live state.
    ///
    /// The account list is required; chain and balance are each optional and
    /// degrade to absent on failure. `chain_hint` stands in for a failed chain
    /// query when the caller already knows the chain (from an event or a
    /// confirmed switch).
    pub(crate) async fn reconcile(&self, chain_hint: Option<ChainId>) -> Result<Reconciliation> {
        let provider = &self.inner.provider;

        let accounts = provider.list_authorized_accounts().await?;
        let Some(account) = accounts.into_iter().next() else {
            debug!("No authorized accounts, clearing session");
            self.clear();
            return Ok(Reconciliation::default());
        };

        let mut degraded = Vec::new();

        let chain_id = match provider.chain_id().await {
            Ok(chain_id) => Some(chain_id),
            Err(source) => {
                degraded.push(SessionError::PartialReconcileFailure {
                    field: ReconcileField::Chain,
                    source,
                });
                chain_hint
            }
        };
        let network = chain_id.map(|chain_id| self.resolve_network(chain_id));

        let balance = match provider.balance(&account).await {
            Ok(wei) => Some(wei.to_ether_string()),
            Err(source) => {
                degraded.push(SessionError::PartialReconcileFailure {
                    field: ReconcileField::Balance,
                    source,
                });
                None
            }
        };

        let changed = self.inner.state.send_if_modified(move |session| {
            let unchanged = session.account.as_ref().map(|a| a.as_str()) == Some(account.as_str())
                && session.chain_id == chain_id
                && session.network == network
                && session.balance == balance;
            if unchanged {
                return false;
            }

            session.account = Some(account);
            session.chain_id = chain_id;
            session.network = network;
            session.balance = balance;
            true
        });
        debug!(changed, degraded = degraded.len(), "Reconciled session");

        Ok(Reconciliation { degraded })
    }

    /// Record a chain the wallet confirmed without re-reading anything else.
    ///
    /// A tracked balance belongs to the previous chain, so it is dropped until
    /// the next reconcile fetches it again.
    pub(crate) fn record_chain(&self, chain_id: ChainId) {
        let network = self.resolve_network(chain_id);
        self.inner.state.send_if_modified(move |session| {
            if session.chain_id == Some(chain_id) && session.network.as_ref() == Some(&network) {
                return false;
            }
            session.chain_id = Some(chain_id);
            session.network = Some(network);
            session.balance = None;
            true
        });
    }

    pub(crate) fn resolve_network(&self, chain_id: ChainId) -> NetworkDescriptor {
        self.inner
            .registry
            .resolve(chain_id, self.inner.provider.chain_name(chain_id))
    }

    fn clear(&self) -> bool {
        self.inner.state.send_if_modified(|session| session.clear())
    }

    pub(crate) fn notify(&self, notice: Notice) {
        // No toast subscribers is fine
        let _ = self.inner.notices.send(notice);
    }

    /// Surface partial failures of a command-initiated reconcile.
    pub(crate) fn report_degraded(&self, degraded: Vec<SessionError>) {
        for err in degraded {
            warn!(error = %err, "Session partially refreshed");
            self.notify(Notice::Degraded(err));
        }
    }

    fn log_degraded(&self, degraded: Vec<SessionError>) {
        for err in degraded {
            warn!(error = %err, "Session partially refreshed");
        }
    }
}
