//! Shared session state: the store plus its in-memory mirror.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use slate_core::{Result, Session, SessionStore};

/// The only writer of the session store.
///
/// Shared between [`SessionContext`](crate::SessionContext), which
/// establishes and ends sessions, and [`AuthGateway`](crate::AuthGateway),
/// which reads the access token and tears the session down on 401. Each
/// mutation updates the store and the in-memory copy in the same call, so
/// observers never see the two disagree.
pub(crate) struct SessionState {
    store: Arc<dyn SessionStore>,
    current: watch::Sender<Option<Session>>,
}

impl SessionState {
    /// Create the state, hydrating memory from whatever the store holds.
    pub(crate) fn new(store: Arc<dyn SessionStore>) -> Self {
        let initial = store.get();
        if initial.is_some() {
            debug!("Restored session from store");
        }
        let (current, _) = watch::channel(initial);
        Self { store, current }
    }

    pub(crate) fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    pub(crate) fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }

    /// Persist a new session and publish it.
    ///
    /// The store write happens under the channel's write lock, so a
    /// concurrent [`teardown`](Self::teardown) runs entirely before or after
    /// it. Memory is left unchanged when the store rejects the session.
    pub(crate) fn establish(&self, session: Session) -> Result<()> {
        let mut result = Ok(());
        self.current.send_if_modified(|current| match self.store.set(&session) {
            Ok(()) => {
                *current = Some(session);
                true
            }
            Err(e) => {
                result = Err(e);
                false
            }
        });
        result
    }

    /// Remove the session from the store and from memory.
    ///
    /// Idempotent. When the store cannot be cleared, memory keeps the
    /// session too and the store error is returned.
    pub(crate) fn teardown(&self) -> Result<()> {
        let mut result = Ok(());
        self.current.send_if_modified(|current| match self.store.clear() {
            Ok(()) => {
                let ended = current.take().is_some();
                if ended {
                    debug!("Session torn down");
                }
                ended
            }
            Err(e) => {
                warn!(error = %e, "Failed to clear session store");
                result = Err(e);
                false
            }
        });
        result
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("authenticated", &self.current.borrow().is_some())
            .finish()
    }
}
