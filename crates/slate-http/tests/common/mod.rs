#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use slate_core::error::StoreError;
use slate_core::{
    AccessToken, ApiUrl, Destination, MemorySessionStore, Navigator, RefreshToken, Result, Role,
    Session, SessionStore,
};
use slate_http::SessionContext;
use wiremock::MockServer;

/// Records every navigation the gateway forces.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<Destination>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<Destination> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn force_navigate(&self, destination: Destination) {
        self.visits.lock().unwrap().push(destination);
    }
}

/// A store whose writes always fail, e.g. a read-only session file.
#[derive(Debug)]
pub struct ReadOnlyStore(pub MemorySessionStore);

impl ReadOnlyStore {
    fn denied() -> slate_core::Error {
        StoreError::Io {
            path: "session.json".to_string(),
            message: "permission denied".to_string(),
        }
        .into()
    }
}

impl SessionStore for ReadOnlyStore {
    fn set(&self, _session: &Session) -> Result<()> {
        Err(Self::denied())
    }

    fn get(&self) -> Option<Session> {
        self.0.get()
    }

    fn clear(&self) -> Result<()> {
        Err(Self::denied())
    }
}

pub struct Harness {
    pub context: SessionContext,
    pub store: Arc<MemorySessionStore>,
    pub navigator: Arc<RecordingNavigator>,
}

/// Helper to create an API URL from a mock server.
pub fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}/api", server.address().port())).unwrap()
}

pub fn session(access: &str, role: Role) -> Session {
    Session::new(AccessToken::new(access), RefreshToken::new("R"), role)
}

pub fn harness(api: ApiUrl, store: MemorySessionStore) -> Harness {
    let store = Arc::new(store);
    let navigator = Arc::new(RecordingNavigator::default());
    let context = SessionContext::new(api, store.clone(), navigator.clone()).unwrap();
    Harness {
        context,
        store,
        navigator,
    }
}

pub fn anonymous(server: &MockServer) -> Harness {
    harness(mock_api_url(server), MemorySessionStore::new())
}

pub fn authenticated(server: &MockServer, access: &str) -> Harness {
    harness(
        mock_api_url(server),
        MemorySessionStore::with_session(session(access, Role::Teacher)),
    )
}
