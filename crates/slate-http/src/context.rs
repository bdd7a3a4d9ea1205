//! The session context: login, logout and the observable current session.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use slate_core::error::AuthError;
use slate_core::{
    AccessToken, ApiUrl, Credentials, Navigator, RefreshToken, Result, Role, Session,
    SessionStore,
};

use crate::endpoints::{TOKEN, TokenRequest, TokenResponse};
use crate::gateway::{AuthGateway, read_detail};
use crate::state::SessionState;

/// Owner of the in-memory session.
///
/// Two states: anonymous (`current()` is `None`) and authenticated.
/// [`login`](Self::login) moves to authenticated, [`logout`](Self::logout)
/// and any 401 observed by the [`AuthGateway`] move back. The context never
/// navigates on its own; `login` returns the role and the caller picks the
/// destination.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
///
/// use slate_core::{ApiUrl, Credentials, Destination, MemorySessionStore, Navigator};
/// use slate_http::SessionContext;
///
/// struct Log;
///
/// impl Navigator for Log {
///     fn force_navigate(&self, destination: Destination) {
///         println!("-> {}", destination);
///     }
/// }
///
/// # async fn example() -> Result<(), slate_core::Error> {
/// let api = ApiUrl::new("http://localhost:8000/api")?;
/// let context = SessionContext::new(api, Arc::new(MemorySessionStore::new()), Arc::new(Log))?;
///
/// let role = context.login(Credentials::new("a@x.com", "good")?).await?;
/// Log.force_navigate(Destination::for_role(role));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct SessionContext {
    gateway: AuthGateway,
    state: Arc<SessionState>,
}

impl SessionContext {
    /// Create a context over a session store.
    ///
    /// Memory starts out mirroring the store, so a session persisted by an
    /// earlier run is picked up.
    pub fn new(
        api: ApiUrl,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let state = Arc::new(SessionState::new(store));
        let gateway = AuthGateway::new(api, state.clone(), navigator)?;
        Ok(Self { gateway, state })
    }

    /// The gateway every feature should issue its requests through.
    pub fn gateway(&self) -> &AuthGateway {
        &self.gateway
    }

    /// Authenticate and establish a session.
    ///
    /// Calling this while authenticated re-authenticates: a successful login
    /// replaces the session, a failed one leaves it as it was.
    ///
    /// # Errors
    ///
    /// - [`AuthError::LoginFailed`] for any non-2xx response or transport
    ///   failure, carrying the server's detail when it sent one.
    /// - [`DispatchError::UnknownRole`](slate_core::error::DispatchError::UnknownRole)
    ///   when the endpoint grants a role outside the recognized set; no
    ///   session is established.
    #[instrument(skip(self, credentials), fields(api = %self.gateway.api(), identifier = %credentials.identifier()))]
    pub async fn login(&self, credentials: Credentials) -> Result<Role> {
        info!("Logging in");

        let request = self.gateway.post(TOKEN).json(&TokenRequest {
            username: credentials.identifier(),
            password: credentials.secret(),
        });

        let response = match self.gateway.exchange(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Authentication endpoint unreachable");
                return Err(AuthError::LoginFailed {
                    status: None,
                    detail: Some(e.to_string()),
                }
                .into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let detail = read_detail(response).await;
            warn!(status = %status, "Login rejected");
            return Err(AuthError::LoginFailed {
                status: Some(status.as_u16()),
                detail,
            }
            .into());
        }

        let body: TokenResponse = response.json().await.map_err(|e| AuthError::LoginFailed {
            status: Some(status.as_u16()),
            detail: Some(format!("invalid token response: {}", e)),
        })?;

        if body.access.is_empty() || body.refresh.is_empty() {
            return Err(AuthError::LoginFailed {
                status: Some(status.as_u16()),
                detail: Some("token response is missing credentials".to_string()),
            }
            .into());
        }

        let role = body.role.parse::<Role>().inspect_err(|e| {
            warn!(error = %e, "Login granted an unrecognized role");
        })?;

        self.state.establish(Session::new(
            AccessToken::new(body.access),
            RefreshToken::new(body.refresh),
            role,
        ))?;

        info!(%role, "Logged in");
        Ok(role)
    }

    /// End the session. Calling this with no session is a no-op.
    ///
    /// If the store cannot be cleared the error is returned and the session
    /// stays in memory as well, matching what later requests will send.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<()> {
        debug!("Logging out");
        self.state.teardown()
    }

    /// Returns a snapshot of the current session.
    pub fn current(&self) -> Option<Session> {
        self.state.current()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.current().is_some()
    }

    /// Watch the session for changes, including gateway teardown.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }
}
