//! The authenticating HTTP gateway.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace, warn};

use slate_core::error::{AuthError, Error, ProtocolError, TransportError};
use slate_core::{ApiUrl, Destination, Navigator, Result};

use crate::endpoints::ErrorResponse;
use crate::state::SessionState;

/// What the response stage does with a failure status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Clear the session and force navigation to the login entry point.
    pub teardown: bool,
}

/// Decide how to react to a non-success status.
///
/// Only 401 ends the session. Every other status is returned to the caller
/// untouched.
pub fn decide(status: StatusCode) -> Decision {
    Decision {
        teardown: status == StatusCode::UNAUTHORIZED,
    }
}

pub(crate) fn map_transport(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let err = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else if err.is_decode() {
        TransportError::Decode { message }
    } else {
        TransportError::Http { message }
    };
    Error::Transport(err)
}

/// Pull a human-readable detail out of an error response body.
///
/// Prefers the API's `{"detail": ...}` field and falls back to the raw body.
pub(crate) async fn read_detail(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            detail: Some(detail),
        }) => Some(detail),
        _ => Some(body.to_string()),
    }
}

/// HTTP client wrapper through which every API request flows.
///
/// Requests pass through [`before_send`](Self::before_send), which attaches
/// the stored access token as a bearer header, and responses through
/// [`on_response`](Self::on_response), which tears the session down on 401.
/// Cheap to clone; clones share the client and the session state.
#[derive(Clone)]
pub struct AuthGateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    api: ApiUrl,
    client: reqwest::Client,
    state: Arc<SessionState>,
    navigator: Arc<dyn Navigator>,
}

impl AuthGateway {
    pub(crate) fn new(
        api: ApiUrl,
        state: Arc<SessionState>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("slate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_transport)?;

        Ok(Self {
            inner: Arc::new(GatewayInner {
                api,
                client,
                state,
                navigator,
            }),
        })
    }

    /// Returns the API base URL this gateway talks to.
    pub fn api(&self) -> &ApiUrl {
        &self.inner.api
    }

    /// Start a request to an API path.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.inner
            .client
            .request(method, self.inner.api.endpoint(path))
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    /// Request stage: attach the stored access token, if any.
    ///
    /// Requests made with no session proceed unchanged.
    pub fn before_send(&self, request: RequestBuilder) -> RequestBuilder {
        match self.inner.state.store().get() {
            Some(session) => {
                trace!("Attaching bearer credential");
                request.bearer_auth(session.access_token().as_str())
            }
            None => request,
        }
    }

    /// Response stage.
    ///
    /// Successful responses pass through unchanged. A 401 tears the session
    /// down and forces navigation to the login entry point before the
    /// request fails with [`AuthError::AuthorizationExpired`]. Other
    /// statuses and transport failures are returned without touching the
    /// session.
    pub async fn on_response(
        &self,
        result: std::result::Result<Response, reqwest::Error>,
    ) -> Result<Response> {
        let response = result.map_err(map_transport)?;
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            return Ok(response);
        }

        if decide(status).teardown {
            self.teardown();
            return Err(AuthError::AuthorizationExpired.into());
        }

        let detail = read_detail(response).await;
        Err(ProtocolError::new(status.as_u16(), detail).into())
    }

    /// Run a request through both stages.
    #[instrument(skip(self, request), fields(api = %self.inner.api))]
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let result = self.before_send(request).send().await;
        self.on_response(result).await
    }

    /// GET an API path and decode its JSON body.
    #[instrument(skip(self), fields(api = %self.inner.api))]
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        debug!(path, "GET");
        let response = self.send(self.get(path)).await?;
        response.json::<R>().await.map_err(map_transport)
    }

    /// Request stage only, for credential exchange.
    ///
    /// The login call must be able to fail with 401 without ending any
    /// session, so its response is interpreted by the caller.
    pub(crate) async fn exchange(
        &self,
        request: RequestBuilder,
    ) -> std::result::Result<Response, reqwest::Error> {
        self.before_send(request).send().await
    }

    fn teardown(&self) {
        warn!("Authorization rejected; ending session");
        // A store failure is logged inside teardown; the request still fails
        // as expired.
        let _ = self.inner.state.teardown();
        self.inner.navigator.force_navigate(Destination::Login);
    }
}

impl std::fmt::Debug for AuthGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGateway")
            .field("api", &self.inner.api)
            .field("state", &self.inner.state)
            .finish()
    }
}
