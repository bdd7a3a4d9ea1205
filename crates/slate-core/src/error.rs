//! Error types for the slate client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, protocol, storage, dispatch and input
//! validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for slate operations.
///
/// Callers match on the variant to decide how to react: a login form shows
/// [`AuthError::LoginFailed`], feature code aborts on
/// [`AuthError::AuthorizationExpired`], and so on.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected login, expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-success responses that are not authorization failures.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Session persistence errors.
    #[error("session store error: {0}")]
    Store(#[from] StoreError),

    /// Post-login dispatch errors.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Input validation errors (empty credentials, malformed URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if this error tore down the session.
    pub fn is_authorization_expired(&self) -> bool {
        matches!(self, Error::Auth(AuthError::AuthorizationExpired))
    }

    /// Returns true if this error is a rejected or failed login.
    pub fn is_login_failed(&self) -> bool {
        matches!(self, Error::Auth(AuthError::LoginFailed { .. }))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Response body could not be decoded.
    #[error("invalid response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The authentication endpoint rejected the credentials or could not
    /// be reached.
    #[error("login failed{}", login_suffix(.status, .detail))]
    LoginFailed {
        /// HTTP status, if the endpoint answered at all.
        status: Option<u16>,
        /// Server-reported detail, when available.
        detail: Option<String>,
    },

    /// An authenticated request was answered with 401 and the session was
    /// torn down.
    #[error("authorization expired; session cleared")]
    AuthorizationExpired,
}

fn login_suffix(status: &Option<u16>, detail: &Option<String>) -> String {
    let mut suffix = String::new();
    if let Some(status) = status {
        suffix.push_str(&format!(" (HTTP {})", status));
    }
    if let Some(detail) = detail {
        suffix.push_str(&format!(": {}", detail));
    }
    suffix
}

/// Non-success HTTP responses other than 401.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Human-readable detail from the server, if present.
    pub detail: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self { status, detail }
    }
}

/// Session persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the persistence surface failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// The stored session could not be encoded.
    #[error("could not encode session: {message}")]
    Encode { message: String },

    /// No location is available for the persistence surface.
    #[error("no session location: {message}")]
    Location { message: String },
}

/// Post-login dispatch errors.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The role is outside the recognized set.
    #[error("unknown role '{role}'")]
    UnknownRole { role: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// A required credential field was empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
