//! Login credentials type.

use std::fmt;

use crate::Result;
use crate::error::InvalidInputError;

/// Login credentials submitted to the authentication endpoint.
///
/// Credentials are transient: they live only for the duration of a login
/// call and are never persisted.
///
/// # Security
///
/// The secret is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use slate_core::Credentials;
///
/// let creds = Credentials::new("a@x.com", "good").unwrap();
/// assert_eq!(creds.identifier(), "a@x.com");
/// assert!(Credentials::new("", "good").is_err());
/// ```
#[derive(Clone)]
pub struct Credentials {
    identifier: String,
    secret: String,
}

impl Credentials {
    /// Create new credentials.
    ///
    /// # Errors
    ///
    /// Both fields are required; an empty or whitespace-only value is
    /// rejected with [`InvalidInputError::Required`].
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let identifier = identifier.into();
        let secret = secret.into();

        if identifier.trim().is_empty() {
            return Err(InvalidInputError::Required {
                field: "identifier",
            }
            .into());
        }
        if secret.is_empty() {
            return Err(InvalidInputError::Required { field: "secret" }.into());
        }

        Ok(Self { identifier, secret })
    }

    /// Returns the identifier (username or email).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the secret.
    ///
    /// # Security
    ///
    /// Use this only when constructing authentication requests.
    /// Never log or display this value.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
