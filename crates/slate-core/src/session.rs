//! The authenticated session and its role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::DispatchError;
use crate::tokens::{AccessToken, RefreshToken};

/// Authorization class returned by the authentication endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    /// Returns the wire name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(DispatchError::UnknownRole {
                role: other.to_string(),
            }),
        }
    }
}

/// The authenticated state: both tokens plus the role they were issued for.
///
/// A `Session` is always complete. Partial persisted state is never turned
/// into a `Session`; see [`Session::from_slots`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    access_token: AccessToken,
    refresh_token: RefreshToken,
    role: Role,
}

impl Session {
    /// Create a session from its three parts.
    pub fn new(access_token: AccessToken, refresh_token: RefreshToken, role: Role) -> Self {
        Self {
            access_token,
            refresh_token,
            role,
        }
    }

    /// Rebuild a session from the three persisted slots.
    ///
    /// Returns `None` unless every slot is present, non-empty, and the role
    /// is recognized.
    pub fn from_slots(
        access_token: Option<String>,
        refresh_token: Option<String>,
        role: Option<String>,
    ) -> Option<Self> {
        let (Some(access), Some(refresh), Some(role)) = (access_token, refresh_token, role) else {
            return None;
        };

        if access.is_empty() || refresh.is_empty() {
            return None;
        }

        let role = match role.parse::<Role>() {
            Ok(role) => role,
            Err(e) => {
                warn!(error = %e, "Ignoring stored session");
                return None;
            }
        };

        Some(Self::new(
            AccessToken::new(access),
            RefreshToken::new(refresh),
            role,
        ))
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &RefreshToken {
        &self.refresh_token
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
