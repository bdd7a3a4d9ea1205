//! Post-login dispatch: where each role lands after authenticating.

use std::fmt;

use crate::error::DispatchError;
use crate::session::Role;

/// A navigation destination requested by the session subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// The unauthenticated entry point.
    Login,
    AdminLanding,
    TeacherLanding,
    StudentLanding,
}

impl Destination {
    /// Returns the landing destination for a role.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Destination::AdminLanding,
            Role::Teacher => Destination::TeacherLanding,
            Role::Student => Destination::StudentLanding,
        }
    }

    /// Returns the path to navigate to.
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Login => "/login",
            Destination::AdminLanding => "/admin/dashboard",
            Destination::TeacherLanding => "/teacher/dashboard",
            Destination::StudentLanding => "/student/dashboard",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Map a raw role name to its landing destination.
///
/// # Errors
///
/// Returns [`DispatchError::UnknownRole`] for any role outside the
/// recognized set. The caller decides the fallback; there is no default
/// landing.
///
/// # Example
///
/// ```
/// use slate_core::{Destination, dispatch};
///
/// assert_eq!(dispatch("teacher").unwrap(), Destination::TeacherLanding);
/// assert!(dispatch("guardian").is_err());
/// ```
pub fn dispatch(role: &str) -> Result<Destination, DispatchError> {
    role.parse::<Role>().map(Destination::for_role)
}
