//! slate-http - Authenticating HTTP gateway and session context.
//!
//! Every request to the school management API goes through an
//! [`AuthGateway`], which attaches the stored access token and tears the
//! session down when the server answers 401. [`SessionContext`] owns the
//! in-memory session and exposes login and logout.

mod context;
mod endpoints;
mod gateway;
mod state;

pub use context::SessionContext;
pub use endpoints::{ASSIGNED_EXAMS, EXAMS, Resource, STUDENTS, TEACHERS, TOKEN};
pub use gateway::{AuthGateway, Decision, decide};
