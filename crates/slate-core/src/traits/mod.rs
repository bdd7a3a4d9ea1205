//! Ports the session subsystem depends on.

mod navigator;
mod session_store;

pub use navigator::Navigator;
pub use session_store::SessionStore;
