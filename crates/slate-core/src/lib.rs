//! slate-core - Core session types and traits.

pub mod credentials;
pub mod dispatch;
pub mod error;
pub mod session;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use dispatch::{Destination, dispatch};
pub use error::Error;
pub use session::{Role, Session};
pub use store::MemorySessionStore;
pub use tokens::{AccessToken, RefreshToken};
pub use traits::{Navigator, SessionStore};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
