//! Session persistence port.

use crate::Result;
use crate::session::Session;

/// Durable key/value persistence of the current session.
///
/// All operations are synchronous. The three slots (access token, refresh
/// token, role) are written and cleared as a set; a read that finds
/// anything less than a complete set returns `None`. The store keeps no
/// expiry logic of its own.
pub trait SessionStore: Send + Sync {
    /// Replace the stored session.
    fn set(&self, session: &Session) -> Result<()>;

    /// Read the stored session, if a complete one exists.
    fn get(&self) -> Option<Session>;

    /// Remove every slot. Clearing an empty store is a no-op.
    fn clear(&self) -> Result<()>;
}
