//! Navigation surface port.

use crate::dispatch::Destination;

/// Forces a full navigation to a destination.
///
/// The session subsystem only requests destinations; how the request is
/// honored (a page load, a message to the user) belongs to the host.
pub trait Navigator: Send + Sync {
    fn force_navigate(&self, destination: Destination);
}
