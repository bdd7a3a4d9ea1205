//! slate-file - File-backed session persistence.

mod store;

pub use store::FileSessionStore;
