//! Session context wiring for CLI commands.

use std::sync::Arc;

use anyhow::{Context, Result};

use slate_core::ApiUrl;
use slate_file::FileSessionStore;
use slate_http::SessionContext;

use crate::cli::ConnectionArgs;
use crate::navigator::TerminalNavigator;

/// Open the session store named by the connection args.
pub fn store(connection: &ConnectionArgs) -> Result<FileSessionStore> {
    match &connection.session_file {
        Some(path) => Ok(FileSessionStore::new(path)),
        None => FileSessionStore::default_location().context("Could not locate session file"),
    }
}

/// Build a session context over the persisted session.
pub fn open(connection: &ConnectionArgs) -> Result<SessionContext> {
    let api = ApiUrl::new(&connection.api_url).context("Invalid API URL")?;
    let store = store(connection)?;
    tracing::debug!(api = %api, session_file = %store.path().display(), "Opening session");

    SessionContext::new(api, Arc::new(store), Arc::new(TerminalNavigator))
        .context("Failed to create HTTP client")
}
