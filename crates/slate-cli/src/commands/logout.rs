//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use slate_core::Destination;

use crate::cli::ConnectionArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, connection: &ConnectionArgs) -> Result<()> {
    let context = session::open(connection)?;
    let was_authenticated = context.is_authenticated();

    context.logout().context("Failed to clear session")?;

    if was_authenticated {
        output::success("Logged out");
    } else {
        output::success("No active session");
    }
    output::navigate(Destination::Login.path());

    Ok(())
}
