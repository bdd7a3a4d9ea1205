//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use slate_core::Destination;

use crate::cli::ConnectionArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, connection: &ConnectionArgs) -> Result<()> {
    let context = session::open(connection)?;
    let current = context
        .current()
        .context("No active session. Run 'slate login' first.")?;

    output::field("Role", current.role().as_str());
    output::field("Landing", Destination::for_role(current.role()).path());
    output::field("API", context.gateway().api().as_str());

    Ok(())
}
