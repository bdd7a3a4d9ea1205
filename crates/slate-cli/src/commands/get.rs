//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use crate::cli::ConnectionArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// API path, relative to the base URL (e.g. /teachers/1/)
    pub path: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: GetArgs, connection: &ConnectionArgs) -> Result<()> {
    let context = session::open(connection)?;

    let body: Value = context
        .gateway()
        .get_json(&args.path)
        .await
        .with_context(|| format!("GET {} failed", args.path))?;

    if args.pretty {
        output::json_pretty(&body)
    } else {
        output::json(&body)
    }
}
