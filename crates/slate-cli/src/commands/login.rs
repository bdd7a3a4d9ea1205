//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use slate_core::{Credentials, Destination, Navigator};

use crate::cli::ConnectionArgs;
use crate::navigator::TerminalNavigator;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username or email to authenticate with
    #[arg(long)]
    pub identifier: String,

    /// Account password
    #[arg(long, env = "SLATE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, connection: &ConnectionArgs) -> Result<()> {
    let credentials = Credentials::new(args.identifier, args.password)?;
    let context = session::open(connection)?;

    eprintln!("{}", "Logging in...".dimmed());

    // An unrecognized role fails here too; the user stays at the login
    // entry point with nothing stored.
    let role = context
        .login(credentials)
        .await
        .context("Login failed. Please check credentials.")?;

    output::success("Logged in successfully");
    println!();
    output::field("Role", role.as_str());

    TerminalNavigator.force_navigate(Destination::for_role(role));

    Ok(())
}
