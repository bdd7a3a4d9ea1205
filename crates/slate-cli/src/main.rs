//! slate - command-line client for the school management API.
//!
//! A thin wrapper over `slate-http`: the terminal stands in for the login
//! page and the application chrome. Navigation requests from the session
//! subsystem are reported to the user.

mod cli;
mod commands;
mod navigator;
mod output;
mod session;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let connection = cli.connection;
    let result = match cli.command {
        Commands::Login(args) => commands::login::run(args, &connection).await,
        Commands::Logout(args) => commands::logout::run(args, &connection).await,
        Commands::Whoami(args) => commands::whoami::run(args, &connection).await,
        Commands::Get(args) => commands::get::run(args, &connection).await,
        Commands::List(args) => commands::list::run(args, &connection).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
