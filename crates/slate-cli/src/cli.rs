//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::{get, list, login, logout, whoami};

/// Command-line client for the school management API.
#[derive(Parser, Debug)]
#[command(name = "slate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the API lives and where the session is kept.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// API base URL
    #[arg(
        long,
        global = true,
        env = "SLATE_API_URL",
        default_value = "http://localhost:8000/api"
    )]
    pub api_url: String,

    /// Session file (defaults to the per-user data directory)
    #[arg(long, global = true, env = "SLATE_SESSION_FILE")]
    pub session_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and go to the landing page for your role
    Login(login::LoginArgs),

    /// End the current session
    Logout(logout::LogoutArgs),

    /// Display the active session
    Whoami(whoami::WhoamiArgs),

    /// Fetch any API path with the session's credentials
    Get(get::GetArgs),

    /// List a collection
    List(list::ListArgs),
}
