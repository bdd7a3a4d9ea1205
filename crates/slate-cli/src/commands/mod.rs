//! Subcommand implementations.

pub mod get;
pub mod list;
pub mod login;
pub mod logout;
pub mod whoami;
