//! Terminal navigation surface.

use colored::Colorize;

use slate_core::{Destination, Navigator};

use crate::output;

/// Reports navigation requests on stderr.
///
/// A terminal cannot load a page, so "navigating" tells the user where
/// they would land. The gateway only forces the login entry point after
/// the API rejected the session, so that case also says how to get back in.
#[derive(Debug, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn force_navigate(&self, destination: Destination) {
        if destination == Destination::Login {
            eprintln!(
                "{}",
                "Session expired. Run 'slate login' to sign in again.".yellow()
            );
        }
        output::navigate(destination.path());
    }
}
