//! debdata CLI entry point
//!
//! Parses arguments, installs logging, runs the command and turns any error
//! into a colored report with suggestions.

use clap::Parser;
use debdata::cli;
use debdata::core::user_friendly_error;

fn main() {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    cli.init_logging();

    if let Err(e) = cli.execute() {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
