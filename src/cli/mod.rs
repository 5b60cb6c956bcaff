//! Command-line interface for debdata.
//!
//! The binary loads a package descriptor (a TOML file with `[[data]]` and
//! `[[artifact]]` tables) and either lists the entries every data source
//! would put into the package or only validates the descriptor.
//!
//! # Commands
//!
//! - `list` - Resolve every data source and print the produced entries
//! - `validate` - Check every data source's configuration without reading sources
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - Errors only
//!
//! `RUST_LOG` is honored when neither flag is given.
//!
//! # Examples
//!
//! ```bash
//! debdata list debdata.toml
//! debdata list --format json debdata.toml
//! debdata --verbose validate debdata.toml
//! ```

mod list;
mod validate;

pub use list::{ListCommand, OutputFormat};
pub use validate::ValidateCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Main CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "debdata",
    about = "Resolve Debian package data sources into package entries",
    version,
    long_about = "debdata reads the [[data]] tables of a package descriptor, validates them, resolves dependency artifacts and prints the entries each data source produces."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the entries every data source produces.
    ///
    /// See [`ListCommand`] for options.
    List(ListCommand),

    /// Validate a descriptor without reading any source.
    ///
    /// See [`ValidateCommand`] for options.
    Validate(ValidateCommand),
}

impl Cli {
    /// Log filter implied by the global flags.
    ///
    /// `--verbose` selects `debug`, `--quiet` selects `error`, otherwise
    /// `RUST_LOG` is used and falls back to `warn`.
    #[must_use]
    pub fn log_filter(&self) -> EnvFilter {
        if self.verbose {
            EnvFilter::new("debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    }

    /// Installs the global tracing subscriber, writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.log_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Runs the selected command.
    ///
    /// # Errors
    ///
    /// Returns whatever the command fails with; the binary turns it into a
    /// user-friendly report.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::List(cmd) => cmd.execute(),
            Commands::Validate(cmd) => cmd.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_format() {
        let cli = Cli::try_parse_from(["debdata", "list", "--format", "json", "pkg.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["debdata", "validate", "pkg.toml", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["debdata", "-v", "-q", "validate", "pkg.toml"]).is_err());
    }

    #[test]
    fn test_descriptor_argument_required() {
        assert!(Cli::try_parse_from(["debdata", "list"]).is_err());
    }

    #[test]
    fn test_log_filter_levels() {
        let verbose = Cli::try_parse_from(["debdata", "-v", "validate", "x.toml"]).unwrap();
        assert_eq!(verbose.log_filter().to_string(), "debug");

        let quiet = Cli::try_parse_from(["debdata", "-q", "validate", "x.toml"]).unwrap();
        assert_eq!(quiet.log_filter().to_string(), "error");
    }
}
