//! Validate a package descriptor without reading any source.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::artifact::ArtifactSet;
use crate::config::{DataConfig, PackageDescriptor};
use crate::core::DebdataError;
use crate::source::{DataSource, SourceKind};

/// Check every data source's configuration.
///
/// All `[[data]]` tables are checked, not just up to the first failure.
/// Dependency references are also looked up in the descriptor's
/// `[[artifact]]` tables. Source paths are not checked.
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Path to the package descriptor
    descriptor: PathBuf,
}

impl ValidateCommand {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Fails when the descriptor cannot be loaded or any data source is invalid.
    pub fn execute(self) -> Result<()> {
        let descriptor = PackageDescriptor::load(&self.descriptor)?;
        let artifacts = descriptor.artifact_set();

        let mut failures = 0usize;
        for (i, config) in descriptor.data.iter().enumerate() {
            match check(config, &artifacts) {
                Ok(source_type) => println!("{} #{} {}", "✓".green(), i + 1, source_type),
                Err(e) => {
                    failures += 1;
                    println!("{} #{} {}", "✗".red(), i + 1, e);
                }
            }
        }

        if failures > 0 {
            bail!(
                "{failures} of {} data sources in {} are invalid",
                descriptor.data.len(),
                self.descriptor.display()
            );
        }

        println!("{} {} data sources are valid", "✓".green(), descriptor.data.len());
        Ok(())
    }
}

fn check(config: &DataConfig, artifacts: &ArtifactSet) -> Result<&'static str, DebdataError> {
    let source = DataSource::try_from(config)?;
    if let SourceKind::Dependency {
        artifact,
        ..
    } = source.kind()
    {
        artifacts.resolve_ref(artifact)?;
    }
    Ok(source.source_type().as_str())
}
