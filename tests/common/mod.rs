//! Common test utilities for debdata integration tests

// Allow dead code because these utilities are used across different test files
// and not all utilities are used in every test file
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use debdata::artifact::ArtifactSet;
use debdata::config::DataConfig;
use debdata::producer::ResolvedEntry;
use debdata::source::DataSource;

/// A `debdata` command with colors disabled.
pub fn debdata_cmd() -> Command {
    let mut cmd = Command::cargo_bin("debdata").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Validates `config` and collects everything it produces.
pub fn produce(config: &DataConfig, artifacts: &ArtifactSet) -> Result<Vec<ResolvedEntry>> {
    let source = DataSource::try_from(config)?;
    let mut entries: Vec<ResolvedEntry> = Vec::new();
    source.produce(artifacts, &mut entries)?;
    Ok(entries)
}

/// Entry names in emission order.
pub fn names(entries: &[ResolvedEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.name.as_str()).collect()
}
