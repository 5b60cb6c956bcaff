//! List the entries a package descriptor produces.
//!
//! Every `[[data]]` table is validated first; if any is invalid nothing is
//! produced. Sources are then resolved in declaration order against the
//! descriptor's `[[artifact]]` tables and their entries printed.
//!
//! ```text
//! #1 directory
//!   dir      0755 root/root        0 bin
//!   file     0755 root/root      812 bin/server
//! #2 link
//!   symlink  0777 root/root        0 usr/bin/server -> /opt/server/bin/server
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use crate::config::PackageDescriptor;
use crate::producer::{EntryKind, ResolvedEntry};
use crate::source::validate_all;

/// Output format for `list`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per entry, grouped by data source
    #[default]
    Text,
    /// A JSON array with one object per data source
    Json,
}

/// Resolve every data source and print the produced entries.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Path to the package descriptor
    descriptor: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl ListCommand {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Fails on an unreadable descriptor, the first invalid data source, or
    /// the first data source that fails to resolve or produce.
    pub fn execute(self) -> Result<()> {
        let descriptor = PackageDescriptor::load(&self.descriptor)?;
        let artifacts = descriptor.artifact_set();
        let sources = validate_all(&descriptor.data)?;

        let mut listing = Vec::with_capacity(sources.len());
        for source in &sources {
            let mut entries: Vec<ResolvedEntry> = Vec::new();
            source.produce(&artifacts, &mut entries)?;
            listing.push((source.source_type().as_str(), entries));
        }

        let total: usize = listing.iter().map(|(_, entries)| entries.len()).sum();
        info!("{} data sources produced {} entries", listing.len(), total);

        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = listing
                    .iter()
                    .enumerate()
                    .map(|(i, (source_type, entries))| {
                        serde_json::json!({
                            "source": i + 1,
                            "type": source_type,
                            "entries": entries.iter().map(entry_json).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Text => {
                for (i, (source_type, entries)) in listing.iter().enumerate() {
                    println!("{} {}", format!("#{}", i + 1).bold(), source_type.cyan());
                    if entries.is_empty() {
                        println!("  {}", "(no entries)".bright_black());
                    }
                    for entry in entries {
                        println!("  {}", format_entry(entry));
                    }
                }
            }
        }

        Ok(())
    }
}

/// One text line per entry: kind, mode, owner, size, name and link target.
pub(crate) fn format_entry(entry: &ResolvedEntry) -> String {
    let mut line = format!(
        "{:<8} {:04o} {}/{} {:>8} {}",
        entry.kind.label(),
        entry.mode,
        entry.user,
        entry.group,
        entry.size,
        entry.name
    );
    if let EntryKind::Link {
        target,
        ..
    } = &entry.kind
    {
        line.push_str(" -> ");
        line.push_str(target);
    }
    line
}

pub(crate) fn entry_json(entry: &ResolvedEntry) -> serde_json::Value {
    let mut obj = serde_json::json!({
        "name": entry.name,
        "kind": entry.kind.label(),
        "mode": format!("{:04o}", entry.mode),
        "user": entry.user,
        "uid": entry.uid,
        "group": entry.group,
        "gid": entry.gid,
        "size": entry.size,
    });
    if let EntryKind::Link {
        target,
        ..
    } = &entry.kind
    {
        obj["target"] = serde_json::Value::String(target.clone());
    }
    obj
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::EntryContent;

    #[test]
    fn test_format_entry() {
        let file = ResolvedEntry::file("usr/bin/tool", EntryContent::Bytes(vec![0; 12]), 12);
        assert_eq!(format_entry(&file), "file     0644 root/root       12 usr/bin/tool");

        let link = ResolvedEntry::link("usr/bin/app", "/opt/app", true);
        assert!(format_entry(&link).ends_with("usr/bin/app -> /opt/app"));
    }

    #[test]
    fn test_entry_json() {
        let dir = ResolvedEntry::directory("var/lib/app");
        let json = entry_json(&dir);
        assert_eq!(json["kind"], "dir");
        assert_eq!(json["mode"], "0755");
        assert_eq!(json["uid"], 0);
        assert!(json.get("target").is_none());

        let link = entry_json(&ResolvedEntry::link("a", "b", false));
        assert_eq!(link["kind"], "hardlink");
        assert_eq!(link["target"], "b");
    }
}
