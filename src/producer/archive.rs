//! Zip archive producer.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace, warn};
use zip::ZipArchive;

use super::{DataConsumer, DataProducer, EntryContent, ProducerContext, ResolvedEntry};
use crate::constants::{UNIX_PERMISSION_MASK, UNIX_SYMLINK_TYPE, UNIX_TYPE_MASK};
use crate::core::DebdataError;

/// Re-emits the entries of an existing zip archive.
///
/// Names are taken from the archive with any leading `./` and trailing `/`
/// removed. Entries that are absolute or climb out of the archive root with
/// `..` are skipped. File contents are read into memory. Entries whose unix mode marks
/// them as symlinks become link entries pointing at their stored target, and
/// unix permission bits are kept when the archive records them.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveProducer<'a> {
    archive: &'a Path,
    ctx: ProducerContext<'a>,
}

impl<'a> ArchiveProducer<'a> {
    /// Creates a producer for the archive at `archive`.
    #[must_use]
    pub const fn new(archive: &'a Path, ctx: ProducerContext<'a>) -> Self {
        Self {
            archive,
            ctx,
        }
    }
}

impl DataProducer for ArchiveProducer<'_> {
    fn produce(&self, consumer: &mut dyn DataConsumer) -> Result<()> {
        debug!("Reading archive {}", self.archive.display());
        let file = File::open(self.archive)
            .with_context(|| format!("Failed to open archive {}", self.archive.display()))?;
        let mut archive = ZipArchive::new(file)
            .map_err(DebdataError::from)
            .with_context(|| format!("Failed to read {} as a zip archive", self.archive.display()))?;

        for i in 0..archive.len() {
            let mut item = archive
                .by_index(i)
                .map_err(DebdataError::from)
                .with_context(|| format!("Failed to read zip entry {i}"))?;

            if item.enclosed_name().is_none() {
                warn!("Skipping archive entry with unsafe path {}", item.name());
                continue;
            }
            let name = normalize_name(item.name()).to_string();
            if name.is_empty() || !self.ctx.filter.is_included(&name) {
                trace!("Skipping archive entry {}", item.name());
                continue;
            }

            let unix_mode = item.unix_mode();
            let entry = if item.is_dir() {
                ResolvedEntry::directory(name)
            } else if unix_mode.is_some_and(|mode| mode & UNIX_TYPE_MASK == UNIX_SYMLINK_TYPE) {
                let mut target = String::new();
                item.read_to_string(&mut target)
                    .with_context(|| format!("Failed to read symlink target of {name}"))?;
                ResolvedEntry::link(name, target, true)
            } else {
                let mut content = Vec::new();
                item.read_to_end(&mut content)
                    .with_context(|| format!("Failed to read zip entry {name}"))?;
                let size = content.len() as u64;
                ResolvedEntry::file(name, EntryContent::Bytes(content), size)
            };

            let entry = match unix_mode.map(|mode| mode & UNIX_PERMISSION_MASK) {
                Some(mode) if mode != 0 => entry.with_mode(mode),
                _ => entry,
            };

            self.ctx.emit(entry, consumer)?;
        }

        Ok(())
    }
}

fn normalize_name(name: &str) -> &str {
    let name = name.strip_prefix("./").unwrap_or(name);
    name.trim_end_matches('/')
}
