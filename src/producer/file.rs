//! Single-file producer.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, trace};

use super::{DataConsumer, DataProducer, EntryContent, ProducerContext, ResolvedEntry};
use crate::core::DebdataError;

/// Emits one file entry for a regular file.
///
/// The entry is named after the trimmed destination when one is configured,
/// otherwise after the source's file name.
#[derive(Debug, Clone, Copy)]
pub struct FileProducer<'a> {
    src: &'a Path,
    destination: Option<&'a str>,
    ctx: ProducerContext<'a>,
}

impl<'a> FileProducer<'a> {
    /// Creates a producer for `src`.
    #[must_use]
    pub const fn new(src: &'a Path, destination: Option<&'a str>, ctx: ProducerContext<'a>) -> Self {
        Self {
            src,
            destination,
            ctx,
        }
    }

    fn entry_name(&self) -> String {
        match self.destination.map(str::trim).filter(|dst| !dst.is_empty()) {
            Some(dst) => dst.to_string(),
            None => self
                .src
                .file_name()
                .map_or_else(|| self.src.to_string_lossy(), |name| name.to_string_lossy())
                .into_owned(),
        }
    }
}

impl DataProducer for FileProducer<'_> {
    fn produce(&self, consumer: &mut dyn DataConsumer) -> Result<()> {
        let metadata = std::fs::metadata(self.src)
            .with_context(|| format!("Failed to read metadata for {}", self.src.display()))?;
        if !metadata.is_file() {
            return Err(DebdataError::FileSystemError {
                operation: "read a regular file".to_string(),
                path: self.src.display().to_string(),
            }
            .into());
        }

        let name = self.entry_name();
        if !self.ctx.filter.is_included(&name) {
            trace!("Skipping filtered file {}", name);
            return Ok(());
        }

        debug!("Producing file {} from {}", name, self.src.display());
        let entry =
            ResolvedEntry::file(name, EntryContent::Path(self.src.to_path_buf()), metadata.len());
        self.ctx.emit(entry, consumer)
    }
}
