//! Directory tree producer.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, trace};
use walkdir::WalkDir;

use super::{DataConsumer, DataProducer, EntryContent, ProducerContext, ResolvedEntry};

/// Walks a directory tree and emits one entry per directory, file and symlink.
///
/// Entries are named relative to the root with `/` separators and visited in
/// file-name order, parents before children. Symlinks are emitted as links
/// and never followed. Version-control and editor files are always excluded
/// in addition to the configured excludes, and an excluded directory is not
/// descended into.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryProducer<'a> {
    root: &'a Path,
    ctx: ProducerContext<'a>,
}

impl<'a> DirectoryProducer<'a> {
    /// Creates a producer for the tree under `root`.
    #[must_use]
    pub const fn new(root: &'a Path, ctx: ProducerContext<'a>) -> Self {
        Self {
            root,
            ctx,
        }
    }
}

impl DataProducer for DirectoryProducer<'_> {
    fn produce(&self, consumer: &mut dyn DataConsumer) -> Result<()> {
        debug!("Walking directory {}", self.root.display());
        let filter = self.ctx.filter.with_default_excludes();

        let mut emitted = 0usize;
        let mut walker =
            WalkDir::new(self.root).follow_links(false).min_depth(1).sort_by_file_name().into_iter();

        while let Some(item) = walker.next() {
            let entry = item
                .with_context(|| format!("Failed to walk directory {}", self.root.display()))?;
            let name = relative_name(self.root, entry.path());
            let file_type = entry.file_type();

            if file_type.is_dir() && filter.is_excluded(&name) {
                trace!("Pruning excluded directory {}", name);
                walker.skip_current_dir();
                continue;
            }
            if !filter.is_included(&name) {
                continue;
            }

            let resolved = if file_type.is_symlink() {
                let target = std::fs::read_link(entry.path()).with_context(|| {
                    format!("Failed to read symlink {}", entry.path().display())
                })?;
                ResolvedEntry::link(name, target.to_string_lossy(), true)
            } else if file_type.is_dir() {
                ResolvedEntry::directory(name)
            } else {
                let size = entry
                    .metadata()
                    .with_context(|| format!("Failed to read metadata for {}", entry.path().display()))?
                    .len();
                ResolvedEntry::file(name, EntryContent::Path(entry.path().to_path_buf()), size)
            };

            self.ctx.emit(resolved, consumer)?;
            emitted += 1;
        }

        debug!("Produced {} entries from {}", emitted, self.root.display());
        Ok(())
    }
}

fn relative_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
