//! Path template producer.

use anyhow::Result;
use tracing::{debug, trace};

use super::{DataConsumer, DataProducer, ProducerContext, ResolvedEntry};

/// Emits one directory entry for each listed path, in list order.
///
/// Nothing is read from disk. Paths are emitted as written, including
/// duplicates, unless the filter rejects them.
#[derive(Debug, Clone, Copy)]
pub struct TemplateProducer<'a> {
    paths: &'a [String],
    ctx: ProducerContext<'a>,
}

impl<'a> TemplateProducer<'a> {
    /// Creates a producer for `paths`.
    #[must_use]
    pub const fn new(paths: &'a [String], ctx: ProducerContext<'a>) -> Self {
        Self {
            paths,
            ctx,
        }
    }
}

impl DataProducer for TemplateProducer<'_> {
    fn produce(&self, consumer: &mut dyn DataConsumer) -> Result<()> {
        debug!("Producing {} template paths", self.paths.len());
        for path in self.paths {
            if !self.ctx.filter.is_included(path) {
                trace!("Skipping filtered template path {}", path);
                continue;
            }
            self.ctx.emit(ResolvedEntry::directory(path.as_str()), consumer)?;
        }
        Ok(())
    }
}
