//! Link producer.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use super::{DataConsumer, DataProducer, ProducerContext, ResolvedEntry};

/// A link to create in the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSpec {
    /// Path of the link inside the package
    pub name: String,
    /// Path the link points at
    pub target: String,
    /// Symbolic link when `true`, hard link otherwise
    pub symbolic: bool,
}

/// Emits exactly one link entry.
///
/// Links are synthesized from configuration rather than discovered, so the
/// include/exclude filter is not consulted. The mapper chain still applies.
#[derive(Debug, Clone, Copy)]
pub struct LinkProducer<'a> {
    link: &'a LinkSpec,
    ctx: ProducerContext<'a>,
}

impl<'a> LinkProducer<'a> {
    /// Creates a producer for `link`.
    #[must_use]
    pub const fn new(link: &'a LinkSpec, ctx: ProducerContext<'a>) -> Self {
        Self {
            link,
            ctx,
        }
    }
}

impl DataProducer for LinkProducer<'_> {
    fn produce(&self, consumer: &mut dyn DataConsumer) -> Result<()> {
        debug!(
            "Producing {} link {} -> {}",
            if self.link.symbolic { "symbolic" } else { "hard" },
            self.link.name,
            self.link.target
        );
        let entry =
            ResolvedEntry::link(self.link.name.as_str(), self.link.target.as_str(), self.link.symbolic);
        self.ctx.emit(entry, consumer)
    }
}
