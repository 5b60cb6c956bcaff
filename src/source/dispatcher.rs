//! Strategy selection and invocation.
//!
//! [`DataSource::resolve`] turns a validated source into at most one
//! [`Strategy`]: the dependency artifact is looked up, the missing-source
//! gate runs for filesystem-backed kinds, and the result names the producer
//! to run with its resolved inputs. [`DataSource::produce_with`] hands that
//! strategy to a [`StrategyRunner`] together with the source's filter and
//! mapper chain.
//!
//! [`BuiltinProducers`] runs the producers in [`crate::producer`]. Callers
//! that write packages differently supply their own runner.

use anyhow::Result;
use std::path::Path;
use tracing::debug;

use super::missing::{Gate, gate};
use super::{DataSource, SourceKind};
use crate::artifact::ArtifactSet;
use crate::core::{DebdataError, SourceType};
use crate::mapping::MapperChain;
use crate::pattern::PatternFilter;
use crate::producer::{
    ArchiveProducer, DataConsumer, DataProducer, DirectoryProducer, FileProducer, LinkProducer,
    LinkSpec, ProducerContext, TemplateProducer,
};

/// A producer selection with its resolved inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy<'a> {
    /// One file, from `file` or a resolved `dependency`
    File {
        /// Existing file
        src: &'a Path,
        /// Optional entry name
        destination: Option<&'a str>,
    },
    /// Entries of an existing archive
    Archive {
        /// Existing archive
        src: &'a Path,
    },
    /// A directory tree
    Directory {
        /// Existing directory
        src: &'a Path,
    },
    /// One link
    Link(&'a LinkSpec),
    /// One directory per path
    Template {
        /// Paths in configuration order
        paths: &'a [String],
    },
}

impl Strategy<'_> {
    /// Producer name, for logs and listings.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Strategy::File {
                ..
            } => "file",
            Strategy::Archive {
                ..
            } => "archive",
            Strategy::Directory {
                ..
            } => "directory",
            Strategy::Link(_) => "link",
            Strategy::Template {
                ..
            } => "template",
        }
    }

    /// The resolved filesystem source, if the strategy reads one.
    #[must_use]
    pub const fn src(&self) -> Option<&Path> {
        match self {
            Strategy::File {
                src,
                ..
            }
            | Strategy::Archive {
                src,
            }
            | Strategy::Directory {
                src,
            } => Some(*src),
            Strategy::Link(_)
            | Strategy::Template {
                ..
            } => None,
        }
    }
}

/// Runs a resolved strategy.
///
/// Implementations must apply `filter` to discovered entries and pass every
/// emitted entry through `mappers`. Errors are returned to the caller of
/// [`DataSource::produce_with`] unchanged.
pub trait StrategyRunner {
    /// Produces the strategy's entries into `consumer`.
    fn run(
        &self,
        strategy: Strategy<'_>,
        filter: &PatternFilter,
        mappers: &MapperChain,
        consumer: &mut dyn DataConsumer,
    ) -> Result<()>;
}

/// The producers shipped with this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinProducers;

impl StrategyRunner for BuiltinProducers {
    fn run(
        &self,
        strategy: Strategy<'_>,
        filter: &PatternFilter,
        mappers: &MapperChain,
        consumer: &mut dyn DataConsumer,
    ) -> Result<()> {
        let ctx = ProducerContext::new(filter, mappers);
        match strategy {
            Strategy::File {
                src,
                destination,
            } => FileProducer::new(src, destination, ctx).produce(consumer),
            Strategy::Archive {
                src,
            } => ArchiveProducer::new(src, ctx).produce(consumer),
            Strategy::Directory {
                src,
            } => DirectoryProducer::new(src, ctx).produce(consumer),
            Strategy::Link(link) => LinkProducer::new(link, ctx).produce(consumer),
            Strategy::Template {
                paths,
            } => TemplateProducer::new(paths, ctx).produce(consumer),
        }
    }
}

impl DataSource {
    /// Resolves this source to the strategy that would run.
    ///
    /// Returns `Ok(None)` when the source is missing and configured to be
    /// ignored.
    ///
    /// # Errors
    ///
    /// - [`DebdataError::ConfigurationError`] when a dependency's artifact is
    ///   not in `artifacts`
    /// - [`DebdataError::SourceNotFound`] when a `file`, `archive` or
    ///   `directory` source is missing and `missing_src` is `fail`
    pub fn resolve<'a>(
        &'a self,
        artifacts: &'a ArtifactSet,
    ) -> Result<Option<Strategy<'a>>, DebdataError> {
        let strategy = match &self.kind {
            SourceKind::Dependency {
                artifact,
                destination,
            } => Strategy::File {
                src: artifacts.resolve_ref(artifact)?,
                destination: destination.as_deref(),
            },
            SourceKind::Link(link) => Strategy::Link(link),
            SourceKind::Template {
                paths,
            } => Strategy::Template {
                paths,
            },
            SourceKind::File {
                src,
                destination,
                missing,
            } => match gate(src.as_deref(), *missing)? {
                Gate::Proceed(src) => Strategy::File {
                    src,
                    destination: destination.as_deref(),
                },
                Gate::Skip => return Ok(None),
            },
            SourceKind::Archive {
                src,
                missing,
            } => match gate(src.as_deref(), *missing)? {
                Gate::Proceed(src) => Strategy::Archive {
                    src,
                },
                Gate::Skip => return Ok(None),
            },
            SourceKind::Directory {
                src,
                missing,
            } => match gate(src.as_deref(), *missing)? {
                Gate::Proceed(src) => Strategy::Directory {
                    src,
                },
                Gate::Skip => return Ok(None),
            },
        };

        Ok(Some(strategy))
    }

    /// Produces this source's entries with the built-in producers.
    ///
    /// # Errors
    ///
    /// See [`DataSource::produce_with`].
    pub fn produce(&self, artifacts: &ArtifactSet, consumer: &mut dyn DataConsumer) -> Result<()> {
        self.produce_with(&BuiltinProducers, artifacts, consumer)
    }

    /// Resolves this source and runs at most one strategy through `runner`.
    ///
    /// A skipped source is a successful run that emits nothing.
    ///
    /// # Errors
    ///
    /// Resolution errors from [`DataSource::resolve`] and any error from the
    /// runner or consumer.
    pub fn produce_with(
        &self,
        runner: &dyn StrategyRunner,
        artifacts: &ArtifactSet,
        consumer: &mut dyn DataConsumer,
    ) -> Result<()> {
        let source_type: SourceType = self.source_type();
        let Some(strategy) = self.resolve(artifacts)? else {
            debug!("Skipping missing {} data source", source_type);
            return Ok(());
        };

        debug!("Dispatching {} data source to the {} producer", source_type, strategy.name());
        runner.run(strategy, &self.filter, &self.mappers, consumer)
    }
}
