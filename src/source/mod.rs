//! Validated data sources.
//!
//! A [`DataSource`] is built from a raw [`DataConfig`] with
//! `DataSource::try_from`. Construction is the only validation step: the type
//! tag is matched, the fields the type requires are checked, artifact
//! references are parsed, include/exclude patterns are split and compiled and
//! the mapping rule is compiled. Nothing touches the filesystem until
//! [`DataSource::produce`] runs.
//!
//! | type | required | notes |
//! |---|---|---|
//! | `dependency` | `artifact` | `groupId:artifactId`, resolved against an [`ArtifactSet`] |
//! | `link` | `link_name`, `link_target` | `symlink` defaults to `true` |
//! | `template` | `paths` | at least one path |
//! | `file` | `src` | subject to `missing_src` |
//! | `archive` | `src` | subject to `missing_src` |
//! | `directory` | `src` | subject to `missing_src` |
//!
//! # Examples
//!
//! ```rust
//! use debdata::artifact::ArtifactSet;
//! use debdata::config::DataConfig;
//! use debdata::producer::ResolvedEntry;
//! use debdata::source::DataSource;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = DataConfig::of_type("link").with_link("usr/bin/app", "/opt/app/bin/app", true);
//! let source = DataSource::try_from(&config)?;
//!
//! let mut entries: Vec<ResolvedEntry> = Vec::new();
//! source.produce(&ArtifactSet::default(), &mut entries)?;
//! assert_eq!(entries.len(), 1);
//! # Ok(())
//! # }
//! ```

mod dispatcher;
pub mod missing;


pub use dispatcher::{BuiltinProducers, Strategy, StrategyRunner};
pub use missing::{Gate, MissingSourceBehavior, gate};

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::artifact::{ArtifactRef, ArtifactSet};
use crate::config::DataConfig;
use crate::core::{DebdataError, SourceType};
use crate::mapping::MapperChain;
use crate::pattern::{PatternFilter, PatternSet, split_patterns};
use crate::producer::LinkSpec;

/// The validated, type-specific part of a data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// A build artifact, emitted as a single file
    Dependency {
        /// Parsed `groupId:artifactId`
        artifact: ArtifactRef,
        /// Optional entry name
        destination: Option<String>,
    },
    /// A synthesized link
    Link(LinkSpec),
    /// Literal directory paths
    Template {
        /// Paths in configuration order
        paths: Vec<String>,
    },
    /// A single file
    File {
        /// Source path, `None` when unset
        src: Option<PathBuf>,
        /// Optional entry name
        destination: Option<String>,
        /// Reaction to a missing `src`
        missing: MissingSourceBehavior,
    },
    /// A zip archive
    Archive {
        /// Source path, `None` when unset
        src: Option<PathBuf>,
        /// Reaction to a missing `src`
        missing: MissingSourceBehavior,
    },
    /// A directory tree
    Directory {
        /// Source path, `None` when unset
        src: Option<PathBuf>,
        /// Reaction to a missing `src`
        missing: MissingSourceBehavior,
    },
}

impl SourceKind {
    /// The type tag this kind was built from.
    #[must_use]
    pub const fn source_type(&self) -> SourceType {
        match self {
            SourceKind::Dependency {
                ..
            } => SourceType::Dependency,
            SourceKind::Link(_) => SourceType::Link,
            SourceKind::Template {
                ..
            } => SourceType::Template,
            SourceKind::File {
                ..
            } => SourceType::File,
            SourceKind::Archive {
                ..
            } => SourceType::Archive,
            SourceKind::Directory {
                ..
            } => SourceType::Directory,
        }
    }

    /// The configured `src` for filesystem-backed kinds.
    #[must_use]
    pub fn src(&self) -> Option<&Path> {
        match self {
            SourceKind::File {
                src,
                ..
            }
            | SourceKind::Archive {
                src,
                ..
            }
            | SourceKind::Directory {
                src,
                ..
            } => src.as_deref(),
            _ => None,
        }
    }
}

/// A fully validated data source, ready to produce entries.
#[derive(Debug)]
pub struct DataSource {
    kind: SourceKind,
    includes: PatternSet,
    excludes: PatternSet,
    filter: PatternFilter,
    mappers: MapperChain,
}

impl DataSource {
    /// The validated type-specific configuration.
    #[must_use]
    pub fn kind(&self) -> &SourceKind {
        &self.kind
    }

    /// Shorthand for `self.kind().source_type()`.
    #[must_use]
    pub fn source_type(&self) -> SourceType {
        self.kind.source_type()
    }

    /// Include patterns as split from configuration.
    #[must_use]
    pub fn includes(&self) -> &PatternSet {
        &self.includes
    }

    /// Exclude patterns as split from configuration.
    #[must_use]
    pub fn excludes(&self) -> &PatternSet {
        &self.excludes
    }

    /// The compiled include/exclude filter.
    #[must_use]
    pub fn filter(&self) -> &PatternFilter {
        &self.filter
    }

    /// The compiled mapper chain.
    #[must_use]
    pub fn mappers(&self) -> &MapperChain {
        &self.mappers
    }
}

impl TryFrom<&DataConfig> for DataSource {
    type Error = DebdataError;

    fn try_from(config: &DataConfig) -> Result<Self, Self::Error> {
        let source_type: SourceType = config
            .source_type
            .as_deref()
            .ok_or_else(|| DebdataError::UnsupportedType {
                source_type: "<unset>".to_string(),
            })?
            .parse()?;
        let missing = MissingSourceBehavior::parse_optional(config.missing_src.as_deref())?;

        let kind = match source_type {
            SourceType::Dependency => {
                let reference = required(config.artifact.as_deref(), "artifact")?;
                SourceKind::Dependency {
                    artifact: ArtifactRef::parse(reference)?,
                    destination: config.dst.clone(),
                }
            }
            SourceType::Link => SourceKind::Link(LinkSpec {
                name: required(config.link_name.as_deref(), "link_name")?.to_string(),
                target: required(config.link_target.as_deref(), "link_target")?.to_string(),
                symbolic: config.symlink,
            }),
            SourceType::Template => {
                if config.paths.is_empty() {
                    return Err(DebdataError::config("paths is not set"));
                }
                SourceKind::Template {
                    paths: config.paths.clone(),
                }
            }
            SourceType::File => SourceKind::File {
                src: configured_src(config),
                destination: config.dst.clone(),
                missing,
            },
            SourceType::Archive => SourceKind::Archive {
                src: configured_src(config),
                missing,
            },
            SourceType::Directory => SourceKind::Directory {
                src: configured_src(config),
                missing,
            },
        };

        let includes = split_patterns(config.includes.as_deref());
        let excludes = split_patterns(config.excludes.as_deref());
        let filter = PatternFilter::new(&includes, &excludes)?;
        let mappers = MapperChain::compile(config.mapper.as_ref())?;

        debug!(
            "Validated {} data source ({} includes, {} excludes, {} mappers)",
            source_type,
            includes.as_slice().len(),
            excludes.as_slice().len(),
            mappers.len()
        );

        Ok(Self {
            kind,
            includes,
            excludes,
            filter,
            mappers,
        })
    }
}

impl TryFrom<DataConfig> for DataSource {
    type Error = DebdataError;

    fn try_from(config: DataConfig) -> Result<Self, Self::Error> {
        Self::try_from(&config)
    }
}

/// Validates every data source of a descriptor, stopping at the first error.
///
/// The error names the 1-based position of the offending `[[data]]` table.
///
/// # Errors
///
/// Returns the first validation error, wrapped in a
/// [`DebdataError::ConfigurationError`] that carries the table position.
pub fn validate_all(configs: &[DataConfig]) -> Result<Vec<DataSource>, DebdataError> {
    configs
        .iter()
        .enumerate()
        .map(|(i, config)| {
            DataSource::try_from(config).map_err(|e| match e {
                DebdataError::ConfigurationError {
                    message,
                } => DebdataError::config(format!("data source #{}: {message}", i + 1)),
                other => other,
            })
        })
        .collect()
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, DebdataError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| DebdataError::config(format!("{field} is not set")))
}

fn configured_src(config: &DataConfig) -> Option<PathBuf> {
    config.src.clone().filter(|src| !src.as_os_str().is_empty())
}

/// Convenience for callers holding only configuration: validate, then produce.
///
/// # Errors
///
/// Propagates validation and production errors.
pub fn produce_config(
    config: &DataConfig,
    artifacts: &ArtifactSet,
    consumer: &mut dyn crate::producer::DataConsumer,
) -> anyhow::Result<()> {
    DataSource::try_from(config)?.produce(artifacts, consumer)
}
