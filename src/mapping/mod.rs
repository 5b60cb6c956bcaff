//! Entry mapping rules.
//!
//! A data source may carry one mapping rule that rewrites the name, ownership
//! and permissions of every entry it produces. The rule is declared as a
//! [`MapperSpec`] in configuration and compiled once into a [`MapperChain`]
//! when the data source is built.
//!
//! ```toml
//! [[data]]
//! type = "directory"
//! src = "target/dist"
//!
//! [data.mapper]
//! type = "perm"
//! prefix = "/opt/app"
//! user = "app"
//! filemode = "640"
//! ```

mod perm;

pub use perm::{PermMapper, PermSpec, strip_path};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::DebdataError;
use crate::producer::ResolvedEntry;

/// Transforms an entry before it reaches the consumer.
pub trait EntryMapper: fmt::Debug + Send + Sync {
    /// Returns the mapped entry.
    fn map(&self, entry: ResolvedEntry) -> ResolvedEntry;
}

/// Declarative mapping rule as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MapperSpec {
    /// Ownership, permission and path rewriting
    Perm(PermSpec),
}

impl MapperSpec {
    /// Compiles the rule.
    ///
    /// # Errors
    ///
    /// Returns [`DebdataError::ConfigurationError`] for invalid rule values
    /// such as non-octal modes.
    pub fn compile(&self) -> Result<Box<dyn EntryMapper>, DebdataError> {
        match self {
            MapperSpec::Perm(spec) => Ok(Box::new(PermMapper::try_from(spec)?)),
        }
    }
}

/// The compiled mappers applied to every entry, in order.
///
/// An empty chain is the identity.
#[derive(Debug, Default)]
pub struct MapperChain {
    mappers: Vec<Box<dyn EntryMapper>>,
}

impl MapperChain {
    /// The identity chain.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Compiles an optional rule into a chain of zero or one mapper.
    ///
    /// # Errors
    ///
    /// Propagates [`MapperSpec::compile`] failures.
    pub fn compile(spec: Option<&MapperSpec>) -> Result<Self, DebdataError> {
        let mappers = spec.map(MapperSpec::compile).transpose()?.into_iter().collect();
        Ok(Self {
            mappers,
        })
    }

    /// Builds a chain from already compiled mappers.
    #[must_use]
    pub fn from_mappers(mappers: Vec<Box<dyn EntryMapper>>) -> Self {
        Self {
            mappers,
        }
    }

    /// Returns `true` when the chain leaves entries unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.mappers.is_empty()
    }

    /// Number of mappers in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    /// Returns `true` when the chain holds no mappers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    /// Runs the entry through every mapper in order.
    #[must_use]
    pub fn apply(&self, entry: ResolvedEntry) -> ResolvedEntry {
        self.mappers.iter().fold(entry, |entry, mapper| mapper.map(entry))
    }
}
