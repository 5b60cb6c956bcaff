//! Build artifact lookup for `dependency` data sources.
//!
//! The surrounding build supplies the artifacts it resolved as a list of
//! [`ArtifactRecord`]s. A dependency source names one of them with a
//! `groupId:artifactId` reference; [`ArtifactSet::resolve`] turns that
//! reference into the artifact's file.
//!
//! Matching is exact and case-sensitive. There is no wildcard or version
//! matching: when the build supplies several records with the same
//! `groupId:artifactId` (different classifiers or versions), the first one
//! supplied wins.
//!
//! # Examples
//!
//! ```rust
//! use debdata::artifact::{ArtifactRecord, ArtifactSet};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), debdata::core::DebdataError> {
//! let artifacts = ArtifactSet::new(vec![
//!     ArtifactRecord::new("org.example", "server", "target/server.jar"),
//!     ArtifactRecord::new("org.example", "client", "target/client.jar"),
//! ]);
//!
//! assert_eq!(artifacts.resolve("org.example:client")?, Path::new("target/client.jar"));
//! assert!(artifacts.resolve("org.example:missing").is_err());
//! assert!(artifacts.resolve("no-separator").is_err());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::core::DebdataError;

/// A build artifact known to the surrounding build tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// Maven-style group identifier
    #[serde(alias = "groupId")]
    pub group_id: String,
    /// Maven-style artifact identifier
    #[serde(alias = "artifactId")]
    pub artifact_id: String,
    /// Resolved location of the artifact on disk
    pub file: PathBuf,
}

impl ArtifactRecord {
    /// Creates a record.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            file: file.into(),
        }
    }

    /// The `groupId:artifactId` string this record answers to.
    #[must_use]
    pub fn reference(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

/// A parsed `groupId:artifactId` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactRef {
    group_id: String,
    artifact_id: String,
}

impl ArtifactRef {
    /// Parses a reference.
    ///
    /// # Errors
    ///
    /// Returns [`DebdataError::ConfigurationError`] unless the reference
    /// contains exactly one `:` with text on both sides.
    pub fn parse(reference: &str) -> Result<Self, DebdataError> {
        match reference.split_once(':') {
            Some((group_id, artifact_id))
                if !group_id.is_empty() && !artifact_id.is_empty() && !artifact_id.contains(':') =>
            {
                Ok(Self {
                    group_id: group_id.to_string(),
                    artifact_id: artifact_id.to_string(),
                })
            }
            _ => Err(DebdataError::config(format!(
                "malformed artifact reference '{reference}', it needs to be in the form groupId:artifactId"
            ))),
        }
    }

    /// The group half of the reference.
    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// The artifact half of the reference.
    #[must_use]
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    /// Whether the record answers to this reference.
    #[must_use]
    pub fn matches(&self, record: &ArtifactRecord) -> bool {
        record.group_id == self.group_id && record.artifact_id == self.artifact_id
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

impl std::str::FromStr for ArtifactRef {
    type Err = DebdataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Read-only artifact lookup built once per run.
///
/// Records are kept in supplied order. Lookups go through an index keyed by
/// the `groupId:artifactId` string that points at the first record with that
/// key, so later duplicates are unreachable.
#[derive(Debug, Clone, Default)]
pub struct ArtifactSet {
    records: Vec<ArtifactRecord>,
    index: HashMap<String, usize>,
}

impl ArtifactSet {
    /// Builds the lookup from records in the order the build supplied them.
    pub fn new(records: impl IntoIterator<Item = ArtifactRecord>) -> Self {
        let mut set = Self::default();
        for record in records {
            let key = record.reference();
            if set.index.contains_key(&key) {
                trace!("Ignoring duplicate artifact {} at {}", key, record.file.display());
                continue;
            }
            set.index.insert(key, set.records.len());
            set.records.push(record);
        }
        set
    }

    /// Number of distinct `groupId:artifactId` keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the set holds no artifacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the distinct records in supplied order.
    pub fn iter(&self) -> impl Iterator<Item = &ArtifactRecord> {
        self.records.iter()
    }

    /// Finds the record for an already-parsed reference.
    #[must_use]
    pub fn find(&self, reference: &ArtifactRef) -> Option<&ArtifactRecord> {
        self.index.get(&reference.to_string()).map(|&i| &self.records[i])
    }

    /// Resolves a raw `groupId:artifactId` string to the artifact's file.
    ///
    /// # Errors
    ///
    /// Returns [`DebdataError::ConfigurationError`] when the reference is
    /// malformed or no artifact matches it.
    pub fn resolve(&self, reference: &str) -> Result<&Path, DebdataError> {
        let reference = ArtifactRef::parse(reference)?;
        self.resolve_ref(&reference)
    }

    /// Resolves a parsed reference to the artifact's file.
    ///
    /// # Errors
    ///
    /// Returns [`DebdataError::ConfigurationError`] when no artifact matches.
    pub fn resolve_ref(&self, reference: &ArtifactRef) -> Result<&Path, DebdataError> {
        let record = self.find(reference).ok_or_else(|| {
            DebdataError::config(format!(
                "artifact not found: could not find dependency {reference} among {} supplied artifacts, did you include it as a dependency?",
                self.len()
            ))
        })?;

        debug!("Resolved artifact {} to {}", reference, record.file.display());
        Ok(&record.file)
    }
}

impl FromIterator<ArtifactRecord> for ArtifactSet {
    fn from_iter<I: IntoIterator<Item = ArtifactRecord>>(iter: I) -> Self {
        Self::new(iter)
    }
}
