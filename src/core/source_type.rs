//! Source type tags recognized by the dispatcher.

use serde::{Deserialize, Serialize};

/// Discriminator selecting which producer strategy and validation rules apply
/// to a `[[data]]` table.
///
/// Parsing is ASCII case-insensitive, so `"File"`, `"FILE"` and `"file"` all
/// select [`SourceType::File`].
///
/// # Examples
///
/// ```rust
/// use debdata::core::SourceType;
///
/// let kind: SourceType = "Directory".parse().unwrap();
/// assert_eq!(kind, SourceType::Directory);
/// assert!(kind.requires_existing_source());
///
/// assert!("tarball".parse::<SourceType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// A build artifact looked up by `groupId:artifactId`
    Dependency,

    /// A symbolic or hard link synthesized from a name and a target
    Link,

    /// A list of literal directory paths
    Template,

    /// A single file on disk
    File,

    /// An existing archive whose entries are re-emitted
    Archive,

    /// A directory tree walked recursively
    Directory,
}

impl SourceType {
    /// All source types, in the order the dispatcher evaluates them.
    pub const ALL: [SourceType; 6] = [
        SourceType::Dependency,
        SourceType::Link,
        SourceType::Template,
        SourceType::File,
        SourceType::Archive,
        SourceType::Directory,
    ];

    /// Tag as written in configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SourceType::Dependency => "dependency",
            SourceType::Link => "link",
            SourceType::Template => "template",
            SourceType::File => "file",
            SourceType::Archive => "archive",
            SourceType::Directory => "directory",
        }
    }

    /// Whether this type reads a pre-existing filesystem object named by `src`.
    ///
    /// Only these types are subject to the missing-source policy. Dependencies,
    /// links and templates resolve or synthesize their own source.
    #[must_use]
    pub const fn requires_existing_source(&self) -> bool {
        matches!(self, SourceType::File | SourceType::Archive | SourceType::Directory)
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceType {
    type Err = crate::core::DebdataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceType::ALL.into_iter().find(|kind| kind.as_str().eq_ignore_ascii_case(s)).ok_or_else(
            || crate::core::DebdataError::UnsupportedType {
                source_type: s.to_string(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DebdataError;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("dependency".parse::<SourceType>().unwrap(), SourceType::Dependency);
        assert_eq!("LINK".parse::<SourceType>().unwrap(), SourceType::Link);
        assert_eq!("Template".parse::<SourceType>().unwrap(), SourceType::Template);
        assert_eq!("fIlE".parse::<SourceType>().unwrap(), SourceType::File);
        assert_eq!("ARCHIVE".parse::<SourceType>().unwrap(), SourceType::Archive);
        assert_eq!("Directory".parse::<SourceType>().unwrap(), SourceType::Directory);
    }

    #[test]
    fn test_parse_unknown_type() {
        let err = "tarball".parse::<SourceType>().unwrap_err();
        match err {
            DebdataError::UnsupportedType {
                source_type,
            } => assert_eq!(source_type, "tarball"),
            other => panic!("Expected UnsupportedType, got {other:?}"),
        }

        // Surrounding whitespace is not trimmed
        assert!(" file".parse::<SourceType>().is_err());
        assert!("".parse::<SourceType>().is_err());
    }

    #[test]
    fn test_requires_existing_source() {
        let gated: Vec<_> =
            SourceType::ALL.into_iter().filter(SourceType::requires_existing_source).collect();
        assert_eq!(gated, vec![SourceType::File, SourceType::Archive, SourceType::Directory]);
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for kind in SourceType::ALL {
            assert_eq!(kind.to_string().parse::<SourceType>().unwrap(), kind);
        }
    }
}
