//! What to do when a `file`, `archive` or `directory` source does not exist.

use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::core::DebdataError;

/// Configured reaction to a missing source path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingSourceBehavior {
    /// Abort with [`DebdataError::SourceNotFound`]
    #[default]
    Fail,
    /// Produce nothing and succeed
    Ignore,
}

impl MissingSourceBehavior {
    /// Lowercase name as written in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MissingSourceBehavior::Fail => "fail",
            MissingSourceBehavior::Ignore => "ignore",
        }
    }

    /// Parses an optional configuration value; absent means [`Fail`](Self::Fail).
    ///
    /// # Errors
    ///
    /// See the [`FromStr`] implementation.
    pub fn parse_optional(raw: Option<&str>) -> Result<Self, DebdataError> {
        raw.map_or(Ok(Self::default()), str::parse)
    }
}

impl FromStr for MissingSourceBehavior {
    type Err = DebdataError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("fail") {
            Ok(Self::Fail)
        } else if value.eq_ignore_ascii_case("ignore") {
            Ok(Self::Ignore)
        } else {
            Err(DebdataError::config(format!(
                "unknown missing_src value '{s}', expected 'fail' or 'ignore'"
            )))
        }
    }
}

impl fmt::Display for MissingSourceBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`gate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate<'a> {
    /// The source exists; resolution continues with this path
    Proceed(&'a Path),
    /// The source is missing and may be skipped
    Skip,
}

/// Decides whether resolution may continue for a filesystem-backed source.
///
/// # Errors
///
/// Returns [`DebdataError::SourceNotFound`] when the path is unset or does
/// not exist and the behavior is [`MissingSourceBehavior::Fail`].
pub fn gate(path: Option<&Path>, behavior: MissingSourceBehavior) -> Result<Gate<'_>, DebdataError> {
    match path {
        Some(path) if path.exists() => Ok(Gate::Proceed(path)),
        _ => {
            let shown = path.map_or_else(|| "<unset>".to_string(), |path| path.display().to_string());
            match behavior {
                MissingSourceBehavior::Ignore => {
                    info!("Data source not found, skipping: {}", shown);
                    Ok(Gate::Skip)
                }
                MissingSourceBehavior::Fail => Err(DebdataError::SourceNotFound {
                    path: shown,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_behavior() {
        assert_eq!("fail".parse::<MissingSourceBehavior>().unwrap(), MissingSourceBehavior::Fail);
        assert_eq!("IGNORE".parse::<MissingSourceBehavior>().unwrap(), MissingSourceBehavior::Ignore);
        assert_eq!(
            "  Ignore \n".parse::<MissingSourceBehavior>().unwrap(),
            MissingSourceBehavior::Ignore
        );
        assert_eq!(MissingSourceBehavior::parse_optional(None).unwrap(), MissingSourceBehavior::Fail);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        for bad in ["", "skip", "ignored", "f"] {
            let err = bad.parse::<MissingSourceBehavior>().unwrap_err();
            assert!(matches!(err, DebdataError::ConfigurationError { .. }), "{bad:?}");
        }
    }

    #[test]
    fn test_gate_existing_path_proceeds() {
        let temp = TempDir::new().unwrap();
        for behavior in [MissingSourceBehavior::Fail, MissingSourceBehavior::Ignore] {
            assert_eq!(gate(Some(temp.path()), behavior).unwrap(), Gate::Proceed(temp.path()));
        }
    }

    #[test]
    fn test_gate_missing_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("absent.jar");

        assert_eq!(gate(Some(missing.as_path()), MissingSourceBehavior::Ignore).unwrap(), Gate::Skip);
        assert_eq!(gate(None, MissingSourceBehavior::Ignore).unwrap(), Gate::Skip);

        let err = gate(Some(missing.as_path()), MissingSourceBehavior::Fail).unwrap_err();
        assert!(matches!(&err, DebdataError::SourceNotFound { path } if path.ends_with("absent.jar")));

        let err = gate(None, MissingSourceBehavior::default()).unwrap_err();
        assert!(matches!(&err, DebdataError::SourceNotFound { path } if path == "<unset>"));
    }
}
