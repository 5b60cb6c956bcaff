//! Include/exclude pattern handling for data sources.
//!
//! Data sources take their filters as a single delimiter-separated string per
//! direction (`includes = "usr/**, etc/*.conf"`). This module splits those
//! strings into a [`PatternSet`] and compiles both directions into a
//! [`PatternFilter`] that producers consult for every entry name.
//!
//! # Pattern Syntax
//!
//! Patterns are matched against entry names relative to the source root,
//! using `/` as separator:
//!
//! - `*` matches any sequence of characters within a single path component
//! - `**` matches any sequence of path components (recursive matching)
//! - `?` matches any single character
//! - `[abc]` / `[a-z]` match one character from the set or range
//! - a trailing `/` is shorthand for `/**`
//! - a pattern ending in `/**` also matches the directory itself
//!
//! Matching is case-sensitive.
//!
//! # Examples
//!
//! ```rust
//! use debdata::pattern::{PatternFilter, split_patterns};
//!
//! # fn example() -> Result<(), debdata::core::DebdataError> {
//! let includes = split_patterns(Some("bin/*, lib/**"));
//! let excludes = split_patterns(Some("**/*.bak"));
//! let filter = PatternFilter::new(&includes, &excludes)?;
//!
//! assert!(filter.is_included("bin/tool"));
//! assert!(filter.is_included("lib/a/b.so"));
//! assert!(!filter.is_included("lib/a/b.so.bak"));
//! assert!(!filter.is_included("share/doc"));
//! # Ok(())
//! # }
//! ```

use glob::{MatchOptions, Pattern};
use tracing::trace;

use crate::constants::DEFAULT_EXCLUDES;
use crate::core::DebdataError;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// An ordered list of glob patterns, or `Unset`.
///
/// `Unset` means "match everything" when used for includes and "match
/// nothing" when used for excludes. A present-but-empty list never exists:
/// [`split_patterns`] normalizes empty input to `Unset`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PatternSet {
    /// No filter configured
    #[default]
    Unset,
    /// At least one pattern, in configuration order
    Patterns(Vec<String>),
}

impl PatternSet {
    /// Returns `true` when no filter is configured.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, PatternSet::Unset)
    }

    /// The patterns in configuration order; empty for [`PatternSet::Unset`].
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            PatternSet::Unset => &[],
            PatternSet::Patterns(patterns) => patterns,
        }
    }
}

/// Splits a raw include/exclude string into a [`PatternSet`].
///
/// Tokens are separated by any run of commas and spaces. Empty tokens are
/// dropped, order is preserved, and duplicates are kept. `None`, the empty
/// string, and strings made only of delimiters all yield [`PatternSet::Unset`].
///
/// # Examples
///
/// ```rust
/// use debdata::pattern::{PatternSet, split_patterns};
///
/// assert_eq!(split_patterns(None), PatternSet::Unset);
/// assert_eq!(split_patterns(Some("")), PatternSet::Unset);
/// assert_eq!(
///     split_patterns(Some("a/**,, b/* c")),
///     PatternSet::Patterns(vec!["a/**".into(), "b/*".into(), "c".into()])
/// );
/// ```
#[must_use]
pub fn split_patterns(raw: Option<&str>) -> PatternSet {
    let tokens: Vec<String> = raw
        .unwrap_or_default()
        .split([',', ' '])
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    if tokens.is_empty() {
        PatternSet::Unset
    } else {
        PatternSet::Patterns(tokens)
    }
}

/// A single compiled pattern.
///
/// Wraps a [`glob::Pattern`] and remembers the text it was built from. A
/// pattern ending in `/**` carries a second pattern for the bare directory
/// so `build/**` also matches `build`.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Pattern,
    directory: Option<Pattern>,
    original_pattern: String,
}

impl PatternMatcher {
    /// Compiles a pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`DebdataError::ConfigurationError`] if the pattern is not
    /// valid glob syntax (for example `a**b` or an unclosed `[`).
    pub fn new(pattern_str: &str) -> Result<Self, DebdataError> {
        let mut expanded = pattern_str.to_string();
        if expanded.ends_with('/') {
            expanded.push_str("**");
        }

        let pattern = Pattern::new(&expanded).map_err(|e| {
            DebdataError::config(format!("invalid pattern '{pattern_str}': {}", e.msg))
        })?;

        let directory = match expanded.strip_suffix("/**") {
            Some(base) if !base.is_empty() => Some(Pattern::new(base).map_err(|e| {
                DebdataError::config(format!("invalid pattern '{pattern_str}': {}", e.msg))
            })?),
            _ => None,
        };

        Ok(Self {
            pattern,
            directory,
            original_pattern: pattern_str.to_string(),
        })
    }

    /// Checks an entry name against the pattern.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.matches_with(name, MATCH_OPTIONS)
            || self.directory.as_ref().is_some_and(|dir| dir.matches_with(name, MATCH_OPTIONS))
    }

    /// Returns the pattern string this matcher was created from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.original_pattern
    }
}

/// Compiled include and exclude filters for one data source.
///
/// An entry is included when the includes are unset or any include matches,
/// and no exclude matches.
#[derive(Debug, Clone, Default)]
pub struct PatternFilter {
    includes: Option<Vec<PatternMatcher>>,
    excludes: Vec<PatternMatcher>,
}

impl PatternFilter {
    /// Compiles both pattern sets.
    ///
    /// # Errors
    ///
    /// Returns [`DebdataError::ConfigurationError`] naming the first invalid
    /// pattern.
    pub fn new(includes: &PatternSet, excludes: &PatternSet) -> Result<Self, DebdataError> {
        let includes = match includes {
            PatternSet::Unset => None,
            PatternSet::Patterns(patterns) => Some(compile_all(patterns)?),
        };
        let excludes = compile_all(excludes.as_slice())?;

        Ok(Self {
            includes,
            excludes,
        })
    }

    /// Returns a copy of this filter that also excludes [`DEFAULT_EXCLUDES`].
    #[must_use]
    pub fn with_default_excludes(&self) -> Self {
        let mut filter = self.clone();
        filter
            .excludes
            .extend(DEFAULT_EXCLUDES.iter().filter_map(|pattern| PatternMatcher::new(pattern).ok()));
        filter
    }

    /// Decides whether an entry name passes the filter.
    ///
    /// Leading `./` and trailing `/` are ignored so directory names from
    /// archives compare the same as names from a directory walk.
    #[must_use]
    pub fn is_included(&self, name: &str) -> bool {
        let name = normalize_name(name);

        let included = self
            .includes
            .as_ref()
            .is_none_or(|includes| includes.iter().any(|include| include.matches(name)));

        let included = included && !self.is_excluded(name);
        trace!("Filter {} -> {}", name, included);
        included
    }

    /// Returns `true` when any exclude pattern matches the name.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        let name = normalize_name(name);
        self.excludes.iter().any(|exclude| exclude.matches(name))
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<PatternMatcher>, DebdataError> {
    patterns.iter().map(|pattern| PatternMatcher::new(pattern)).collect()
}

fn normalize_name(name: &str) -> &str {
    let name = name.strip_prefix("./").unwrap_or(name);
    name.strip_suffix('/').unwrap_or(name)
}
