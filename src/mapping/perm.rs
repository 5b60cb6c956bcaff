//! Ownership/permission/path mapper.

use serde::{Deserialize, Serialize};

use super::EntryMapper;
use crate::constants::UNIX_PERMISSION_MASK;
use crate::core::DebdataError;
use crate::producer::{EntryKind, ResolvedEntry};

/// Configuration of a `perm` mapping rule.
///
/// Every field is optional; unset fields keep the value the producer chose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermSpec {
    /// Directory prepended to every entry name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Number of leading path components removed before the prefix is added
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip: Option<usize>,
    /// Owner name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Group name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Numeric owner id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<u32>,
    /// Numeric group id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gid: Option<u32>,
    /// Octal permission bits for files and links, e.g. `"0644"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filemode: Option<String>,
    /// Octal permission bits for directories, e.g. `"0755"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dirmode: Option<String>,
}

/// Compiled `perm` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermMapper {
    prefix: Option<String>,
    strip: usize,
    user: Option<String>,
    group: Option<String>,
    uid: Option<u32>,
    gid: Option<u32>,
    file_mode: Option<u32>,
    dir_mode: Option<u32>,
}

impl TryFrom<&PermSpec> for PermMapper {
    type Error = DebdataError;

    fn try_from(spec: &PermSpec) -> Result<Self, Self::Error> {
        Ok(Self {
            prefix: spec.prefix.clone().filter(|prefix| !prefix.is_empty()),
            strip: spec.strip.unwrap_or(0),
            user: spec.user.clone(),
            group: spec.group.clone(),
            uid: spec.uid,
            gid: spec.gid,
            file_mode: spec.filemode.as_deref().map(|mode| parse_mode("filemode", mode)).transpose()?,
            dir_mode: spec.dirmode.as_deref().map(|mode| parse_mode("dirmode", mode)).transpose()?,
        })
    }
}

impl EntryMapper for PermMapper {
    fn map(&self, mut entry: ResolvedEntry) -> ResolvedEntry {
        let stripped = strip_path(self.strip, &entry.name);
        entry.name = match &self.prefix {
            Some(prefix) => {
                format!("{}/{}", prefix.trim_end_matches('/'), stripped.trim_start_matches('/'))
            }
            None => stripped.to_string(),
        };

        if let Some(user) = &self.user {
            entry.user.clone_from(user);
        }
        if let Some(group) = &self.group {
            entry.group.clone_from(group);
        }
        if let Some(uid) = self.uid {
            entry.uid = uid;
        }
        if let Some(gid) = self.gid {
            entry.gid = gid;
        }

        let mode = match entry.kind {
            EntryKind::Directory => self.dir_mode,
            _ => self.file_mode,
        };
        if let Some(mode) = mode {
            entry.mode = mode;
        }

        entry
    }
}

/// Removes `count` leading path components from `name`.
///
/// A leading `/` does not count as a component boundary. When the name has
/// fewer separators than requested it is returned unchanged.
///
/// # Examples
///
/// ```rust
/// use debdata::mapping::strip_path;
///
/// assert_eq!(strip_path(1, "build/usr/bin/tool"), "usr/bin/tool");
/// assert_eq!(strip_path(2, "build/usr/bin/tool"), "bin/tool");
/// assert_eq!(strip_path(0, "build/tool"), "build/tool");
/// assert_eq!(strip_path(3, "a/b"), "a/b");
/// ```
#[must_use]
pub fn strip_path(count: usize, name: &str) -> &str {
    let mut cut = 0;
    for _ in 0..count {
        let from = cut + name[cut..].chars().next().map_or(1, char::len_utf8);
        match name.get(from..).and_then(|rest| rest.find('/')) {
            Some(offset) => cut = from + offset,
            None => return name,
        }
    }
    if count == 0 { name } else { &name[cut + 1..] }
}

fn parse_mode(field: &str, raw: &str) -> Result<u32, DebdataError> {
    u32::from_str_radix(raw.trim(), 8)
        .ok()
        .filter(|mode| mode & !UNIX_PERMISSION_MASK == 0)
        .ok_or_else(|| {
            DebdataError::config(format!("{field} '{raw}' is not an octal permission value"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_DIR_MODE, DEFAULT_FILE_MODE};
    use crate::producer::EntryContent;
    use std::path::PathBuf;

    fn file(name: &str) -> ResolvedEntry {
        ResolvedEntry::file(name, EntryContent::Path(PathBuf::from("/src").join(name)), 10)
    }

    #[test]
    fn test_strip_path() {
        assert_eq!(strip_path(0, "a/b/c"), "a/b/c");
        assert_eq!(strip_path(1, "a/b/c"), "b/c");
        assert_eq!(strip_path(2, "a/b/c"), "c");
        assert_eq!(strip_path(3, "a/b/c"), "a/b/c");
        assert_eq!(strip_path(1, "a"), "a");
        assert_eq!(strip_path(1, "/a/b"), "b");
        assert_eq!(strip_path(1, "a/"), "");
        assert_eq!(strip_path(0, ""), "");
        assert_eq!(strip_path(1, ""), "");
    }

    #[test]
    fn test_strip_path_multibyte_components() {
        assert_eq!(strip_path(1, "é/b"), "b");
        assert_eq!(strip_path(1, "日本/語/c"), "語/c");
        assert_eq!(strip_path(2, "日本/語/c"), "c");
        assert_eq!(strip_path(1, "/ü/x"), "ü/x");
        assert_eq!(strip_path(1, "ü"), "ü");
    }

    #[test]
    fn test_unset_spec_only_keeps_values() {
        let mapper = PermMapper::try_from(&PermSpec::default()).unwrap();
        let entry = file("usr/bin/tool");
        assert_eq!(mapper.map(entry.clone()), entry);
    }

    #[test]
    fn test_prefix_and_strip() {
        let mapper = PermMapper::try_from(&PermSpec {
            prefix: Some("/opt/app/".to_string()),
            strip: Some(1),
            ..PermSpec::default()
        })
        .unwrap();

        assert_eq!(mapper.map(file("dist/lib/a.so")).name, "/opt/app/lib/a.so");
    }

    #[test]
    fn test_ownership_overrides() {
        let mapper = PermMapper::try_from(&PermSpec {
            user: Some("app".to_string()),
            group: Some("staff".to_string()),
            uid: Some(1001),
            gid: Some(50),
            ..PermSpec::default()
        })
        .unwrap();

        let mapped = mapper.map(file("x"));
        assert_eq!(mapped.user, "app");
        assert_eq!(mapped.group, "staff");
        assert_eq!(mapped.uid, 1001);
        assert_eq!(mapped.gid, 50);
    }

    #[test]
    fn test_modes_apply_by_kind() {
        let mapper = PermMapper::try_from(&PermSpec {
            filemode: Some("0600".to_string()),
            dirmode: Some("700".to_string()),
            ..PermSpec::default()
        })
        .unwrap();

        assert_eq!(mapper.map(file("secret")).mode, 0o600);
        assert_eq!(mapper.map(ResolvedEntry::directory("private")).mode, 0o700);

        let only_files = PermMapper::try_from(&PermSpec {
            filemode: Some("0600".to_string()),
            ..PermSpec::default()
        })
        .unwrap();
        assert_eq!(only_files.map(ResolvedEntry::directory("d")).mode, DEFAULT_DIR_MODE);
        assert_ne!(only_files.map(file("f")).mode, DEFAULT_FILE_MODE);
    }

    #[test]
    fn test_invalid_modes() {
        for bad in ["", "9", "0o644", "rwx", "17777"] {
            let result = PermMapper::try_from(&PermSpec {
                dirmode: Some(bad.to_string()),
                ..PermSpec::default()
            });
            assert!(
                matches!(result, Err(DebdataError::ConfigurationError { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_spec_rejects_unknown_fields() {
        let result: Result<PermSpec, _> = toml::from_str("filemod = \"644\"");
        assert!(result.is_err());
    }
}
