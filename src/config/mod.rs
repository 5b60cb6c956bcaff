//! Data-source configuration as written by users.
//!
//! A package descriptor is a TOML document listing the data sources that make
//! up a package and, optionally, the build artifacts `dependency` sources can
//! refer to:
//!
//! ```toml
//! [[data]]
//! type = "directory"
//! src = "target/dist"
//! excludes = "**/*.map"
//!
//! [[data]]
//! type = "dependency"
//! artifact = "org.example:server"
//! dst = "usr/share/server/server.jar"
//!
//! [[data]]
//! type = "link"
//! link_name = "usr/bin/server"
//! link_target = "/usr/share/server/bin/server"
//!
//! [[artifact]]
//! group_id = "org.example"
//! artifact_id = "server"
//! file = "target/server-1.0.jar"
//! ```
//!
//! [`DataConfig`] is the raw, unvalidated form of one `[[data]]` table. It is
//! turned into a validated [`DataSource`](crate::source::DataSource) with
//! `DataSource::try_from`, which is where every required-field and syntax
//! check happens.

mod parser;

pub use parser::parse_config;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::artifact::{ArtifactRecord, ArtifactSet};
use crate::mapping::MapperSpec;

/// One `[[data]]` table, before validation.
///
/// Only the fields relevant to `type` are consulted; the rest are ignored.
/// Maven-plugin spellings (`linkName`, `linkTarget`, `missingSrc`) are
/// accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// Source type tag, matched case-insensitively
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    /// Source path for `file`, `archive` and `directory`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<PathBuf>,

    /// Destination name for `file` and `dependency`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst: Option<String>,

    /// `groupId:artifactId` reference for `dependency`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,

    /// Link path for `link`
    #[serde(default, alias = "linkName", skip_serializing_if = "Option::is_none")]
    pub link_name: Option<String>,

    /// Link target for `link`
    #[serde(default, alias = "linkTarget", skip_serializing_if = "Option::is_none")]
    pub link_target: Option<String>,

    /// Symbolic (default) or hard link
    #[serde(default = "default_symlink")]
    pub symlink: bool,

    /// Comma/space separated include patterns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes: Option<String>,

    /// Comma/space separated exclude patterns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excludes: Option<String>,

    /// Directory paths for `template`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,

    /// `fail` (default) or `ignore`
    #[serde(default, alias = "missingSrc", skip_serializing_if = "Option::is_none")]
    pub missing_src: Option<String>,

    /// Optional mapping rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapper: Option<MapperSpec>,
}

const fn default_symlink() -> bool {
    true
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source_type: None,
            src: None,
            dst: None,
            artifact: None,
            link_name: None,
            link_target: None,
            symlink: default_symlink(),
            includes: None,
            excludes: None,
            paths: Vec::new(),
            missing_src: None,
            mapper: None,
        }
    }
}

impl DataConfig {
    /// An otherwise empty configuration of the given type.
    pub fn of_type(source_type: impl Into<String>) -> Self {
        Self {
            source_type: Some(source_type.into()),
            ..Self::default()
        }
    }

    /// Sets `src`.
    #[must_use]
    pub fn with_src(mut self, src: impl AsRef<Path>) -> Self {
        self.src = Some(src.as_ref().to_path_buf());
        self
    }

    /// Sets `dst`.
    #[must_use]
    pub fn with_dst(mut self, dst: impl Into<String>) -> Self {
        self.dst = Some(dst.into());
        self
    }

    /// Sets `artifact`.
    #[must_use]
    pub fn with_artifact(mut self, artifact: impl Into<String>) -> Self {
        self.artifact = Some(artifact.into());
        self
    }

    /// Sets `link_name`, `link_target` and `symlink`.
    #[must_use]
    pub fn with_link(
        mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        symlink: bool,
    ) -> Self {
        self.link_name = Some(name.into());
        self.link_target = Some(target.into());
        self.symlink = symlink;
        self
    }

    /// Sets `paths`.
    #[must_use]
    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the raw include and exclude strings.
    #[must_use]
    pub fn with_filters(mut self, includes: Option<&str>, excludes: Option<&str>) -> Self {
        self.includes = includes.map(str::to_string);
        self.excludes = excludes.map(str::to_string);
        self
    }

    /// Sets `missing_src`.
    #[must_use]
    pub fn with_missing_src(mut self, missing_src: impl Into<String>) -> Self {
        self.missing_src = Some(missing_src.into());
        self
    }

    /// Sets the mapping rule.
    #[must_use]
    pub fn with_mapper(mut self, mapper: MapperSpec) -> Self {
        self.mapper = Some(mapper);
        self
    }
}

/// A whole descriptor: data sources in package order plus known artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageDescriptor {
    /// `[[data]]` tables in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<DataConfig>,

    /// `[[artifact]]` tables in declaration order
    #[serde(default, rename = "artifact", skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<ArtifactRecord>,
}

impl PackageDescriptor {
    /// Loads a descriptor from a TOML file.
    ///
    /// Relative `src` and artifact `file` paths are resolved against the
    /// descriptor's directory.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed; see [`parse_config`].
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut descriptor: Self = parse_config(path)?;
        if let Some(base) = path.parent() {
            descriptor.rebase(base);
        }
        Ok(descriptor)
    }

    /// Joins every relative path in the descriptor onto `base`.
    pub fn rebase(&mut self, base: &Path) {
        for data in &mut self.data {
            if let Some(src) = &data.src
                && src.is_relative()
                && !src.as_os_str().is_empty()
            {
                data.src = Some(base.join(src));
            }
        }
        for artifact in &mut self.artifacts {
            if artifact.file.is_relative() {
                artifact.file = base.join(&artifact.file);
            }
        }
    }

    /// Builds the artifact lookup from the `[[artifact]]` tables.
    #[must_use]
    pub fn artifact_set(&self) -> ArtifactSet {
        ArtifactSet::new(self.artifacts.iter().cloned())
    }
}

impl std::str::FromStr for PackageDescriptor {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DataConfig::default();
        assert!(config.symlink);
        assert!(config.source_type.is_none());
        assert!(config.paths.is_empty());

        let parsed: DataConfig = toml::from_str("type = \"file\"").unwrap();
        assert!(parsed.symlink);
        assert_eq!(parsed, DataConfig::of_type("file"));
    }

    #[test]
    fn test_maven_aliases() {
        let config: DataConfig = toml::from_str(
            r#"
            type = "link"
            linkName = "usr/bin/app"
            linkTarget = "/opt/app/app"
            symlink = false
            missingSrc = "IGNORE"
            "#,
        )
        .unwrap();

        assert_eq!(config.link_name.as_deref(), Some("usr/bin/app"));
        assert_eq!(config.link_target.as_deref(), Some("/opt/app/app"));
        assert!(!config.symlink);
        assert_eq!(config.missing_src.as_deref(), Some("IGNORE"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<DataConfig, _> = toml::from_str("type = \"file\"\nsource = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_descriptor_parses_tables() {
        let descriptor: PackageDescriptor = r#"
            [[data]]
            type = "template"
            paths = ["var/log/app", "var/lib/app"]

            [[data]]
            type = "directory"
            src = "dist"

            [data.mapper]
            type = "perm"
            prefix = "/opt/app"

            [[artifact]]
            groupId = "org.example"
            artifactId = "app"
            file = "target/app.jar"
        "#
        .parse()
        .unwrap();

        assert_eq!(descriptor.data.len(), 2);
        assert_eq!(descriptor.data[0].paths, vec!["var/log/app", "var/lib/app"]);
        assert!(descriptor.data[1].mapper.is_some());
        assert_eq!(descriptor.artifacts.len(), 1);
        assert_eq!(descriptor.artifact_set().len(), 1);
    }

    #[test]
    fn test_load_rebases_relative_paths() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("debdata.toml");
        std::fs::write(
            &path,
            r#"
            [[data]]
            type = "file"
            src = "build/app.conf"

            [[data]]
            type = "file"
            src = "/etc/absolute.conf"

            [[artifact]]
            group_id = "g"
            artifact_id = "a"
            file = "lib/a.jar"
            "#,
        )
        .unwrap();

        let descriptor = PackageDescriptor::load(&path).unwrap();
        assert_eq!(descriptor.data[0].src.as_deref(), Some(temp.path().join("build/app.conf").as_path()));
        assert_eq!(descriptor.data[1].src.as_deref(), Some(Path::new("/etc/absolute.conf")));
        assert_eq!(descriptor.artifacts[0].file, temp.path().join("lib/a.jar"));
    }

    #[test]
    fn test_rebase_leaves_empty_src_empty() {
        let mut descriptor: PackageDescriptor =
            "[[data]]\ntype = \"directory\"\nsrc = \"\"\n".parse().unwrap();
        descriptor.rebase(Path::new("/srv/pkg"));
        assert_eq!(descriptor.data[0].src.as_deref(), Some(Path::new("")));
    }
}
