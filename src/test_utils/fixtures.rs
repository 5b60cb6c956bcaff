//! Filesystem fixtures for data-source tests.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// A temporary directory holding sources and descriptors.
///
/// The directory is removed when the fixture is dropped.
pub struct SourceTree {
    temp_dir: TempDir,
}

impl SourceTree {
    /// Creates an empty tree.
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new().context("Failed to create temp directory")?,
        })
    }

    /// Root of the tree.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the tree.
    #[must_use]
    pub fn join(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Writes a file, creating parent directories.
    pub fn file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Creates a directory and its parents.
    pub fn dir(&self, relative: &str) -> Result<PathBuf> {
        let path = self.join(relative);
        fs::create_dir_all(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        Ok(path)
    }

    /// Writes a zip archive.
    ///
    /// Names ending in `/` become directory entries; everything else is a
    /// stored file with `0644` permissions.
    pub fn zip(&self, relative: &str, entries: &[(&str, &str)]) -> Result<PathBuf> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file =
            fs::File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(0o644);

        for (name, content) in entries {
            if name.ends_with('/') {
                zip.add_directory(*name, options.unix_permissions(0o755))?;
            } else {
                zip.start_file(*name, options)?;
                zip.write_all(content.as_bytes())?;
            }
        }
        zip.finish()?;
        Ok(path)
    }

    /// Writes `debdata.toml` at the root and returns its path.
    pub fn descriptor(&self, content: &str) -> Result<PathBuf> {
        self.file("debdata.toml", content)
    }
}
