//! Entry producers and the consumer interface.
//!
//! A producer walks one resolved source and hands a [`ResolvedEntry`] to a
//! [`DataConsumer`] for every object it selects. Producers apply the data
//! source's [`PatternFilter`] to decide what to emit and run every emitted
//! entry through its [`MapperChain`] first.
//!
//! | Producer | Source | Emits |
//! |---|---|---|
//! | [`FileProducer`] | one file | one file entry |
//! | [`DirectoryProducer`] | a directory tree | directories, files, symlinks |
//! | [`ArchiveProducer`] | a zip archive | the archive's entries |
//! | [`LinkProducer`] | a name and a target | one link entry |
//! | [`TemplateProducer`] | a list of paths | one directory entry per path |
//!
//! Consumers receive entries in the order the producer discovers them and
//! never see an entry twice. Entries are not retained by producers.

mod archive;
mod directory;
mod file;
mod link;
mod template;

pub use archive::ArchiveProducer;
pub use directory::DirectoryProducer;
pub use file::FileProducer;
pub use link::{LinkProducer, LinkSpec};
pub use template::TemplateProducer;

use anyhow::Result;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, DEFAULT_GID, DEFAULT_GROUP, DEFAULT_LINK_MODE,
    DEFAULT_UID, DEFAULT_USER,
};
use crate::mapping::MapperChain;
use crate::pattern::PatternFilter;

/// Where a file entry's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContent {
    /// A file on disk, read by the consumer
    Path(PathBuf),
    /// Content already in memory, e.g. extracted from an archive
    Bytes(Vec<u8>),
}

/// What kind of object an entry describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file
    File(EntryContent),
    /// A directory
    Directory,
    /// A symbolic (`symbolic = true`) or hard link
    Link {
        /// Path the link points at
        target: String,
        /// Symbolic link when `true`, hard link otherwise
        symbolic: bool,
    },
}

impl EntryKind {
    /// Short label used in listings.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            EntryKind::File(_) => "file",
            EntryKind::Directory => "dir",
            EntryKind::Link {
                symbolic: true,
                ..
            } => "symlink",
            EntryKind::Link {
                symbolic: false,
                ..
            } => "hardlink",
        }
    }
}

/// One object destined for the package, as handed to a [`DataConsumer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// Destination path inside the package
    pub name: String,
    /// Object kind and content
    pub kind: EntryKind,
    /// Owner name
    pub user: String,
    /// Numeric owner id
    pub uid: u32,
    /// Group name
    pub group: String,
    /// Numeric group id
    pub gid: u32,
    /// Permission bits
    pub mode: u32,
    /// Content length in bytes; zero for directories and links
    pub size: u64,
}

impl ResolvedEntry {
    fn new(name: impl Into<String>, kind: EntryKind, mode: u32, size: u64) -> Self {
        Self {
            name: name.into(),
            kind,
            user: DEFAULT_USER.to_string(),
            uid: DEFAULT_UID,
            group: DEFAULT_GROUP.to_string(),
            gid: DEFAULT_GID,
            mode,
            size,
        }
    }

    /// A regular file owned by root with default file permissions.
    pub fn file(name: impl Into<String>, content: EntryContent, size: u64) -> Self {
        Self::new(name, EntryKind::File(content), DEFAULT_FILE_MODE, size)
    }

    /// A directory owned by root with default directory permissions.
    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::Directory, DEFAULT_DIR_MODE, 0)
    }

    /// A link owned by root. Symbolic links get `0777`, hard links the file default.
    pub fn link(name: impl Into<String>, target: impl Into<String>, symbolic: bool) -> Self {
        let mode = if symbolic { DEFAULT_LINK_MODE } else { DEFAULT_FILE_MODE };
        Self::new(
            name,
            EntryKind::Link {
                target: target.into(),
                symbolic,
            },
            mode,
            0,
        )
    }

    /// Replaces the permission bits.
    #[must_use]
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }
}

/// Receives the entries a producer emits.
///
/// Errors returned here abort the producer and propagate to the caller of
/// `produce` unchanged.
pub trait DataConsumer {
    /// Accepts one entry.
    fn accept(&mut self, entry: ResolvedEntry) -> Result<()>;
}

impl DataConsumer for Vec<ResolvedEntry> {
    fn accept(&mut self, entry: ResolvedEntry) -> Result<()> {
        self.push(entry);
        Ok(())
    }
}

impl<F> DataConsumer for F
where
    F: FnMut(ResolvedEntry) -> Result<()>,
{
    fn accept(&mut self, entry: ResolvedEntry) -> Result<()> {
        self(entry)
    }
}

/// Emits the entries of one resolved source.
pub trait DataProducer {
    /// Streams every selected entry to the consumer.
    fn produce(&self, consumer: &mut dyn DataConsumer) -> Result<()>;
}

/// Filter and mapper chain shared by every producer of one data source.
#[derive(Debug, Clone, Copy)]
pub struct ProducerContext<'a> {
    /// Include/exclude filter
    pub filter: &'a PatternFilter,
    /// Mappers applied before emission
    pub mappers: &'a MapperChain,
}

impl<'a> ProducerContext<'a> {
    /// Bundles a filter and a mapper chain.
    #[must_use]
    pub const fn new(filter: &'a PatternFilter, mappers: &'a MapperChain) -> Self {
        Self {
            filter,
            mappers,
        }
    }

    /// Maps the entry and hands it to the consumer.
    pub fn emit(&self, entry: ResolvedEntry, consumer: &mut dyn DataConsumer) -> Result<()> {
        consumer.accept(self.mappers.apply(entry))
    }
}
