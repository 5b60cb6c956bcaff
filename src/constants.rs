//! Global constants used throughout the debdata codebase.
//!
//! Default ownership and permission values for produced entries, and the
//! version-control/editor patterns the directory producer always skips.

/// Owner name given to every produced entry before mapping.
pub const DEFAULT_USER: &str = "root";

/// Group name given to every produced entry before mapping.
pub const DEFAULT_GROUP: &str = "root";

/// Numeric owner id given to every produced entry before mapping.
pub const DEFAULT_UID: u32 = 0;

/// Numeric group id given to every produced entry before mapping.
pub const DEFAULT_GID: u32 = 0;

/// Permission bits for regular files (`rw-r--r--`).
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Permission bits for directories (`rwxr-xr-x`).
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Permission bits for symbolic links (`rwxrwxrwx`).
pub const DEFAULT_LINK_MODE: u32 = 0o777;

/// Unix file-type bits marking a symbolic link in an archive's external attributes.
pub const UNIX_SYMLINK_TYPE: u32 = 0o120_000;

/// Mask for the file-type bits of a unix mode.
pub const UNIX_TYPE_MASK: u32 = 0o170_000;

/// Mask for the permission bits (including setuid/setgid/sticky) of a unix mode.
pub const UNIX_PERMISSION_MASK: u32 = 0o7777;

/// Patterns excluded from every directory walk, regardless of configuration.
///
/// These are the usual version-control metadata and editor droppings that
/// never belong in a package.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    // Miscellaneous typical temporary files
    "**/*~",
    "**/#*#",
    "**/.#*",
    "**/%*%",
    "**/._*",
    // CVS
    "**/CVS",
    "**/CVS/**",
    "**/.cvsignore",
    // SCCS
    "**/SCCS",
    "**/SCCS/**",
    // Visual SourceSafe
    "**/vssver.scc",
    // Subversion
    "**/.svn",
    "**/.svn/**",
    // Mac
    "**/.DS_Store",
    // Git
    "**/.git",
    "**/.git/**",
    "**/.gitattributes",
    "**/.gitignore",
    "**/.gitmodules",
    // Mercurial
    "**/.hg",
    "**/.hg/**",
    "**/.hgignore",
    "**/.hgsub",
    "**/.hgsubstate",
    "**/.hgtags",
    // Bazaar
    "**/.bzr",
    "**/.bzr/**",
    "**/.bzrignore",
];
