//! Error handling for debdata
//!
//! This module provides the error type shared by every stage of data-source
//! resolution, together with the user-facing error reporting used by the CLI.
//! The error system follows two principles:
//! 1. **Strongly-typed errors** so callers can tell a configuration mistake
//!    from a missing source or an unsupported type
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`DebdataError`] - Enumerated error kinds for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! - **Validation**: [`DebdataError::ConfigurationError`],
//!   [`DebdataError::UnsupportedType`]
//! - **Source lookup**: [`DebdataError::SourceNotFound`]
//! - **Producers**: [`DebdataError::IoError`], [`DebdataError::ZipError`],
//!   [`DebdataError::FileSystemError`], [`DebdataError::PermissionDenied`]
//! - **Descriptors**: [`DebdataError::DescriptorParseError`], [`DebdataError::TomlError`]
//!
//! Validation errors are raised before any producer runs. Producer errors are
//! propagated unchanged; nothing in this crate retries.
//!
//! # Examples
//!
//! ```rust,no_run
//! use debdata::core::{DebdataError, user_friendly_error};
//!
//! let error = DebdataError::SourceNotFound {
//!     path: "target/app.jar".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for debdata operations
///
/// # Examples
///
/// ```rust,no_run
/// use debdata::core::DebdataError;
///
/// fn handle_error(error: &DebdataError) {
///     match error {
///         DebdataError::SourceNotFound { path } => {
///             eprintln!("Build {path} first or set missing_src = \"ignore\"");
///         }
///         DebdataError::UnsupportedType { source_type } => {
///             eprintln!("Unknown data type: {source_type}");
///         }
///         _ => eprintln!("Unexpected error: {error}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum DebdataError {
    /// A field required by the active source type is absent or malformed
    ///
    /// Raised for missing `artifact`/`link_name`/`link_target`/`paths`,
    /// artifact references without a `group:artifact` separator, artifact
    /// references that match nothing, invalid glob patterns, invalid mapper
    /// rules and unknown missing-source behaviors.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration error
        message: String,
    },

    /// The declared source does not exist and the missing-source behavior is `fail`
    #[error("Data source not found: {path}")]
    SourceNotFound {
        /// The source path as configured, or `<unset>` when none was given
        path: String,
    },

    /// The `type` tag matches none of the recognized source kinds
    #[error("Unknown type '{source_type}' (file|directory|archive|template|link|dependency)")]
    UnsupportedType {
        /// The type tag as configured
        source_type: String,
    },

    /// Package descriptor parsing error
    #[error("Invalid package descriptor syntax in {file}")]
    DescriptorParseError {
        /// Path to the descriptor that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// File system error
    #[error("File system error: {operation}")]
    FileSystemError {
        /// The file system operation that failed
        operation: String,
        /// Path where the file system error occurred
        path: String,
    },

    /// Permission denied
    #[error("Permission denied: {operation}")]
    PermissionDenied {
        /// The operation that was denied due to insufficient permissions
        operation: String,
        /// Path where permission was denied
        path: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Archive reading error
    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl DebdataError {
    /// Shorthand for [`DebdataError::ConfigurationError`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }
}

impl Clone for DebdataError {
    fn clone(&self) -> Self {
        match self {
            Self::ConfigurationError {
                message,
            } => Self::ConfigurationError {
                message: message.clone(),
            },
            Self::SourceNotFound {
                path,
            } => Self::SourceNotFound {
                path: path.clone(),
            },
            Self::UnsupportedType {
                source_type,
            } => Self::UnsupportedType {
                source_type: source_type.clone(),
            },
            Self::DescriptorParseError {
                file,
                reason,
            } => Self::DescriptorParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::FileSystemError {
                operation,
                path,
            } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::PermissionDenied {
                operation,
                path,
            } => Self::PermissionDenied {
                operation: operation.clone(),
                path: path.clone(),
            },
            // For errors that don't implement Clone, convert to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::ZipError(e) => Self::Other {
                message: format!("Archive error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use debdata::core::{DebdataError, ErrorContext};
///
/// let context = ErrorContext::new(DebdataError::config("artifact is not set"))
///     .with_suggestion("Add artifact = \"group:artifact\" to the [[data]] table")
///     .with_details("Dependency sources are looked up in the [[artifact]] list");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DebdataError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: DebdataError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`DebdataError`] anywhere in the error chain, [`std::io::Error`]
/// and [`toml::de::Error`]; everything else is reported with its full cause
/// chain.
///
/// # Examples
///
/// ```rust,no_run
/// use debdata::core::user_friendly_error;
///
/// let error = anyhow::anyhow!("Something went wrong");
/// let context = user_friendly_error(error);
/// context.display();
/// ```
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(debdata_error) = error.chain().find_map(|e| e.downcast_ref::<DebdataError>()) {
        return create_error_context(debdata_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(DebdataError::PermissionDenied {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check the ownership and permissions of the data source")
                .with_details("Producers only read from the filesystem, so read permission is enough");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(DebdataError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details(error.to_string());
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(DebdataError::DescriptorParseError {
            file: "package descriptor".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of the descriptor. Verify quotes, brackets, and [[data]] tables");
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(DebdataError::Other {
        message,
    })
}

/// Map each [`DebdataError`] variant to an [`ErrorContext`] with tailored suggestions
fn create_error_context(error: DebdataError) -> ErrorContext {
    match &error {
        DebdataError::ConfigurationError { message } => {
            let suggestion = if message.contains("artifact not found") {
                "Add the artifact to the [[artifact]] list, or check the group and artifact ids for typos"
            } else if message.contains("artifact") {
                "Write the artifact reference as groupId:artifactId"
            } else if message.contains("pattern") {
                "Check the include/exclude globs: '*' stays within a directory, '**' spans directories"
            } else {
                "Check the [[data]] table against the fields required by its type"
            };
            ErrorContext::new(error.clone())
                .with_suggestion(suggestion)
                .with_details("Data sources are validated before any file is read")
        }

        DebdataError::SourceNotFound { path } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Create '{path}' before packaging, or set missing_src = \"ignore\" to skip this source"
            ))
            .with_details("file, archive and directory sources must exist unless missing sources are ignored"),

        DebdataError::UnsupportedType { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Use one of: file, directory, archive, template, link, dependency"),

        DebdataError::DescriptorParseError { file, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Check the TOML syntax in {file}. Common issues: missing quotes, unmatched brackets, invalid characters"
            )),

        DebdataError::PermissionDenied { operation, path } => ErrorContext::new(error.clone())
            .with_suggestion("Check file permissions with 'ls -la'")
            .with_details(format!(
                "Cannot {operation} due to insufficient permissions on {path}"
            )),

        _ => ErrorContext::new(error),
    }
}
