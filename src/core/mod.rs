//! Core types for debdata
//!
//! This module holds the pieces every other module depends on: the error type
//! and its user-facing reporting, and the [`SourceType`] tag that drives
//! dispatch.
//!
//! # Modules
//!
//! ## `error` - Error Handling
//!
//! - [`DebdataError`] - Classification of every failure: configuration errors,
//!   missing sources, unsupported types, and producer I/O errors
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! ## `source_type` - Type Tags
//!
//! - [`SourceType`] - The recognized source kinds, parsed case-insensitively
//!
//! # Examples
//!
//! ```rust
//! use debdata::core::{DebdataError, SourceType};
//!
//! let err = "zipfile".parse::<SourceType>().unwrap_err();
//! assert!(matches!(err, DebdataError::UnsupportedType { .. }));
//! ```

pub mod error;
mod source_type;

pub use error::{DebdataError, ErrorContext, user_friendly_error};
pub use source_type::SourceType;
