//! Test utilities for debdata
//!
//! Helpers shared by unit and integration tests: one-time logging setup and
//! a [`SourceTree`] fixture that lays out source files, zip archives and
//! descriptors in a temporary directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use debdata::test_utils::SourceTree;
//!
//! let tree = SourceTree::new().unwrap();
//! tree.file("dist/bin/app", "#!/bin/sh").unwrap();
//! let descriptor = tree
//!     .descriptor("[[data]]\ntype = \"directory\"\nsrc = \"dist\"\n")
//!     .unwrap();
//! assert!(descriptor.exists());
//! ```

mod fixtures;

pub use fixtures::SourceTree;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Installs the tracing subscriber once, no matter how often it is called.
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging
/// stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer() // Important: uses test-compatible writer
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
