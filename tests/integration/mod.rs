//! Integration test suite for debdata
//!
//! End-to-end tests that build real source trees in temporary directories and
//! run them through the library API and the `debdata` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **dispatch**: Every source type resolved through the built-in producers
//! - **descriptor**: Whole descriptors with artifacts, mappers and filters
//! - **cli**: `list` and `validate` through the binary

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod descriptor;
mod dispatch;
