//! debdata - data-source resolution for Debian package builds
//!
//! A Debian package's payload is assembled from declarative "data sources":
//! a single file, a directory tree, an existing archive, a build artifact, a
//! link, or a list of directories to create. This crate validates those
//! declarations, locates what they refer to, applies include/exclude filters
//! and mapping rules, and streams the resulting entries to a consumer that
//! writes the package.
//!
//! # Architecture Overview
//!
//! ```text
//! DataConfig ──try_from──▶ DataSource ──resolve──▶ Strategy ──run──▶ producer ──▶ DataConsumer
//!                 │                        │
//!          validation only       artifact lookup,
//!          (no filesystem)       missing-source gate
//! ```
//!
//! - Validation happens once, when a [`source::DataSource`] is built from a
//!   [`config::DataConfig`]. Unknown types, missing required fields,
//!   malformed artifact references, bad patterns and bad mapping rules are
//!   all rejected there.
//! - Resolution looks up `dependency` artifacts in an
//!   [`artifact::ArtifactSet`] and applies the missing-source policy to
//!   `file`, `archive` and `directory` sources.
//! - Exactly one producer strategy runs per data source. The built-in
//!   producers live in [`producer`]; callers can supply their own through
//!   [`source::StrategyRunner`].
//!
//! # Core Modules
//!
//! - [`source`] - Validated data sources and the dispatcher
//! - [`artifact`] - `groupId:artifactId` lookup
//! - [`pattern`] - Include/exclude splitting and matching
//! - [`mapping`] - Path, ownership and permission rewriting
//! - [`producer`] - Entry producers and the consumer trait
//! - [`config`] - TOML descriptors
//! - [`core`] - Errors and source type tags
//! - [`cli`] - The `debdata` command line
//!
//! # Descriptor Format
//!
//! ```toml
//! [[data]]
//! type = "directory"
//! src = "target/dist"
//! excludes = "**/*.map, **/*.d.ts"
//!
//! [data.mapper]
//! type = "perm"
//! prefix = "/opt/app"
//! user = "app"
//! group = "app"
//!
//! [[data]]
//! type = "file"
//! src = "packaging/app.service"
//! dst = "lib/systemd/system/app.service"
//! missing_src = "ignore"
//!
//! [[data]]
//! type = "dependency"
//! artifact = "org.example:app-server"
//! dst = "opt/app/lib/app-server.jar"
//!
//! [[data]]
//! type = "link"
//! link_name = "usr/bin/app"
//! link_target = "/opt/app/bin/app"
//!
//! [[data]]
//! type = "template"
//! paths = ["var/log/app", "var/lib/app"]
//!
//! [[artifact]]
//! group_id = "org.example"
//! artifact_id = "app-server"
//! file = "target/app-server-1.4.0.jar"
//! ```
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use debdata::config::PackageDescriptor;
//! use debdata::producer::ResolvedEntry;
//! use debdata::source::validate_all;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let descriptor = PackageDescriptor::load(Path::new("debdata.toml"))?;
//! let artifacts = descriptor.artifact_set();
//!
//! let mut entries: Vec<ResolvedEntry> = Vec::new();
//! for source in validate_all(&descriptor.data)? {
//!     source.produce(&artifacts, &mut entries)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! debdata validate debdata.toml
//! debdata list debdata.toml
//! debdata --verbose list --format json debdata.toml
//! ```

// Core functionality
pub mod artifact;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod source;

// Entry handling
pub mod mapping;
pub mod pattern;
pub mod producer;

// Test utilities (only compiled in test mode or with test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
