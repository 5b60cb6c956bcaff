//! Generic TOML parsing with file path context.
//!
//! Used to load package descriptors and any other TOML document the CLI
//! reads. Errors name the file and whether reading or parsing failed:
//!
//! ```text
//! Failed to parse config file: /path/to/debdata.toml
//! Caused by:
//!     unknown field `srcc`, expected one of `type`, `src`, ...
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML configuration file into the specified type.
///
/// # Examples
///
/// ```rust,no_run
/// use debdata::config::{PackageDescriptor, parse_config};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let descriptor: PackageDescriptor = parse_config(Path::new("debdata.toml"))?;
/// println!("{} data sources", descriptor.data.len());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or does
/// not match the shape of `T`. The file path is attached as context and the
/// underlying I/O or TOML error is kept as the cause.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}
