//! Loading of the build configuration file.

use anyhow::{Context, Result};
use modsel_schema::BuildConfig;
use std::path::Path;

/// Load and parse a build configuration.
///
/// Files ending in `.toml` are parsed as TOML; anything else is JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not match the
/// configuration schema.
pub fn load(path: &Path) -> Result<BuildConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read build config {}", path.display()))?;

    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let config = if is_toml {
        parse_toml(&content)
    } else {
        parse_json(&content)
    }
    .with_context(|| format!("Failed to parse build config {}", path.display()))?;

    tracing::debug!("Loaded build config from {}", path.display());
    Ok(config)
}

/// Parse a JSON build configuration.
///
/// # Errors
///
/// Returns an error if `content` is not valid JSON for the configuration schema.
pub fn parse_json(content: &str) -> Result<BuildConfig> {
    Ok(serde_json::from_str(content)?)
}

#[cfg(feature = "parsing")]
fn parse_toml(content: &str) -> Result<BuildConfig> {
    Ok(toml::from_str(content)?)
}

#[cfg(not(feature = "parsing"))]
fn parse_toml(_content: &str) -> Result<BuildConfig> {
    anyhow::bail!("TOML build configs require the `parsing` feature")
}
