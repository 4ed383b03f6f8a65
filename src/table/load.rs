use anyhow::{bail, Context};
use std::path::Path;

use super::types::RouteTable;

/// Serialization format of a route table file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            _ => bail!(
                "unsupported route table extension for {} (expected .yaml, .yml, .json or .toml)",
                path.display()
            ),
        }
    }
}

impl RouteTable {
    /// Read and parse a route table file
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read route table {}", path.display()))?;
        Self::parse(&content, format)
            .with_context(|| format!("failed to parse route table {}", path.display()))
    }

    /// Parse route table content in the given format
    pub fn parse(content: &str, format: Format) -> anyhow::Result<Self> {
        let table = match format {
            Format::Yaml => serde_yaml::from_str(content)?,
            Format::Json => serde_json::from_str(content)?,
            Format::Toml => toml::from_str(content)?,
        };
        Ok(table)
    }
}
