use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Optional-feature toggles for a generation run.
///
/// Both default to off; the CLI may force either on regardless of the
/// settings file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case", default)]
pub struct GenerateConfig {
    /// Emit an un-capped fragment for every residue in the ligand name list.
    pub include_ligands: bool,
    /// Emit the aggregate point-charge superfragment.
    pub include_superfragment: bool,
}

impl GenerateConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
