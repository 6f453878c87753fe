//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;
use vitae_core::VitaeConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vitae")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<VitaeConfig> {
    if let Some(path) = config_path {
        return Ok(VitaeConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config {}", default_path.display());
        Ok(VitaeConfig::from_file(&default_path)?)
    } else {
        Ok(VitaeConfig::default())
    }
}
