//! Configuration structures for the resume pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::VitaeError;
use crate::normalize::DocumentFormat;

/// Main configuration for the vitae pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VitaeConfig {
    /// Text normalizer configuration.
    pub normalizer: NormalizerConfig,

    /// Entity recognizer configuration.
    pub recognizer: RecognizerConfig,

    /// Document source and result sink configuration.
    pub storage: StorageConfig,
}

/// Text normalizer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Write each normalized text to this file for debugging.
    pub debug_text_path: Option<PathBuf>,
}

/// Entity recognizer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Extra given names, one per line, merged with the built-in list.
    pub gazetteer_path: Option<PathBuf>,
}

/// Storage locations for documents and extraction results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory of the object store.
    pub object_root: PathBuf,

    /// Prefix under the object root for result objects.
    pub results_prefix: String,

    /// Flat record table keyed by email (disabled if unset).
    pub table_path: Option<PathBuf>,

    /// Document extensions picked up by batch listings.
    pub extensions: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            object_root: PathBuf::from("store"),
            results_prefix: "results".to_string(),
            table_path: Some(PathBuf::from("store/resume_data.csv")),
            extensions: vec!["pdf".to_string(), "txt".to_string(), "docx".to_string()],
        }
    }
}

impl StorageConfig {
    /// Directory holding result objects.
    pub fn results_dir(&self) -> PathBuf {
        self.object_root.join(&self.results_prefix)
    }
}

impl VitaeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Reject settings the pipeline cannot honor.
    pub fn validate(&self) -> crate::error::Result<()> {
        for ext in &self.storage.extensions {
            if ext.parse::<DocumentFormat>().is_err() {
                return Err(VitaeError::Config(format!(
                    "storage.extensions lists unsupported format '{ext}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: VitaeConfig =
            serde_json::from_str(r#"{"storage": {"object_root": "/tmp/bucket"}}"#).unwrap();

        assert_eq!(config.storage.object_root, PathBuf::from("/tmp/bucket"));
        assert_eq!(config.storage.results_prefix, "results");
        assert_eq!(config.storage.results_dir(), PathBuf::from("/tmp/bucket/results"));
        assert!(config.normalizer.debug_text_path.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = VitaeConfig::default();
        config.recognizer.gazetteer_path = Some(PathBuf::from("names.txt"));
        config.save(&path).unwrap();

        let loaded = VitaeConfig::from_file(&path).unwrap();
        assert_eq!(loaded.recognizer.gazetteer_path, Some(PathBuf::from("names.txt")));
        assert_eq!(loaded.storage.extensions, vec!["pdf", "txt", "docx"]);
    }

    #[test]
    fn test_validate_extensions() {
        let mut config = VitaeConfig::default();
        assert!(config.validate().is_ok());

        config.storage.extensions.push(".TXT".to_string());
        assert!(config.validate().is_ok());

        config.storage.extensions.push("rtf".to_string());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, VitaeError::Config(msg) if msg.contains("'rtf'")));
    }
}
