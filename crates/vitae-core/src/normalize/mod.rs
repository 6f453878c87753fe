//! Document normalization: raw bytes plus a format tag to plain text.

mod docx;
mod pdf;
mod text;

pub use docx::DocxReader;
pub use pdf::PdfExtractor;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::NormalizeError;

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Page-based document (PDF).
    Pdf,
    /// UTF-8 plain text.
    Text,
    /// Paragraph-based document (Office Open XML).
    Docx,
}

impl DocumentFormat {
    /// Canonical file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Text => "txt",
            Self::Docx => "docx",
        }
    }

    /// Detect the format from a file path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        ext.parse()
    }
}

impl FromStr for DocumentFormat {
    type Err = NormalizeError;

    /// Parse a format tag such as `pdf`, `.TXT` or `docx`.
    fn from_str(tag: &str) -> Result<Self> {
        let normalized = tag.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "pdf" => Ok(Self::Pdf),
            "txt" | "text" => Ok(Self::Text),
            "docx" => Ok(Self::Docx),
            _ => Err(NormalizeError::UnsupportedFormat(tag.to_string())),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Converts raw documents into plain text.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    debug_text_path: Option<PathBuf>,
}

impl TextNormalizer {
    /// Create a normalizer without a debug dump.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write every normalized text to `path` for debugging.
    pub fn with_debug_dump(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_text_path = Some(path.into());
        self
    }

    /// Normalize bytes tagged with a format name.
    pub fn normalize(&self, data: &[u8], tag: &str) -> Result<String> {
        let format: DocumentFormat = tag.parse()?;
        self.normalize_format(data, format)
    }

    /// Normalize bytes of a known format.
    pub fn normalize_format(&self, data: &[u8], format: DocumentFormat) -> Result<String> {
        let text = match format {
            DocumentFormat::Pdf => {
                let mut extractor = PdfExtractor::new();
                extractor.load(data)?;
                extractor.extract_text()?
            }
            DocumentFormat::Text => text::decode_utf8(data)?,
            DocumentFormat::Docx => DocxReader::new().read_text(data)?,
        };

        debug!("Normalized {} bytes of {} into {} chars", data.len(), format, text.len());

        if let Some(path) = &self.debug_text_path {
            self.dump(path, &text);
        }

        Ok(text)
    }

    fn dump(&self, path: &Path, text: &str) {
        if let Err(e) = std::fs::write(path, text) {
            warn!("Failed to write debug text to {}: {}", path.display(), e);
        }
    }
}

/// Normalize bytes tagged with a format name using a default normalizer.
pub fn normalize(data: &[u8], tag: &str) -> Result<String> {
    TextNormalizer::new().normalize(data, tag)
}
