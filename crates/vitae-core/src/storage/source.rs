//! Filesystem document source.

use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{debug, warn};

use super::{Document, DocumentSource, Result};
use crate::error::StorageError;

/// Lists documents matching a glob pattern, filtered by extension.
///
/// Keys are paths relative to the pattern's literal leading directories, so
/// `uploads/**/*` yields keys like `a/cv.pdf` for `uploads/a/cv.pdf`.
pub struct FsDocumentSource {
    pattern: String,
    base_dir: PathBuf,
    extensions: Vec<String>,
}

impl FsDocumentSource {
    /// Create a source over `pattern` (e.g. `uploads/*`).
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        Self {
            base_dir: base_dir_of(&pattern),
            pattern,
            extensions: vec!["pdf".to_string(), "txt".to_string(), "docx".to_string()],
        }
    }

    /// Restrict listings to these extensions (case-insensitive, no dot).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    fn is_supported(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        path.is_file() && self.extensions.iter().any(|e| *e == ext)
    }

    fn key_of(&self, path: &Path) -> String {
        path.strip_prefix(&self.base_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}

/// Leading components of `pattern` that contain no glob syntax.
///
/// A pattern without wildcards names a single file, whose parent is the base.
fn base_dir_of(pattern: &str) -> PathBuf {
    let is_glob = |part: &str| part.contains(['*', '?', '[']);
    let path = Path::new(pattern);

    let mut base = PathBuf::new();
    let mut literal = true;
    for component in path.components() {
        if is_glob(&component.as_os_str().to_string_lossy()) {
            literal = false;
            break;
        }
        base.push(component);
    }

    if literal {
        base.pop();
    }
    base
}

impl DocumentSource for FsDocumentSource {
    fn list(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = glob(&self.pattern)?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|p| self.is_supported(p))
            .map(|p| self.key_of(&p))
            .collect();

        keys.sort();
        debug!("Listed {} documents for {}", keys.len(), self.pattern);
        Ok(keys)
    }

    fn fetch(&self, key: &str) -> Result<Document> {
        let path = self.base_dir.join(key);
        let data = std::fs::read(&path).map_err(|e| StorageError::io(&path, e))?;
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();

        Ok(Document {
            key: key.to_string(),
            data,
            format,
        })
    }
}
