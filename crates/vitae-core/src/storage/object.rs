//! JSON result objects under a directory-backed object store.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::{ResultSink, Result};
use crate::error::StorageError;
use crate::models::record::ExtractionRecord;

/// Writes each record as `<root>/<prefix>/<key>.json`.
///
/// The key keeps its relative directories, so `a/cv.pdf` and `b/cv.pdf` land in
/// separate objects. Root, prefix and `..` components of a key are dropped.
pub struct JsonObjectSink {
    results_dir: PathBuf,
}

impl JsonObjectSink {
    /// Create a sink writing into `root/prefix`.
    pub fn new(root: impl AsRef<Path>, prefix: &str) -> Self {
        Self {
            results_dir: root.as_ref().join(prefix),
        }
    }

    /// Location of the object for a document key.
    pub fn object_path(&self, key: &str) -> PathBuf {
        let mut path = self.results_dir.clone();
        for component in Path::new(key).components() {
            if let Component::Normal(part) = component {
                path.push(part);
            }
        }

        let mut object = path.into_os_string();
        object.push(".json");
        PathBuf::from(object)
    }
}

impl ResultSink for JsonObjectSink {
    fn put(&self, key: &str, record: &ExtractionRecord) -> Result<()> {
        let path = self.object_path(key);
        let dir = path.parent().unwrap_or(self.results_dir.as_path());
        std::fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

        let body = serde_json::to_string_pretty(record)?;
        std::fs::write(&path, body).map_err(|e| StorageError::io(&path, e))?;

        debug!("Saved result object {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::NOT_FOUND;

    #[test]
    fn test_object_path_keeps_relative_key() {
        let sink = JsonObjectSink::new("/bucket", "results");
        assert_eq!(
            sink.object_path("jane.pdf"),
            PathBuf::from("/bucket/results/jane.pdf.json")
        );
        assert_eq!(
            sink.object_path("a/cv.pdf"),
            PathBuf::from("/bucket/results/a/cv.pdf.json")
        );
        assert_ne!(sink.object_path("a/cv.pdf"), sink.object_path("b/cv.pdf"));
    }

    #[test]
    fn test_object_path_stays_under_results() {
        let sink = JsonObjectSink::new("/bucket", "results");
        assert_eq!(
            sink.object_path("/etc/../cv.pdf"),
            PathBuf::from("/bucket/results/etc/cv.pdf.json")
        );
    }

    #[test]
    fn test_put_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonObjectSink::new(dir.path(), "results");

        let record = ExtractionRecord::new(
            "Jane Doe",
            "jane@example.com",
            NOT_FOUND,
            vec!["sql".to_string()],
            vec![],
        );
        sink.put("2024/jane.txt", &record).unwrap();

        let body =
            std::fs::read_to_string(dir.path().join("results/2024/jane.txt.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["email"], "jane@example.com");
        assert_eq!(json["skills"], serde_json::json!(["sql"]));
        assert!(body.contains('\n'));
    }
}
