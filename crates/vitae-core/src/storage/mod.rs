//! Document sources and result sinks around the extraction core.

mod object;
mod source;
mod table;

pub use object::JsonObjectSink;
pub use source::FsDocumentSource;
pub use table::CsvTableSink;

use std::sync::Arc;

use crate::error::StorageError;
use crate::models::config::StorageConfig;
use crate::models::record::ExtractionRecord;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A raw document handed to the pipeline.
#[derive(Debug, Clone)]
pub struct Document {
    /// Identifying key (file name or object key).
    pub key: String,
    /// Raw document bytes.
    pub data: Vec<u8>,
    /// Format tag, normally the key's extension.
    pub format: String,
}

/// Supplies documents for processing.
pub trait DocumentSource {
    /// Keys of all available documents.
    fn list(&self) -> Result<Vec<String>>;

    /// Fetch one document by key.
    fn fetch(&self, key: &str) -> Result<Document>;
}

/// Persists extraction records.
pub trait ResultSink: Send + Sync {
    /// Store `record` under `key`.
    fn put(&self, key: &str, record: &ExtractionRecord) -> Result<()>;
}

impl<S: ResultSink + ?Sized> ResultSink for Arc<S> {
    fn put(&self, key: &str, record: &ExtractionRecord) -> Result<()> {
        (**self).put(key, record)
    }
}

/// Writes to several sinks in order, stopping at the first failure.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn ResultSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result objects plus the flat table, if one is configured.
    pub fn from_config(config: &StorageConfig) -> Self {
        let mut fanout =
            Self::new().with_sink(JsonObjectSink::new(&config.object_root, &config.results_prefix));
        if let Some(table) = &config.table_path {
            fanout = fanout.with_sink(CsvTableSink::new(table));
        }
        fanout
    }

    pub fn with_sink(mut self, sink: impl ResultSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl ResultSink for FanoutSink {
    fn put(&self, key: &str, record: &ExtractionRecord) -> Result<()> {
        for sink in &self.sinks {
            sink.put(key, record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::NOT_FOUND;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        keys: Mutex<Vec<String>>,
    }

    impl ResultSink for Recording {
        fn put(&self, key: &str, _record: &ExtractionRecord) -> Result<()> {
            self.keys.lock().unwrap().push(key.to_string());
            Ok(())
        }
    }

    struct Failing;

    impl ResultSink for Failing {
        fn put(&self, key: &str, _record: &ExtractionRecord) -> Result<()> {
            Err(StorageError::io(
                key,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }
    }

    #[test]
    fn test_fanout_stops_at_first_failure() {
        let first = Arc::new(Recording::default());
        let last = Arc::new(Recording::default());

        let sink = FanoutSink::new()
            .with_sink(Arc::clone(&first))
            .with_sink(Failing)
            .with_sink(Arc::clone(&last));

        let record = ExtractionRecord::new("Jane", NOT_FOUND, NOT_FOUND, vec![], vec![]);
        assert!(sink.put("cv.txt", &record).is_err());

        assert_eq!(*first.keys.lock().unwrap(), vec!["cv.txt".to_string()]);
        assert!(last.keys.lock().unwrap().is_empty());
    }

    #[test]
    fn test_from_config_writes_object_and_row() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            object_root: dir.path().to_path_buf(),
            table_path: Some(dir.path().join("table.csv")),
            ..StorageConfig::default()
        };

        let record = ExtractionRecord::new("Jane", "jane@x.io", NOT_FOUND, vec![], vec![]);
        FanoutSink::from_config(&config).put("jane.txt", &record).unwrap();

        assert!(dir.path().join("results/jane.txt.json").exists());
        assert_eq!(CsvTableSink::new(dir.path().join("table.csv")).rows().unwrap().len(), 1);
    }
}
