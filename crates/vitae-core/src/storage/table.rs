//! Flat record table keyed by email, stored as CSV.

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use super::{ResultSink, Result};
use crate::error::StorageError;
use crate::models::record::{ExtractionRecord, FlatRecord};

/// A CSV table of [`FlatRecord`] rows with one row per email.
///
/// `put` replaces an existing row with the same email or appends a new one.
pub struct CsvTableSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvTableSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Read all rows. A missing table is empty.
    pub fn rows(&self) -> Result<Vec<FlatRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let rows: Vec<FlatRecord> = reader
            .deserialize()
            .collect::<std::result::Result<_, _>>()?;
        Ok(rows)
    }

    fn write_rows(&self, rows: &[FlatRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush().map_err(|e| StorageError::io(&self.path, e))?;
        Ok(())
    }
}

impl ResultSink for CsvTableSink {
    fn put(&self, key: &str, record: &ExtractionRecord) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let flat = record.to_flat()?;
        let mut rows = self.rows()?;

        match rows.iter_mut().find(|row| row.email == flat.email) {
            Some(existing) => *existing = flat,
            None => rows.push(flat),
        }

        self.write_rows(&rows)?;
        debug!("Saved {} to table {} ({} rows)", key, self.path.display(), rows.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::NOT_FOUND;
    use pretty_assertions::assert_eq;

    fn record(name: &str, email: &str) -> ExtractionRecord {
        ExtractionRecord::new(
            name,
            email,
            NOT_FOUND,
            vec!["python".to_string(), "git".to_string()],
            vec!["BSc, Uni".to_string()],
        )
    }

    #[test]
    fn test_missing_table_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let table = CsvTableSink::new(dir.path().join("table.csv"));
        assert!(table.rows().unwrap().is_empty());
    }

    #[test]
    fn test_put_appends_and_upserts_by_email() {
        let dir = tempfile::tempdir().unwrap();
        let table = CsvTableSink::new(dir.path().join("db").join("table.csv"));

        table.put("a.txt", &record("Jane Doe", "jane@example.com")).unwrap();
        table.put("b.txt", &record("John Roe", "john@example.com")).unwrap();
        table.put("c.txt", &record("Jane D.", "jane@example.com")).unwrap();

        let rows = table.rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Jane D.");
        assert_eq!(rows[1].name, "John Roe");
        assert_eq!(rows[0].skills, r#"["python","git"]"#);
        assert_eq!(rows[0].education, r#"["BSc, Uni"]"#);
    }

    #[test]
    fn test_header_matches_flat_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        let table = CsvTableSink::new(&path);
        table.put("a.txt", &record("Jane Doe", "jane@example.com")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.lines().next().unwrap(),
            "email,name,phone,skills,education,summary"
        );
    }
}
