//! Error types for the vitae-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the vitae library.
#[derive(Error, Debug)]
pub enum VitaeError {
    /// Document normalization error.
    #[error("normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// Entity recognizer could not be initialized.
    #[error("recognizer error: {0}")]
    Recognizer(#[from] RecognizerError),

    /// Result sink or document source failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning raw document bytes into plain text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The format tag is outside the supported set.
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// The bytes could not be decoded or parsed under the claimed format.
    #[error("malformed {format} input: {reason}")]
    MalformedInput { format: &'static str, reason: String },
}

impl NormalizeError {
    pub(crate) fn malformed(format: &'static str, reason: impl ToString) -> Self {
        Self::MalformedInput {
            format,
            reason: reason.to_string(),
        }
    }
}

/// Errors raised while loading the entity recognizer at startup.
#[derive(Error, Debug)]
pub enum RecognizerError {
    /// The gazetteer file could not be read.
    #[error("failed to load gazetteer {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The gazetteer file contained no names.
    #[error("gazetteer {} contains no names", .0.display())]
    EmptyGazetteer(PathBuf),
}

/// Errors raised by document sources and result sinks.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Invalid glob pattern for a document listing.
    #[error("invalid document pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Failed to serialize a record.
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    /// Failed to read or write the flat record table.
    #[error("table error: {0}")]
    Table(#[from] csv::Error),

    /// I/O error against the storage location.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for the vitae library.
pub type Result<T> = std::result::Result<T, VitaeError>;
