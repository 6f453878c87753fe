//! Core library for resume parsing.
//!
//! This crate provides:
//! - Document normalization (PDF, plain text and DOCX to plain text)
//! - Entity recognition for candidate names (gazetteer based, pluggable)
//! - Rule-based field extraction (email, phone, skills, education)
//! - Summary composition and the flat record layout used by storage sinks

pub mod error;
pub mod models;
pub mod normalize;
pub mod ner;
pub mod extract;
pub mod storage;
pub mod pipeline;

pub use error::{NormalizeError, RecognizerError, Result, StorageError, VitaeError};
pub use models::config::VitaeConfig;
pub use models::record::{ExtractionRecord, FlatRecord, NOT_FOUND, PLACEHOLDER_NAME};
pub use normalize::{normalize, DocumentFormat, TextNormalizer};
pub use ner::{Entity, EntityLabel, EntityRecognizer, GazetteerRecognizer};
pub use extract::ResumeParser;
pub use storage::{
    CsvTableSink, Document, DocumentSource, FanoutSink, FsDocumentSource, JsonObjectSink, ResultSink,
};
pub use pipeline::{ProcessOutcome, ResumePipeline};
