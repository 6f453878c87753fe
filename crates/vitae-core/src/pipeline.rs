//! End-to-end processing: normalize, extract, store.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Result, VitaeError};
use crate::extract::ResumeParser;
use crate::models::config::VitaeConfig;
use crate::models::record::ExtractionRecord;
use crate::ner::{EntityRecognizer, GazetteerRecognizer};
use crate::normalize::TextNormalizer;
use crate::storage::{Document, ResultSink};

/// Outcome of processing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessOutcome {
    Success { file: String },
    Error { file: String, error: String },
}

impl ProcessOutcome {
    pub fn file(&self) -> &str {
        match self {
            Self::Success { file } | Self::Error { file, .. } => file,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Normalizer and parser composed into one pipeline.
#[derive(Clone)]
pub struct ResumePipeline {
    normalizer: TextNormalizer,
    parser: ResumeParser,
}

impl ResumePipeline {
    pub fn new(normalizer: TextNormalizer, parser: ResumeParser) -> Self {
        Self { normalizer, parser }
    }

    /// Build the pipeline described by `config`, loading the recognizer.
    ///
    /// Recognizer load failures surface here, once, at startup.
    pub fn from_config(config: &VitaeConfig) -> Result<Self> {
        config.validate()?;

        let recognizer: Arc<dyn EntityRecognizer> = match &config.recognizer.gazetteer_path {
            Some(path) => Arc::new(GazetteerRecognizer::from_file(path)?),
            None => Arc::new(GazetteerRecognizer::new()),
        };

        let mut normalizer = TextNormalizer::new();
        if let Some(path) = &config.normalizer.debug_text_path {
            normalizer = normalizer.with_debug_dump(path);
        }

        Ok(Self::new(normalizer, ResumeParser::new(recognizer)))
    }

    /// Normalize and extract one document.
    pub fn run(&self, data: &[u8], tag: &str) -> Result<ExtractionRecord> {
        let text = self.normalizer.normalize(data, tag)?;
        Ok(self.parser.extract(&text))
    }

    /// Run one document and store its record, reporting the outcome.
    pub fn process(&self, document: &Document, sink: &dyn ResultSink) -> ProcessOutcome {
        let result = self
            .run(&document.data, &document.format)
            .and_then(|record| sink.put(&document.key, &record).map_err(VitaeError::from));

        match result {
            Ok(()) => {
                info!("Processed {}", document.key);
                ProcessOutcome::Success {
                    file: document.key.clone(),
                }
            }
            Err(e) => {
                warn!("Failed to process {}: {}", document.key, e);
                ProcessOutcome::Error {
                    file: document.key.clone(),
                    error: e.to_string(),
                }
            }
        }
    }
}
