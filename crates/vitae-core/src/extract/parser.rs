//! Resume parser combining entity recognition and rule-based extraction.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::models::record::{ExtractionRecord, NOT_FOUND};
use crate::ner::{EntityRecognizer, GazetteerRecognizer};

use super::rules::{
    contact::{EmailExtractor, PhoneExtractor},
    lexicon::{EducationExtractor, SkillsExtractor},
    name::NameExtractor,
    FieldExtractor,
};

/// Extracts an [`ExtractionRecord`] from plain text.
///
/// The recognizer is shared, so one parser (or clones of it) can serve any
/// number of threads.
#[derive(Clone)]
pub struct ResumeParser {
    recognizer: Arc<dyn EntityRecognizer>,
    skills: SkillsExtractor,
    education: EducationExtractor,
}

impl ResumeParser {
    /// Create a parser around an already loaded recognizer.
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            recognizer,
            skills: SkillsExtractor::new(),
            education: EducationExtractor::new(),
        }
    }

    /// Extract all fields from `text`. Never fails.
    pub fn extract(&self, text: &str) -> ExtractionRecord {
        let start = Instant::now();

        let name = NameExtractor::new(self.recognizer.as_ref()).extract(text);

        let email = EmailExtractor
            .extract(text)
            .map(|m| m.value)
            .unwrap_or_else(|| NOT_FOUND.to_string());

        let phone = PhoneExtractor
            .extract(text)
            .map(|m| m.value)
            .unwrap_or_else(|| NOT_FOUND.to_string());

        let skills = self.skills.extract(text);
        let education = self.education.extract(text);

        debug!(
            "Extracted name={:?}, {} skills, {} education lines in {:?}",
            name,
            skills.len(),
            education.len(),
            start.elapsed()
        );

        ExtractionRecord::new(name, email, phone, skills, education)
    }
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new(Arc::new(GazetteerRecognizer::new()))
    }
}
