//! Candidate name extraction from the top of a document.

use tracing::trace;

use crate::models::record::PLACEHOLDER_NAME;
use crate::ner::EntityRecognizer;

/// Number of leading lines searched for a person entity.
pub const NAME_SCAN_LINES: usize = 5;

/// Finds the candidate's name using an entity recognizer.
pub struct NameExtractor<'a> {
    recognizer: &'a dyn EntityRecognizer,
}

impl<'a> NameExtractor<'a> {
    pub fn new(recognizer: &'a dyn EntityRecognizer) -> Self {
        Self { recognizer }
    }

    /// The first person entity in the first lines, else the trimmed first
    /// line, else [`PLACEHOLDER_NAME`].
    ///
    /// The first person entity ends the scan even when its text is blank.
    pub fn extract(&self, text: &str) -> String {
        let mut lines = text.lines().take(NAME_SCAN_LINES).peekable();
        let first_line = lines.peek().map(|l| l.trim().to_string());

        for (index, line) in lines.enumerate() {
            let person = self
                .recognizer
                .entities_of(line)
                .into_iter()
                .find(|entity| entity.is_person());

            if let Some(entity) = person {
                let name = entity.text.trim();
                if name.is_empty() {
                    trace!("Blank person entity on line {}", index + 1);
                    break;
                }
                trace!("Person entity {:?} on line {}", name, index + 1);
                return name.to_string();
            }
        }

        match first_line {
            Some(line) if !line.is_empty() => line,
            _ => PLACEHOLDER_NAME.to_string(),
        }
    }
}
