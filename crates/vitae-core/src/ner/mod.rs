//! Entity recognition used for candidate name extraction.

mod gazetteer;

pub use gazetteer::GazetteerRecognizer;

use serde::{Deserialize, Serialize};

/// Semantic category of a recognized span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    /// A person's name.
    Person,
    /// A company, school or other institution.
    Organization,
    /// Any other capitalized span.
    Misc,
}

/// A recognized span of text with its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    pub fn is_person(&self) -> bool {
        self.label == EntityLabel::Person
    }
}

/// Labels spans of a single line of text.
///
/// Implementations are loaded once and shared read-only across threads.
pub trait EntityRecognizer: Send + Sync {
    /// Recognized entities in the order they appear in `line`.
    fn entities_of(&self, line: &str) -> Vec<Entity>;
}
