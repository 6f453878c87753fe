//! Rule-based field extractors for resumes.

pub mod contact;
pub mod lexicon;
pub mod name;
pub mod patterns;

pub use contact::{EmailExtractor, PhoneExtractor};
pub use lexicon::{EducationExtractor, SkillsExtractor, EDUCATION_KEYWORDS, SKILL_KEYWORDS};
pub use name::{NameExtractor, NAME_SCAN_LINES};

/// Trait for pattern-based field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// A matched value with its location in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the source text.
    pub position: (usize, usize),
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, start: usize, end: usize) -> Self {
        Self {
            value,
            position: (start, end),
        }
    }
}
