//! Extraction record produced by the field extractor.

use serde::{Deserialize, Serialize};

/// Sentinel stored when a field has no match.
pub const NOT_FOUND: &str = "not found";

/// Name used when neither an entity nor a usable first line exists.
pub const PLACEHOLDER_NAME: &str = "Unknown";

const SKILLS_FALLBACK: &str = "various areas";
const EDUCATION_FALLBACK: &str = "unknown subjects";

/// Structured information extracted from one document.
///
/// The summary is always composed from the other fields at construction,
/// so the fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionRecord {
    name: String,
    email: String,
    phone: String,
    skills: Vec<String>,
    education: Vec<String>,
    summary: String,
}

impl ExtractionRecord {
    /// Build a record and compose its summary.
    ///
    /// An empty `name` becomes [`PLACEHOLDER_NAME`] and an empty `education`
    /// becomes a single [`NOT_FOUND`] entry.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        skills: Vec<String>,
        education: Vec<String>,
    ) -> Self {
        let mut name = name.into();
        if name.is_empty() {
            name = PLACEHOLDER_NAME.to_string();
        }

        let education = if education.is_empty() {
            vec![NOT_FOUND.to_string()]
        } else {
            education
        };

        let summary = compose_summary(&name, &skills, &education);

        Self {
            name,
            email: email.into(),
            phone: phone.into(),
            skills,
            education,
            summary,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Matched skills in lexicon order.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Matching education lines; never empty.
    pub fn education(&self) -> &[String] {
        &self.education
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Flatten into the scalar-only layout used by table sinks.
    pub fn to_flat(&self) -> serde_json::Result<FlatRecord> {
        Ok(FlatRecord {
            email: self.email.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            skills: serde_json::to_string(&self.skills)?,
            education: serde_json::to_string(&self.education)?,
            summary: self.summary.clone(),
        })
    }
}

/// Compose the one-sentence summary from the other record fields.
pub fn compose_summary(name: &str, skills: &[String], education: &[String]) -> String {
    let skills_str = if skills.is_empty() {
        SKILLS_FALLBACK.to_string()
    } else {
        skills.join(", ")
    };

    let education_str = match education.first() {
        Some(first) if first != NOT_FOUND => first.as_str(),
        _ => EDUCATION_FALLBACK,
    };

    format!("{name} has skills in {skills_str} and studied {education_str}.")
}

/// Flat key-value form of a record, keyed by email.
///
/// List fields are JSON-encoded strings so the row holds only scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub skills: String,
    pub education: String,
    pub summary: String,
}
