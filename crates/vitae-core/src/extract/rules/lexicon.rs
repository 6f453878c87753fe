//! Keyword lexicon matching for skills and education.

/// Skill tokens, in result order.
pub const SKILL_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "aws",
    "sql",
    "javascript",
    "cloud",
    "docker",
    "html",
    "css",
    "react",
    "node",
    "database",
    "git",
];

/// Keywords that mark a line as an education entry.
pub const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "degree",
    "university",
    "college",
    "diploma",
    "bsc",
    "msc",
    "certificate",
];

/// Matches skill tokens anywhere in the text.
///
/// Matching is a case-insensitive substring test, so "git" also matches
/// inside "digital".
#[derive(Debug, Clone, Copy)]
pub struct SkillsExtractor {
    lexicon: &'static [&'static str],
}

impl SkillsExtractor {
    pub fn new() -> Self {
        Self {
            lexicon: SKILL_KEYWORDS,
        }
    }

    /// Skills present in `text`, in lexicon order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.lexicon
            .iter()
            .filter(|skill| lowered.contains(*skill))
            .map(|skill| skill.to_string())
            .collect()
    }
}

impl Default for SkillsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects lines that mention an education keyword.
#[derive(Debug, Clone, Copy)]
pub struct EducationExtractor {
    lexicon: &'static [&'static str],
}

impl EducationExtractor {
    pub fn new() -> Self {
        Self {
            lexicon: EDUCATION_KEYWORDS,
        }
    }

    /// Trimmed matching lines in document order. Empty when nothing matches.
    pub fn extract(&self, text: &str) -> Vec<String> {
        text.lines()
            .filter(|line| {
                let lowered = line.to_lowercase();
                self.lexicon.iter().any(|keyword| lowered.contains(keyword))
            })
            .map(|line| line.trim().to_string())
            .collect()
    }
}

impl Default for EducationExtractor {
    fn default() -> Self {
        Self::new()
    }
}
