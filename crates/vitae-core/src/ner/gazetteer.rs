//! Gazetteer-based entity recognizer.
//!
//! Lines are split into runs of capitalized words. A run is labelled:
//! - `Organization` if it contains an institution marker ("University", "Inc")
//! - `Person` if it starts with a known given name, or if it is two or three
//!   words and none of them is common resume vocabulary
//! - `Misc` otherwise
//!
//! Single words are only reported when they are a known given name.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use super::{Entity, EntityLabel, EntityRecognizer};
use crate::error::RecognizerError;

static BUILTIN_GIVEN_NAMES: &str = include_str!("../../data/given_names.txt");

const ORG_MARKERS: &[&str] = &[
    "university", "college", "institute", "school", "academy", "inc", "ltd", "llc", "corp",
    "corporation", "company", "gmbh", "plc", "group", "technologies", "labs", "bank",
];

const COMMON_WORDS: &[&str] = &[
    "curriculum", "vitae", "resume", "résumé", "cv", "profile", "summary", "objective",
    "contact", "email", "e-mail", "phone", "mobile", "tel", "address", "skills", "education",
    "experience", "work", "employment", "history", "projects", "references", "certifications",
    "languages", "interests", "senior", "junior", "lead", "principal", "staff", "software",
    "engineer", "engineering", "developer", "manager", "analyst", "consultant", "designer",
    "architect", "director", "intern", "data", "scientist", "full", "stack", "web", "frontend",
    "backend", "product", "project", "technical", "new", "york", "san", "francisco", "los",
    "angeles", "united", "states", "kingdom", "street", "avenue", "road", "linkedin", "github",
    "python", "java", "aws", "sql", "javascript", "cloud", "docker", "html", "css", "react",
    "node", "database", "git", "the", "dear", "january", "february", "march", "april", "may",
    "june", "july", "august", "september", "october", "november", "december", "present",
];

const MAX_NAME_WORDS: usize = 4;

/// Entity recognizer backed by a list of known given names.
pub struct GazetteerRecognizer {
    given_names: HashSet<String>,
}

impl GazetteerRecognizer {
    /// Create a recognizer with the built-in given names.
    pub fn new() -> Self {
        let given_names: HashSet<String> = parse_names(BUILTIN_GIVEN_NAMES).collect();
        debug!("Loaded {} built-in given names", given_names.len());
        Self { given_names }
    }

    /// Create a recognizer with the built-in names plus those in `path`.
    pub fn from_file(path: &Path) -> Result<Self, RecognizerError> {
        let content = std::fs::read_to_string(path).map_err(|source| RecognizerError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let extra: Vec<String> = parse_names(&content).collect();
        if extra.is_empty() {
            return Err(RecognizerError::EmptyGazetteer(path.to_path_buf()));
        }

        info!("Loaded {} given names from {}", extra.len(), path.display());
        Ok(Self::new().with_names(extra))
    }

    /// Add given names to the gazetteer.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.given_names
            .extend(names.into_iter().map(|n| n.as_ref().trim().to_lowercase()));
        self
    }

    /// Whether `word` is a known given name.
    pub fn is_given_name(&self, word: &str) -> bool {
        self.given_names.contains(&word.to_lowercase())
    }

    fn classify(&self, run: &[&str]) -> Option<EntityLabel> {
        let lowered: Vec<String> = run
            .iter()
            .map(|w| w.trim_end_matches('.').to_lowercase())
            .collect();

        if run.len() == 1 {
            return self.is_given_name(&lowered[0]).then_some(EntityLabel::Person);
        }

        if lowered.iter().any(|w| ORG_MARKERS.contains(&w.as_str())) {
            return Some(EntityLabel::Organization);
        }

        if run.len() > MAX_NAME_WORDS {
            return Some(EntityLabel::Misc);
        }

        if self.is_given_name(&lowered[0]) {
            return Some(EntityLabel::Person);
        }

        let has_common = lowered.iter().any(|w| COMMON_WORDS.contains(&w.as_str()));
        if run.len() <= 3 && !has_common {
            Some(EntityLabel::Person)
        } else {
            Some(EntityLabel::Misc)
        }
    }

    fn flush(&self, run: &mut Vec<&str>, entities: &mut Vec<Entity>) {
        if run.is_empty() {
            return;
        }
        if let Some(label) = self.classify(run) {
            entities.push(Entity::new(run.join(" "), label));
        }
        run.clear();
    }
}

impl Default for GazetteerRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn entities_of(&self, line: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        for raw in line.split_whitespace() {
            let (word, closes) = strip_punctuation(raw);

            if is_capitalized(word) {
                run.push(word);
                if closes {
                    self.flush(&mut run, &mut entities);
                }
            } else {
                self.flush(&mut run, &mut entities);
            }
        }
        self.flush(&mut run, &mut entities);

        entities
    }
}

fn parse_names(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_lowercase)
}

/// Strip surrounding punctuation, reporting whether trailing punctuation
/// ended the word (which also ends the current run).
fn strip_punctuation(raw: &str) -> (&str, bool) {
    let word = raw.trim_start_matches(['(', '"', '\'', '[']);
    let trimmed = word.trim_end_matches([',', ';', ':', '|', ')', ']', '!', '?', '"']);
    let mut closes = trimmed.len() != word.len();

    // Keep the period of initials like "J."
    let is_initial = trimmed.len() == 2 && trimmed.ends_with('.');
    let trimmed = if is_initial {
        trimmed
    } else {
        let without_period = trimmed.trim_end_matches('.');
        closes |= without_period.len() != trimmed.len();
        without_period
    };

    (trimmed, closes)
}

fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    first.is_uppercase()
        && first.is_alphabetic()
        && chars.all(|c| c.is_alphabetic() || matches!(c, '\'' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(line: &str) -> Vec<(String, EntityLabel)> {
        GazetteerRecognizer::new()
            .entities_of(line)
            .into_iter()
            .map(|e| (e.text, e.label))
            .collect()
    }

    #[test]
    fn test_known_given_name() {
        assert_eq!(labels("Jane Doe"), vec![("Jane Doe".to_string(), EntityLabel::Person)]);
    }

    #[test]
    fn test_unknown_two_word_name() {
        assert_eq!(
            labels("Oluwaseun Adebayo"),
            vec![("Oluwaseun Adebayo".to_string(), EntityLabel::Person)]
        );
    }

    #[test]
    fn test_uppercase_name_with_initial() {
        assert_eq!(
            labels("JANE K. DOE"),
            vec![("JANE K. DOE".to_string(), EntityLabel::Person)]
        );
    }

    #[test]
    fn test_heading_is_not_a_person() {
        assert_eq!(
            labels("Curriculum Vitae"),
            vec![("Curriculum Vitae".to_string(), EntityLabel::Misc)]
        );
        assert!(labels("Senior Software Engineer")
            .iter()
            .all(|(_, label)| *label != EntityLabel::Person));
    }

    #[test]
    fn test_institution() {
        assert_eq!(
            labels("Stanford University, 2015"),
            vec![("Stanford University".to_string(), EntityLabel::Organization)]
        );
    }

    #[test]
    fn test_punctuation_ends_run() {
        assert_eq!(
            labels("Contact: Jane Doe, MBA"),
            vec![("Jane Doe".to_string(), EntityLabel::Person)]
        );
    }

    #[test]
    fn test_lowercase_and_digits_break_runs() {
        assert!(labels("email: jane@example.com").is_empty());
        assert!(labels("555-123-4567").is_empty());
        assert!(labels("").is_empty());
    }

    #[test]
    fn test_entities_in_line_order() {
        let found = labels("Acme Inc reference: Tom Hanks");
        assert_eq!(
            found,
            vec![
                ("Acme Inc".to_string(), EntityLabel::Organization),
                ("Tom Hanks".to_string(), EntityLabel::Person),
            ]
        );
    }

    #[test]
    fn test_extra_names_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");
        std::fs::write(&path, "# custom\nZephyrine\n").unwrap();

        let recognizer = GazetteerRecognizer::from_file(&path).unwrap();
        assert!(recognizer.is_given_name("zephyrine"));
        assert!(recognizer.is_given_name("Jane"));

        let entities = recognizer.entities_of("Zephyrine");
        assert_eq!(entities, vec![Entity::new("Zephyrine", EntityLabel::Person)]);
    }

    #[test]
    fn test_missing_gazetteer_fails_at_load() {
        let err = GazetteerRecognizer::from_file(Path::new("/nonexistent/names.txt"))
            .err()
            .unwrap();
        assert!(matches!(err, RecognizerError::Load { .. }));
    }

    #[test]
    fn test_empty_gazetteer_fails_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");
        std::fs::write(&path, "# nothing here\n\n").unwrap();

        let err = GazetteerRecognizer::from_file(&path).err().unwrap();
        assert!(matches!(err, RecognizerError::EmptyGazetteer(_)));
    }
}
