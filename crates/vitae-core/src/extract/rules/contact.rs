//! Email and phone number extraction.

use super::patterns::{EMAIL, PHONE};
use super::{ExtractionMatch, FieldExtractor};

/// Email address extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailExtractor;

impl FieldExtractor for EmailExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        EMAIL
            .find(text)
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), m.start(), m.end()))
    }
}

/// North American phone number extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneExtractor;

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        PHONE
            .find(text)
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), m.start(), m.end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(text: &str) -> Option<String> {
        EmailExtractor.extract(text).map(|m| m.value)
    }

    fn phone(text: &str) -> Option<String> {
        PhoneExtractor.extract(text).map(|m| m.value)
    }

    #[test]
    fn test_first_email_wins() {
        let text = "Jane Doe\nwork: jane@acme.com\npersonal: jane.doe@gmail.com";
        assert_eq!(email(text), Some("jane@acme.com".to_string()));
    }

    #[test]
    fn test_email_position() {
        let text = "mail: jane@acme.com";
        let found = EmailExtractor.extract(text).unwrap();
        assert_eq!(found.position, (6, 19));
        assert_eq!(&text[found.position.0..found.position.1], "jane@acme.com");
    }

    #[test]
    fn test_no_email() {
        assert_eq!(email("no contact details"), None);
    }

    #[test]
    fn test_phone_after_label() {
        let text = "Phone: (555) 123-4567 | Fax: 555-987-6543";
        assert_eq!(phone(text), Some("(555) 123-4567".to_string()));
    }

    #[test]
    fn test_phone_with_country_code() {
        assert_eq!(phone("Mobile: +1-555-123-4567"), Some("+1-555-123-4567".to_string()));
    }

    #[test]
    fn test_unformatted_ten_digits_match() {
        assert_eq!(phone("tel 5551234567"), Some("5551234567".to_string()));
    }

    #[test]
    fn test_no_phone() {
        assert_eq!(phone("Graduated 2019, GPA 3.9"), None);
    }
}
