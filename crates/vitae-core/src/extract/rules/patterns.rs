//! Regex patterns for contact field extraction.
//!
//! Both patterns are ASCII-only. The phone pattern covers North American
//! numbers only; international formats are not recognized.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // local-part@domain.tld
    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    // Optional +1, optional parentheses around the area code, optional
    // space/hyphen separators. A bare 10-digit run also matches.
    pub static ref PHONE: Regex = Regex::new(
        r"(?:\+?1[\s-]?)?\(?[0-9]{3}\)?[\s-]?[0-9]{3}[\s-]?[0-9]{4}"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(EMAIL.is_match("jane.doe+cv@mail.example.co.uk"));
        assert!(EMAIL.is_match("a_b%c-d@x.io"));
        assert!(!EMAIL.is_match("jane@localhost"));
        assert!(!EMAIL.is_match("jane@example.c"));
    }

    #[test]
    fn test_phone_shapes() {
        for phone in [
            "555-123-4567",
            "(555) 123-4567",
            "+1 555 123 4567",
            "1-555-123-4567",
            "555 123 4567",
            "5551234567",
        ] {
            let found = PHONE.find(phone).map(|m| m.as_str());
            assert_eq!(found, Some(phone), "pattern should match {phone} in full");
        }
    }

    #[test]
    fn test_phone_rejects_international_and_short() {
        assert!(!PHONE.is_match("+44 20 7946 0958"));
        assert!(!PHONE.is_match("123-4567"));
    }

    #[test]
    fn test_phone_requires_ascii_digits() {
        assert!(!PHONE.is_match("٥٥٥-١٢٣-٤٥٦٧"));
    }
}
