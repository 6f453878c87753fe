//! Plain text decoding.

use super::Result;
use crate::error::NormalizeError;

/// Decode bytes as strict UTF-8.
pub(super) fn decode_utf8(data: &[u8]) -> Result<String> {
    String::from_utf8(data.to_vec()).map_err(|e| NormalizeError::malformed("txt", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_multibyte() {
        assert_eq!(decode_utf8("Zoë Müller".as_bytes()).unwrap(), "Zoë Müller");
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let err = decode_utf8(&[b'J', 0xc3, 0x28]).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedInput { format: "txt", .. }));
    }
}
