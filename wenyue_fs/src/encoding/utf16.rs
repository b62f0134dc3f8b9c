//! UTF-16 codecs. Decoding goes through `encoding_rs`; encoding is done here
//! because `encoding_rs` only ever encodes to ASCII-compatible targets.

use encoding_rs::{UTF_16BE, UTF_16LE};

/// Decode UTF-16LE bytes; `None` on unpaired surrogates or an odd byte count.
pub fn decode_utf16le(bytes: &[u8]) -> Option<String> {
    UTF_16LE
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|s| s.into_owned())
}

/// Decode UTF-16BE bytes; `None` on unpaired surrogates or an odd byte count.
pub fn decode_utf16be(bytes: &[u8]) -> Option<String> {
    UTF_16BE
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|s| s.into_owned())
}

pub fn decode_utf16le_lossy(bytes: &[u8]) -> String {
    UTF_16LE.decode_without_bom_handling(bytes).0.into_owned()
}

pub fn decode_utf16be_lossy(bytes: &[u8]) -> String {
    UTF_16BE.decode_without_bom_handling(bytes).0.into_owned()
}

/// Encode to UTF-16LE without a BOM.
pub fn encode_utf16le(text: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(text.len() * 2);
    for code_unit in text.encode_utf16() {
        result.extend_from_slice(&code_unit.to_le_bytes());
    }
    result
}

/// Encode to UTF-16BE without a BOM.
pub fn encode_utf16be(text: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(text.len() * 2);
    for code_unit in text.encode_utf16() {
        result.extend_from_slice(&code_unit.to_be_bytes());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_utf16le_surrogate_pair() {
        let encoded = encode_utf16le("A🌍");
        assert_eq!(encoded, vec![0x41, 0x00, 0x3C, 0xD8, 0x0D, 0xDF]);
    }

    #[test]
    fn test_encode_utf16be_ascii() {
        assert_eq!(encode_utf16be("Hi"), vec![0x00, 0x48, 0x00, 0x69]);
    }

    #[test]
    fn test_decode_utf16le() {
        let bytes = [0x2D, 0x4E, 0x87, 0x65]; // "中文"
        assert_eq!(decode_utf16le(&bytes).as_deref(), Some("中文"));
    }

    #[test]
    fn test_decode_odd_length_is_malformed() {
        assert!(decode_utf16be(&[0x00, 0x41, 0x00]).is_none());
        assert_eq!(decode_utf16be_lossy(&[0x00, 0x41, 0x00]), "A\u{FFFD}");
    }

    #[test]
    fn test_decode_unpaired_surrogate_is_malformed() {
        assert!(decode_utf16le(&[0x3C, 0xD8, 0x41, 0x00]).is_none());
        assert_eq!(decode_utf16le_lossy(&[0x3C, 0xD8, 0x41, 0x00]), "\u{FFFD}A");
    }

    #[test]
    fn test_bom_is_not_stripped() {
        let decoded = decode_utf16le(&[0xFF, 0xFE, 0x41, 0x00]);
        assert_eq!(decoded.as_deref(), Some("\u{FEFF}A"));
    }
}
