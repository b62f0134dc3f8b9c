use super::EncodingId;
use crate::{EncodingError, EncodingResult};

/// Decode ISO-8859-1. Every byte maps to the code point of the same value, so
/// this never fails.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Decode US-ASCII; `None` if any byte has the high bit set.
pub fn decode_ascii(bytes: &[u8]) -> Option<String> {
    if bytes.is_ascii() {
        Some(bytes.iter().map(|&b| char::from(b)).collect())
    } else {
        None
    }
}

pub fn decode_ascii_lossy(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b.is_ascii() {
                char::from(b)
            } else {
                char::REPLACEMENT_CHARACTER
            }
        })
        .collect()
}

/// Encode to ISO-8859-1; characters above U+00FF are unmappable.
pub fn encode_latin1(text: &str) -> EncodingResult<Vec<u8>> {
    encode_single_byte(text, EncodingId::Iso8859_1, 0xFF)
}

/// Encode to US-ASCII; characters above U+007F are unmappable.
pub fn encode_ascii(text: &str) -> EncodingResult<Vec<u8>> {
    encode_single_byte(text, EncodingId::Ascii, 0x7F)
}

fn encode_single_byte(text: &str, encoding: EncodingId, max: u32) -> EncodingResult<Vec<u8>> {
    text.chars()
        .map(|ch| {
            u8::try_from(ch as u32)
                .ok()
                .filter(|&b| u32::from(b) <= max)
                .ok_or(EncodingError::Unmappable { encoding, ch })
        })
        .collect()
}
