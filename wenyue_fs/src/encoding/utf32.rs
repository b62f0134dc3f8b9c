//! UTF-32 codecs. `encoding_rs` follows the WHATWG set, which has no UTF-32,
//! so both directions live here.

fn code_points(bytes: &[u8], to_u32: fn([u8; 4]) -> u32) -> impl Iterator<Item = Option<char>> + '_ {
    let chunks = bytes.chunks_exact(4);
    // A trailing partial unit decodes as one invalid code point.
    let tail = (!chunks.remainder().is_empty()).then_some(None);
    chunks
        .map(move |c| char::from_u32(to_u32([c[0], c[1], c[2], c[3]])))
        .chain(tail)
}

fn decode_strict(bytes: &[u8], to_u32: fn([u8; 4]) -> u32) -> Option<String> {
    code_points(bytes, to_u32).collect()
}

fn decode_lossy(bytes: &[u8], to_u32: fn([u8; 4]) -> u32) -> String {
    code_points(bytes, to_u32)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Decode UTF-32LE bytes; `None` on surrogates, values above U+10FFFF or a
/// length that is not a multiple of four.
pub fn decode_utf32le(bytes: &[u8]) -> Option<String> {
    decode_strict(bytes, u32::from_le_bytes)
}

/// Decode UTF-32BE bytes; same failure rules as the little-endian variant.
pub fn decode_utf32be(bytes: &[u8]) -> Option<String> {
    decode_strict(bytes, u32::from_be_bytes)
}

pub fn decode_utf32le_lossy(bytes: &[u8]) -> String {
    decode_lossy(bytes, u32::from_le_bytes)
}

pub fn decode_utf32be_lossy(bytes: &[u8]) -> String {
    decode_lossy(bytes, u32::from_be_bytes)
}

/// Encode to UTF-32LE without a BOM.
pub fn encode_utf32le(text: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(text.len() * 4);
    for ch in text.chars() {
        result.extend_from_slice(&(ch as u32).to_le_bytes());
    }
    result
}

/// Encode to UTF-32BE without a BOM.
pub fn encode_utf32be(text: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(text.len() * 4);
    for ch in text.chars() {
        result.extend_from_slice(&(ch as u32).to_be_bytes());
    }
    result
}
