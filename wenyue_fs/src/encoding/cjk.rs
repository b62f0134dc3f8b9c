//! ASCII-compatible multi-byte encodings backed by `encoding_rs` tables.

use encoding_rs::{BIG5, Encoding, GBK, UTF_8};

use super::EncodingId;
use crate::{EncodingError, EncodingResult};

/// `encoding_rs` has no separate GB2312 table; GBK is its superset and is what
/// the WHATWG `gb2312` label resolves to.
fn table(encoding: EncodingId) -> &'static Encoding {
    match encoding {
        EncodingId::Gbk | EncodingId::Gb2312 => GBK,
        EncodingId::Big5 => BIG5,
        _ => UTF_8,
    }
}

/// Strict decode that only accepts bytes the same table writes back unchanged.
///
/// The `GBK` table decodes GB18030 four-byte sequences and the `BIG5` table
/// decodes HKSCS pairs, neither of which the encoders produce.
pub fn decode_strict(bytes: &[u8], encoding: EncodingId) -> Option<String> {
    let table = table(encoding);
    let text = table.decode_without_bom_handling_and_without_replacement(bytes)?;
    if encoding == EncodingId::Utf8 {
        return Some(text.into_owned());
    }

    let (reencoded, _, had_unmappable) = table.encode(&text);
    if had_unmappable || &*reencoded != bytes {
        return None;
    }
    Some(text.into_owned())
}

pub fn decode_lossy(bytes: &[u8], encoding: EncodingId) -> String {
    table(encoding).decode_without_bom_handling(bytes).0.into_owned()
}

/// Encode through the legacy table. `encoding_rs` would substitute numeric
/// character references for unmappable characters; those are reported as an
/// error instead of being written.
pub fn encode(text: &str, encoding: EncodingId) -> EncodingResult<Vec<u8>> {
    let (bytes, _, had_unmappable) = table(encoding).encode(text);
    if had_unmappable {
        let ch = first_unmappable(text, encoding).unwrap_or(char::REPLACEMENT_CHARACTER);
        return Err(EncodingError::Unmappable { encoding, ch });
    }
    Ok(bytes.into_owned())
}

fn first_unmappable(text: &str, encoding: EncodingId) -> Option<char> {
    let mut buf = [0u8; 4];
    text.chars()
        .find(|ch| table(encoding).encode(ch.encode_utf8(&mut buf)).2)
}
