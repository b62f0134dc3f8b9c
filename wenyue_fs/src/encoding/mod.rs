use std::fmt;
use std::str::FromStr;

use crate::{EncodingError, EncodingResult};

pub mod cjk;
pub mod latin;
pub mod utf16;
pub mod utf32;

/// Canonical names of every supported encoding, in selection-list order.
pub const SUPPORTED_ENCODINGS: [&str; 10] = [
    "UTF-8",
    "UTF-16BE",
    "UTF-16LE",
    "UTF-32BE",
    "UTF-32LE",
    "GBK",
    "GB2312",
    "Big5",
    "ISO-8859-1",
    "US-ASCII",
];

/// One of the fixed set of text encodings the reader can open and save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingId {
    Utf8,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
    Gbk,
    Gb2312,
    Big5,
    Iso8859_1,
    Ascii,
}

impl EncodingId {
    /// All variants, in the same order as `SUPPORTED_ENCODINGS`.
    pub const ALL: [EncodingId; 10] = [
        EncodingId::Utf8,
        EncodingId::Utf16Be,
        EncodingId::Utf16Le,
        EncodingId::Utf32Be,
        EncodingId::Utf32Le,
        EncodingId::Gbk,
        EncodingId::Gb2312,
        EncodingId::Big5,
        EncodingId::Iso8859_1,
        EncodingId::Ascii,
    ];

    /// Canonical name, as listed in `SUPPORTED_ENCODINGS`.
    pub fn name(self) -> &'static str {
        match self {
            EncodingId::Utf8 => "UTF-8",
            EncodingId::Utf16Be => "UTF-16BE",
            EncodingId::Utf16Le => "UTF-16LE",
            EncodingId::Utf32Be => "UTF-32BE",
            EncodingId::Utf32Le => "UTF-32LE",
            EncodingId::Gbk => "GBK",
            EncodingId::Gb2312 => "GB2312",
            EncodingId::Big5 => "Big5",
            EncodingId::Iso8859_1 => "ISO-8859-1",
            EncodingId::Ascii => "US-ASCII",
        }
    }

    /// Identifier-style spelling accepted as an alternative name.
    fn ident(self) -> &'static str {
        match self {
            EncodingId::Utf8 => "UTF8",
            EncodingId::Utf16Be => "UTF16BE",
            EncodingId::Utf16Le => "UTF16LE",
            EncodingId::Utf32Be => "UTF32BE",
            EncodingId::Utf32Le => "UTF32LE",
            EncodingId::Gbk => "GBK",
            EncodingId::Gb2312 => "GB2312",
            EncodingId::Big5 => "BIG5",
            EncodingId::Iso8859_1 => "ISO8859_1",
            EncodingId::Ascii => "ASCII",
        }
    }

    /// Byte-order mark this encoding writes, empty when it has none.
    pub fn bom(self) -> &'static [u8] {
        match self {
            EncodingId::Utf8 => &[0xEF, 0xBB, 0xBF],
            EncodingId::Utf16Be => &[0xFE, 0xFF],
            EncodingId::Utf16Le => &[0xFF, 0xFE],
            EncodingId::Utf32Be => &[0x00, 0x00, 0xFE, 0xFF],
            EncodingId::Utf32Le => &[0xFF, 0xFE, 0x00, 0x00],
            _ => &[],
        }
    }

    pub fn is_unicode(self) -> bool {
        !self.bom().is_empty()
    }

    /// Whether bytes 0x00-0x7F always stand for themselves, so CR/LF bytes
    /// can be located without decoding.
    pub fn is_ascii_compatible(self) -> bool {
        !matches!(
            self,
            EncodingId::Utf16Be | EncodingId::Utf16Le | EncodingId::Utf32Be | EncodingId::Utf32Le
        )
    }

    /// Decode `bytes`, failing on the first invalid sequence.
    ///
    /// A leading byte-order mark is treated as content; strip it beforehand.
    pub fn decode(self, bytes: &[u8]) -> EncodingResult<String> {
        let decoded = match self {
            EncodingId::Utf8 | EncodingId::Gbk | EncodingId::Gb2312 | EncodingId::Big5 => {
                cjk::decode_strict(bytes, self)
            }
            EncodingId::Utf16Be => utf16::decode_utf16be(bytes),
            EncodingId::Utf16Le => utf16::decode_utf16le(bytes),
            EncodingId::Utf32Be => utf32::decode_utf32be(bytes),
            EncodingId::Utf32Le => utf32::decode_utf32le(bytes),
            EncodingId::Iso8859_1 => Some(latin::decode_latin1(bytes)),
            EncodingId::Ascii => latin::decode_ascii(bytes),
        };
        decoded.ok_or(EncodingError::Malformed { encoding: self })
    }

    /// Decode `bytes`, substituting U+FFFD for invalid sequences.
    pub fn decode_lossy(self, bytes: &[u8]) -> String {
        match self {
            EncodingId::Utf8 | EncodingId::Gbk | EncodingId::Gb2312 | EncodingId::Big5 => {
                cjk::decode_lossy(bytes, self)
            }
            EncodingId::Utf16Be => utf16::decode_utf16be_lossy(bytes),
            EncodingId::Utf16Le => utf16::decode_utf16le_lossy(bytes),
            EncodingId::Utf32Be => utf32::decode_utf32be_lossy(bytes),
            EncodingId::Utf32Le => utf32::decode_utf32le_lossy(bytes),
            EncodingId::Iso8859_1 => latin::decode_latin1(bytes),
            EncodingId::Ascii => latin::decode_ascii_lossy(bytes),
        }
    }

    /// Encode `text`, failing on the first character outside the repertoire.
    pub fn encode(self, text: &str) -> EncodingResult<Vec<u8>> {
        match self {
            EncodingId::Utf8 => Ok(text.as_bytes().to_vec()),
            EncodingId::Gbk | EncodingId::Gb2312 | EncodingId::Big5 => cjk::encode(text, self),
            EncodingId::Utf16Be => Ok(utf16::encode_utf16be(text)),
            EncodingId::Utf16Le => Ok(utf16::encode_utf16le(text)),
            EncodingId::Utf32Be => Ok(utf32::encode_utf32be(text)),
            EncodingId::Utf32Le => Ok(utf32::encode_utf32le(text)),
            EncodingId::Iso8859_1 => latin::encode_latin1(text),
            EncodingId::Ascii => latin::encode_ascii(text),
        }
    }
}

impl fmt::Display for EncodingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncodingId {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        EncodingId::ALL
            .into_iter()
            .find(|e| {
                e.name().eq_ignore_ascii_case(trimmed) || e.ident().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| EncodingError::UnknownEncoding(s.to_string()))
    }
}
