use crate::encoding::EncodingId;

/// A literal byte prefix that declares the encoding of what follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteOrderMarkSignature {
    pub bytes: &'static [u8],
    pub encoding: EncodingId,
}

/// Signatures in match order. The UTF-32LE mark starts with the UTF-16LE mark,
/// so the 4-byte marks have to be tried before the 2-byte ones.
pub const SIGNATURES: [ByteOrderMarkSignature; 5] = [
    ByteOrderMarkSignature { bytes: &[0xEF, 0xBB, 0xBF], encoding: EncodingId::Utf8 },
    ByteOrderMarkSignature { bytes: &[0x00, 0x00, 0xFE, 0xFF], encoding: EncodingId::Utf32Be },
    ByteOrderMarkSignature { bytes: &[0xFF, 0xFE, 0x00, 0x00], encoding: EncodingId::Utf32Le },
    ByteOrderMarkSignature { bytes: &[0xFE, 0xFF], encoding: EncodingId::Utf16Be },
    ByteOrderMarkSignature { bytes: &[0xFF, 0xFE], encoding: EncodingId::Utf16Le },
];

/// Result of BOM detection containing the detected encoding and BOM length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BomDetectionResult {
    pub encoding: EncodingId,
    pub bom_length: usize,
}

/// Detect a byte-order mark at the start of `bytes`. Only the first four bytes
/// are ever inspected.
pub fn detect_bom(bytes: &[u8]) -> Option<BomDetectionResult> {
    SIGNATURES
        .iter()
        .find(|sig| bytes.starts_with(sig.bytes))
        .map(|sig| BomDetectionResult { encoding: sig.encoding, bom_length: sig.bytes.len() })
}

/// Length of `encoding`'s own mark at the start of `bytes`, or 0.
pub(crate) fn own_bom_length(bytes: &[u8], encoding: EncodingId) -> usize {
    let bom = encoding.bom();
    if !bom.is_empty() && bytes.starts_with(bom) { bom.len() } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf32le_wins_over_utf16le() {
        let result = detect_bom(&[0xFF, 0xFE, 0x00, 0x00]).unwrap();
        assert_eq!(result.encoding, EncodingId::Utf32Le);
        assert_eq!(result.bom_length, 4);
    }

    #[test]
    fn test_utf16le_when_not_followed_by_zeros() {
        let result = detect_bom(&[0xFF, 0xFE, 0x41, 0x00]).unwrap();
        assert_eq!(result.encoding, EncodingId::Utf16Le);
        assert_eq!(result.bom_length, 2);
    }

    #[test]
    fn test_utf16be() {
        let result = detect_bom(&[0xFE, 0xFF, 0x4E, 0x2D]).unwrap();
        assert_eq!(result.encoding, EncodingId::Utf16Be);
    }

    #[test]
    fn test_utf32be() {
        let result = detect_bom(&[0x00, 0x00, 0xFE, 0xFF, 0x00, 0x00, 0x00, 0x41]).unwrap();
        assert_eq!(result.encoding, EncodingId::Utf32Be);
    }

    #[test]
    fn test_utf8() {
        let result = detect_bom(&[0xEF, 0xBB, 0xBF, b'h', b'i']).unwrap();
        assert_eq!(result.encoding, EncodingId::Utf8);
        assert_eq!(result.bom_length, 3);
    }

    #[test]
    fn test_short_or_absent() {
        assert_eq!(detect_bom(&[]), None);
        assert_eq!(detect_bom(&[0xFF]), None);
        assert_eq!(detect_bom(&[0xEF, 0xBB]), None);
        assert_eq!(detect_bom(b"plain text"), None);
    }

    #[test]
    fn test_signatures_agree_with_encoding_bom() {
        for sig in SIGNATURES {
            assert_eq!(sig.encoding.bom(), sig.bytes);
        }
    }

    #[test]
    fn test_own_bom_length() {
        assert_eq!(own_bom_length(&[0xFF, 0xFE, 0x41, 0x00], EncodingId::Utf16Le), 2);
        assert_eq!(own_bom_length(&[0xFF, 0xFE, 0x41, 0x00], EncodingId::Utf16Be), 0);
        assert_eq!(own_bom_length(&[0xFF, 0xFE, 0x41, 0x00], EncodingId::Iso8859_1), 0);
    }
}
