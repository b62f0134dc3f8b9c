//! Best-effort encoding detection.
//!
//! A byte-order mark is authoritative. Without one, the first lines are
//! trial-decoded against a ranked candidate list and the first clean decode
//! wins. Detection never fails; anything inconclusive is UTF-8.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::bom::detect_bom;
use crate::encoding::EncodingId;

/// Trial order when no BOM is present. Chinese encodings go first because
/// ISO-8859-1 accepts any byte sequence and would mask them.
pub const TRIAL_CANDIDATES: [EncodingId; 5] = [
    EncodingId::Gbk,
    EncodingId::Gb2312,
    EncodingId::Utf8,
    EncodingId::Iso8859_1,
    EncodingId::Big5,
];

/// Encoding returned when nothing else applies
const FALLBACK: EncodingId = EncodingId::Utf8;

/// Read size while sampling a file for its first lines
const SAMPLE_CHUNK: usize = 512;

/// How a `DetectionResult` was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMethod {
    /// A byte-order mark matched
    Signature,
    /// A candidate decoded the first lines cleanly
    ContentTrial,
    /// Empty/unreadable input, or no candidate was accepted
    Fallback,
}

impl DetectionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionMethod::Signature => "signature",
            DetectionMethod::ContentTrial => "content-trial",
            DetectionMethod::Fallback => "fallback",
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionResult {
    pub encoding: EncodingId,
    pub method: DetectionMethod,
}

impl DetectionResult {
    fn fallback() -> Self {
        DetectionResult { encoding: FALLBACK, method: DetectionMethod::Fallback }
    }
}

/// Configuration for content-trial detection
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Lines decoded per candidate; 0 decodes the whole input
    pub max_trial_lines: usize,
    /// Candidates in priority order
    pub candidates: Vec<EncodingId>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        DetectionConfig {
            max_trial_lines: 10,
            candidates: TRIAL_CANDIDATES.to_vec(),
        }
    }
}

/// Detect the encoding of `bytes` with the default configuration.
pub fn detect(bytes: &[u8]) -> EncodingId {
    detect_with_method(bytes).encoding
}

/// Detect the encoding of `bytes` and report which step decided it.
pub fn detect_with_method(bytes: &[u8]) -> DetectionResult {
    detect_with_config(bytes, &DetectionConfig::default())
}

pub fn detect_with_config(bytes: &[u8], config: &DetectionConfig) -> DetectionResult {
    if bytes.is_empty() {
        tracing::trace!("empty input, using fallback encoding");
        return DetectionResult::fallback();
    }

    if let Some(bom) = detect_bom(bytes) {
        tracing::debug!(encoding = %bom.encoding, "byte-order mark matched");
        return DetectionResult { encoding: bom.encoding, method: DetectionMethod::Signature };
    }

    let window = trial_window(bytes, config.max_trial_lines);
    for &candidate in &config.candidates {
        // Cutting on CR/LF bytes is only safe for ASCII-compatible encodings.
        let sample = if candidate.is_ascii_compatible() { window } else { bytes };
        if decodes_cleanly(sample, candidate) {
            tracing::debug!(encoding = %candidate, "content trial accepted candidate");
            return DetectionResult { encoding: candidate, method: DetectionMethod::ContentTrial };
        }
        tracing::trace!(encoding = %candidate, "content trial rejected candidate");
    }

    tracing::debug!("no trial candidate accepted, using fallback encoding");
    DetectionResult::fallback()
}

/// Detect the encoding of the file at `path`, reading only the leading bytes
/// the detection needs. Unreadable files detect as UTF-8.
pub fn detect_file<P: AsRef<Path>>(path: P) -> DetectionResult {
    detect_file_with_config(path, &DetectionConfig::default())
}

pub fn detect_file_with_config<P: AsRef<Path>>(path: P, config: &DetectionConfig) -> DetectionResult {
    let path = path.as_ref();
    match File::open(path).and_then(|file| read_sample(file, config.max_trial_lines)) {
        Ok(sample) => detect_with_config(&sample, config),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "cannot read file for detection");
            DetectionResult::fallback()
        }
    }
}

/// A candidate is accepted when the bytes decode without error and the text
/// holds no replacement character.
fn decodes_cleanly(bytes: &[u8], candidate: EncodingId) -> bool {
    candidate
        .decode(bytes)
        .is_ok_and(|text| !text.contains(char::REPLACEMENT_CHARACTER))
}

/// Whether the byte at `i` terminates a line (`\n`, or `\r` not followed by `\n`).
/// A `\r` in the last position is left undecided.
fn ends_line(bytes: &[u8], i: usize) -> bool {
    match bytes[i] {
        b'\n' => true,
        b'\r' => bytes.get(i + 1).is_some_and(|&next| next != b'\n'),
        _ => false,
    }
}

/// Index of the `n`-th line terminator (1-based), if `bytes` holds that many.
fn nth_line_end(bytes: &[u8], n: usize) -> Option<usize> {
    let nth = n.checked_sub(1)?;
    (0..bytes.len()).filter(|&i| ends_line(bytes, i)).nth(nth)
}

/// Prefix of `bytes` through the `max_lines`-th line terminator, or all of it.
fn trial_window(bytes: &[u8], max_lines: usize) -> &[u8] {
    match nth_line_end(bytes, max_lines) {
        Some(end) => &bytes[..=end],
        None => bytes,
    }
}

/// Read the first four bytes, then fixed-size chunks until `max_lines` line
/// terminators are buffered or the input ends.
fn read_sample<R: Read>(mut reader: R, max_lines: usize) -> io::Result<Vec<u8>> {
    let mut sample = Vec::new();

    (&mut reader).take(4).read_to_end(&mut sample)?;
    if detect_bom(&sample).is_some() {
        return Ok(sample);
    }

    if max_lines == 0 {
        reader.read_to_end(&mut sample)?;
        return Ok(sample);
    }

    let mut chunk = [0u8; SAMPLE_CHUNK];
    while nth_line_end(&sample, max_lines).is_none() {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => sample.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(sample)
}
