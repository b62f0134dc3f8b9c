//! # wenyue_fs - Encoding-aware file I/O for the wenyue reader
//!
//! Detects the character encoding a text file was written in and reads/writes
//! it losslessly under that encoding.
//!
//! Modules:
//! - `bom` for byte-order-mark signatures (UTF-8/16/32)
//! - `encoding` for the closed set of supported encodings and their codecs
//! - `detect` for BOM-first, trial-decoding-second detection
//! - `file` for reading and saving text under a resolved encoding

mod bom;
mod detect;
mod encoding;
mod file;

pub use bom::{BomDetectionResult, ByteOrderMarkSignature, SIGNATURES, detect_bom};
pub use detect::{
    DetectionConfig, DetectionMethod, DetectionResult, TRIAL_CANDIDATES, detect, detect_file,
    detect_file_with_config, detect_with_config, detect_with_method,
};
pub use encoding::{EncodingId, SUPPORTED_ENCODINGS};
pub use file::eol::normalize_lines;
pub use file::{
    FileContent, FileLoadConfig, FileSaveConfig, FileSaveResult, load_file, load_file_with_config,
    read_text, read_text_with_config, save_file, save_file_with_config, try_read_text,
    try_write_text, write_text, write_text_with_config,
};

use std::io;
use std::path::PathBuf;

/// Errors produced by the codecs and the `try_*` file operations.
///
/// The sentinel-returning operations (`read_text`, `write_text`, `detect`)
/// never surface these; they log them and degrade instead.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// I/O error while reading or writing a file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Encoding name outside the supported set
    #[error("unknown encoding '{0}'")]
    UnknownEncoding(String),
    /// Bytes are not valid under the encoding
    #[error("content is not valid {encoding}")]
    Malformed { encoding: EncodingId },
    /// Character has no representation in the encoding
    #[error("character {ch:?} cannot be encoded as {encoding}")]
    Unmappable { encoding: EncodingId, ch: char },
    /// Path exists but is not a regular file
    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
}

/// Result type for encoding operations
pub type EncodingResult<T> = Result<T, EncodingError>;
