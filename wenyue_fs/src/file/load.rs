//! Reading files as text under a detected or caller-chosen encoding.

use std::fs;
use std::io;
use std::path::Path;

use super::eol::{is_normalized, normalize_lines};
use crate::bom::own_bom_length;
use crate::detect::{DetectionConfig, detect_with_config};
use crate::encoding::EncodingId;
use crate::{EncodingError, EncodingResult};

/// Configuration for file loading operations
#[derive(Debug, Clone)]
pub struct FileLoadConfig {
    /// Blank the text on any invalid sequence (default). When false, invalid
    /// sequences decode to U+FFFD instead.
    pub strict_decoding: bool,
    /// Detection settings used when no encoding is given
    pub detection: DetectionConfig,
}

impl Default for FileLoadConfig {
    fn default() -> Self {
        FileLoadConfig {
            strict_decoding: true,
            detection: DetectionConfig::default(),
        }
    }
}

/// Decoded text together with the encoding it was decoded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub text: String,
    pub encoding: EncodingId,
}

impl FileContent {
    pub fn new(text: impl Into<String>, encoding: EncodingId) -> Self {
        FileContent { text: text.into(), encoding }
    }

    fn empty(encoding: EncodingId) -> Self {
        FileContent { text: String::new(), encoding }
    }
}

/// Read `path` as text. Missing files, non-files, I/O errors and bytes that
/// are invalid under the encoding all yield empty text.
///
/// With `encoding` unset the encoding is detected from the file's bytes. Line
/// breaks come back as `\n`, with every line terminated.
pub fn read_text<P: AsRef<Path>>(path: P, encoding: Option<EncodingId>) -> String {
    read_text_with_config(path, encoding, &FileLoadConfig::default())
}

pub fn read_text_with_config<P: AsRef<Path>>(
    path: P,
    encoding: Option<EncodingId>,
    config: &FileLoadConfig,
) -> String {
    load_file_with_config(path, encoding, config).text
}

/// Like `read_text`, also reporting the encoding that was used.
pub fn load_file<P: AsRef<Path>>(path: P, encoding: Option<EncodingId>) -> FileContent {
    load_file_with_config(path, encoding, &FileLoadConfig::default())
}

pub fn load_file_with_config<P: AsRef<Path>>(
    path: P,
    encoding: Option<EncodingId>,
    config: &FileLoadConfig,
) -> FileContent {
    let path = path.as_ref();

    let bytes = match read_bytes(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            log_failure(path, &err);
            return FileContent::empty(encoding.unwrap_or(EncodingId::Utf8));
        }
    };

    let encoding = resolve_encoding(&bytes, encoding, &config.detection);
    match decode_text(&bytes, encoding, config) {
        Ok(text) => FileContent { text, encoding },
        Err(err) => {
            log_failure(path, &err);
            FileContent::empty(encoding)
        }
    }
}

/// Read `path` as text, returning the reason on failure instead of blanking.
pub fn try_read_text<P: AsRef<Path>>(
    path: P,
    encoding: Option<EncodingId>,
    config: &FileLoadConfig,
) -> EncodingResult<FileContent> {
    let bytes = read_bytes(path.as_ref())?;
    let encoding = resolve_encoding(&bytes, encoding, &config.detection);
    let text = decode_text(&bytes, encoding, config)?;
    Ok(FileContent { text, encoding })
}

fn read_bytes(path: &Path) -> EncodingResult<Vec<u8>> {
    if !fs::metadata(path)?.is_file() {
        return Err(EncodingError::NotAFile(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}

fn resolve_encoding(
    bytes: &[u8],
    requested: Option<EncodingId>,
    detection: &DetectionConfig,
) -> EncodingId {
    requested.unwrap_or_else(|| detect_with_config(bytes, detection).encoding)
}

/// Decode the whole buffer, dropping the encoding's own byte-order mark.
fn decode_text(bytes: &[u8], encoding: EncodingId, config: &FileLoadConfig) -> EncodingResult<String> {
    let body = &bytes[own_bom_length(bytes, encoding)..];
    let decoded = if config.strict_decoding {
        encoding.decode(body)?
    } else {
        encoding.decode_lossy(body)
    };

    tracing::debug!(encoding = %encoding, bytes = bytes.len(), "decoded file content");
    if is_normalized(&decoded) {
        Ok(decoded)
    } else {
        Ok(normalize_lines(&decoded).into_owned())
    }
}

fn log_failure(path: &Path, err: &EncodingError) {
    match err {
        EncodingError::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "file does not exist, reading as empty");
        }
        EncodingError::NotAFile(_) => {
            tracing::debug!(path = %path.display(), "not a regular file, reading as empty");
        }
        _ => {
            tracing::warn!(path = %path.display(), error = %err, "failed to read file, reading as empty");
        }
    }
}
