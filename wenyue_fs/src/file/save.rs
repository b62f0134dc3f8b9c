//! Saving text under a chosen encoding.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::load::FileContent;
use crate::EncodingResult;
use crate::encoding::EncodingId;

/// Configuration for file saving operations
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Whether to preserve file permissions on atomic writes (Unix only)
    pub preserve_permissions: bool,
    /// Write to a temp file and rename it over the target
    pub atomic_writes: bool,
    /// Prefix Unicode encodings with their byte-order mark
    pub write_bom: bool,
    /// Custom temp file suffix
    pub temp_suffix: String,
    /// Buffer size for streaming writes
    pub buffer_size: usize,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        FileSaveConfig {
            preserve_permissions: true,
            atomic_writes: false,
            write_bom: false,
            temp_suffix: ".tmp".to_string(),
            buffer_size: 64 * 1024, // 64KB
        }
    }
}

/// Result of a file saving operation
#[derive(Debug)]
pub struct FileSaveResult {
    /// Final path where file was saved
    pub path: PathBuf,
    /// Number of bytes written
    pub bytes_written: u64,
    /// Whether atomic write was used
    pub atomic_write: bool,
}

/// Save `text` to `path` under `encoding`, replacing any previous contents.
///
/// Missing parent directories are created. Returns `false` on any failure:
/// directory creation, an unmappable character, or an I/O error. The text is
/// encoded before the file is opened, so an unmappable character leaves an
/// existing file untouched.
pub fn write_text<P: AsRef<Path>>(path: P, text: &str, encoding: EncodingId) -> bool {
    write_text_with_config(path, text, encoding, &FileSaveConfig::default())
}

pub fn write_text_with_config<P: AsRef<Path>>(
    path: P,
    text: &str,
    encoding: EncodingId,
    config: &FileSaveConfig,
) -> bool {
    let path = path.as_ref();
    match try_write_text(path, text, encoding, config) {
        Ok(result) => {
            tracing::debug!(
                path = %result.path.display(),
                encoding = %encoding,
                bytes = result.bytes_written,
                atomic = result.atomic_write,
                "saved file"
            );
            true
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), encoding = %encoding, error = %err, "failed to save file");
            false
        }
    }
}

/// Save `content` under the encoding it was loaded with.
pub fn save_file<P: AsRef<Path>>(path: P, content: &FileContent) -> bool {
    save_file_with_config(path, content, &FileSaveConfig::default())
}

pub fn save_file_with_config<P: AsRef<Path>>(
    path: P,
    content: &FileContent,
    config: &FileSaveConfig,
) -> bool {
    write_text_with_config(path, &content.text, content.encoding, config)
}

/// Save `text`, returning the reason on failure.
pub fn try_write_text<P: AsRef<Path>>(
    path: P,
    text: &str,
    encoding: EncodingId,
    config: &FileSaveConfig,
) -> EncodingResult<FileSaveResult> {
    let path = path.as_ref();

    let prepared_content = prepare_content_for_save(text, encoding, config)?;
    ensure_parent_dir(path)?;

    if config.atomic_writes {
        save_atomic(path, &prepared_content, config)
    } else {
        save_direct(path, &prepared_content, config)
    }
}

/// Encode the text and prepend the BOM when configured.
fn prepare_content_for_save(
    text: &str,
    encoding: EncodingId,
    config: &FileSaveConfig,
) -> EncodingResult<Vec<u8>> {
    let transcoded = encoding.encode(text)?;

    if config.write_bom && encoding.is_unicode() {
        let mut with_bom = encoding.bom().to_vec();
        with_bom.extend_from_slice(&transcoded);
        Ok(with_bom)
    } else {
        Ok(transcoded)
    }
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)?;
            tracing::debug!(dir = %parent.display(), "created missing parent directories");
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Perform atomic save using temp file.
fn save_atomic(path: &Path, content: &[u8], config: &FileSaveConfig) -> EncodingResult<FileSaveResult> {
    let temp_path = get_temp_path(path, &config.temp_suffix);

    let bytes_written = write_to_file(&temp_path, content, config)
        .and_then(|n| replace_with_temp(path, &temp_path, config).map(|()| n))
        .inspect_err(|_| {
            // No temp file survives a failed save
            let _ = fs::remove_file(&temp_path);
        })?;

    Ok(FileSaveResult {
        path: path.to_path_buf(),
        bytes_written,
        atomic_write: true,
    })
}

/// Carry the target's permissions over to the temp file, then rename it over
/// the target.
fn replace_with_temp(path: &Path, temp_path: &Path, config: &FileSaveConfig) -> io::Result<()> {
    if config.preserve_permissions && path.exists() {
        preserve_permissions(path, temp_path)?;
    }
    fs::rename(temp_path, path)
}

/// Truncate and overwrite in place. A crash mid-write leaves a partial file.
fn save_direct(path: &Path, content: &[u8], config: &FileSaveConfig) -> EncodingResult<FileSaveResult> {
    let bytes_written = write_to_file(path, content, config)?;

    Ok(FileSaveResult {
        path: path.to_path_buf(),
        bytes_written,
        atomic_write: false,
    })
}

/// Write content to a file with buffering.
fn write_to_file(path: &Path, content: &[u8], config: &FileSaveConfig) -> io::Result<u64> {
    let file = File::create(path)?;
    let mut writer = io::BufWriter::with_capacity(config.buffer_size.max(1), file);

    writer.write_all(content)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    Ok(content.len() as u64)
}

/// Generate temp file path.
fn get_temp_path(original_path: &Path, suffix: &str) -> PathBuf {
    let mut temp_path = original_path.to_path_buf();
    let original_name = temp_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file");

    let temp_name = format!("{}{}", original_name, suffix);
    temp_path.set_file_name(temp_name);
    temp_path
}

/// Preserve file permissions from source to target.
#[cfg(unix)]
fn preserve_permissions(source: &Path, target: &Path) -> io::Result<()> {
    let permissions = fs::metadata(source)?.permissions();
    fs::set_permissions(target, permissions)
}

#[cfg(not(unix))]
fn preserve_permissions(_source: &Path, _target: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EncodingError;
    use tempfile::TempDir;

    #[test]
    fn test_save_utf8_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        let content = "Hello, UTF-8!\nSecond line\n";

        let result = try_write_text(&path, content, EncodingId::Utf8, &FileSaveConfig::default())
            .unwrap();
        assert_eq!(result.bytes_written, content.len() as u64);
        assert!(!result.atomic_write);
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_save_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new/nested/dir/file.txt");

        assert!(write_text(&path, "x", EncodingId::Utf8));
        assert!(dir.path().join("new/nested/dir").is_dir());
        assert_eq!(fs::read(&path).unwrap(), b"x");
    }

    #[test]
    fn test_save_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "a much longer previous body\n").unwrap();

        assert!(write_text(&path, "short\n", EncodingId::Utf8));
        assert_eq!(fs::read_to_string(&path).unwrap(), "short\n");
    }

    #[test]
    fn test_save_gbk_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gbk.txt");

        assert!(write_text(&path, "中文", EncodingId::Gbk));
        assert_eq!(fs::read(&path).unwrap(), vec![0xD6, 0xD0, 0xCE, 0xC4]);
    }

    #[test]
    fn test_unmappable_text_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "original\n").unwrap();

        assert!(!write_text(&path, "中文", EncodingId::Iso8859_1));
        assert_eq!(fs::read_to_string(&path).unwrap(), "original\n");

        let err = try_write_text(&path, "中文", EncodingId::Ascii, &FileSaveConfig::default())
            .unwrap_err();
        assert!(matches!(err, EncodingError::Unmappable { ch: '中', .. }));
    }

    #[test]
    fn test_save_with_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bom.txt");
        let config = FileSaveConfig { write_bom: true, ..FileSaveConfig::default() };

        assert!(write_text_with_config(&path, "Hi", EncodingId::Utf16Le, &config));
        assert_eq!(fs::read(&path).unwrap(), vec![0xFF, 0xFE, 0x48, 0x00, 0x69, 0x00]);
    }

    #[test]
    fn test_bom_not_written_for_legacy_encoding() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big5.txt");
        let config = FileSaveConfig { write_bom: true, ..FileSaveConfig::default() };

        assert!(write_text_with_config(&path, "中", EncodingId::Big5, &config));
        assert_eq!(fs::read(&path).unwrap(), vec![0xA4, 0xA4]);
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "old\n").unwrap();
        let config = FileSaveConfig { atomic_writes: true, ..FileSaveConfig::default() };

        let result = try_write_text(&path, "new\n", EncodingId::Utf8, &config).unwrap();
        assert!(result.atomic_write);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        assert!(!dir.path().join("a.txt.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_save_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();
        let config = FileSaveConfig { atomic_writes: true, ..FileSaveConfig::default() };

        assert!(write_text_with_config(&path, "new\n", EncodingId::Utf8, &config));
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn test_failed_atomic_save_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a.txt");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inner.txt"), "keep\n").unwrap();
        let config = FileSaveConfig { atomic_writes: true, ..FileSaveConfig::default() };

        assert!(try_write_text(&target, "new\n", EncodingId::Utf8, &config).is_err());
        assert!(!dir.path().join("a.txt.tmp").exists());
        assert_eq!(fs::read_to_string(target.join("inner.txt")).unwrap(), "keep\n");
    }

    #[test]
    fn test_replace_with_temp_fails_without_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "old\n").unwrap();

        let missing_temp = dir.path().join("a.txt.tmp");
        assert!(replace_with_temp(&path, &missing_temp, &FileSaveConfig::default()).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\n");
    }

    #[test]
    fn test_content_larger_than_buffer() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.txt");
        let content = "一二三四五六七八九十\n".repeat(100);
        let config = FileSaveConfig { buffer_size: 16, ..FileSaveConfig::default() };

        let result = try_write_text(&path, &content, EncodingId::Gbk, &config).unwrap();
        assert_eq!(result.bytes_written, 2100);
        assert_eq!(fs::read(&path).unwrap(), EncodingId::Gbk.encode(&content).unwrap());
    }

    #[test]
    fn test_parent_is_a_file_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        assert!(!write_text(blocker.join("sub/file.txt"), "x", EncodingId::Utf8));
        assert!(!write_text(blocker.join("file.txt"), "x", EncodingId::Utf8));
    }

    #[test]
    fn test_directory_target_fails() {
        let dir = TempDir::new().unwrap();
        assert!(!write_text(dir.path(), "x", EncodingId::Utf8));
    }

    #[test]
    fn test_save_file_uses_content_encoding() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        let content = FileContent::new("é", EncodingId::Iso8859_1);

        assert!(save_file(&path, &content));
        assert_eq!(fs::read(&path).unwrap(), vec![0xE9]);
    }

    #[test]
    fn test_get_temp_path() {
        let original = Path::new("/path/to/file.txt");
        let temp = get_temp_path(original, ".tmp");

        assert_eq!(temp, Path::new("/path/to/file.txt.tmp"));
    }
}
