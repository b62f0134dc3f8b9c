//! User settings for the command-line front end, loaded from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use wenyue_fs::{DetectionConfig, EncodingError, EncodingId, FileLoadConfig, FileSaveConfig};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid default_encoding: {0}")]
    Encoding(#[from] EncodingError),
}

/// Settings as written in the file, before encoding names are checked.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawSettings {
    default_encoding: String,
    strict_decoding: bool,
    write_bom: bool,
    atomic_writes: bool,
    max_trial_lines: usize,
}

impl Default for RawSettings {
    fn default() -> Self {
        RawSettings {
            default_encoding: EncodingId::Utf8.name().to_string(),
            strict_decoding: true,
            write_bom: false,
            atomic_writes: false,
            max_trial_lines: DetectionConfig::default().max_trial_lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Encoding for saves that do not name one
    pub default_encoding: EncodingId,
    pub strict_decoding: bool,
    pub write_bom: bool,
    pub atomic_writes: bool,
    pub max_trial_lines: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_encoding: EncodingId::Utf8,
            strict_decoding: true,
            write_bom: false,
            atomic_writes: false,
            max_trial_lines: DetectionConfig::default().max_trial_lines,
        }
    }
}

impl TryFrom<RawSettings> for Settings {
    type Error = SettingsError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        Ok(Settings {
            default_encoding: raw.default_encoding.parse()?,
            strict_decoding: raw.strict_decoding,
            write_bom: raw.write_bom,
            atomic_writes: raw.atomic_writes,
            max_trial_lines: raw.max_trial_lines,
        })
    }
}

impl Settings {
    /// Get the settings search paths in priority order
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(home) = std::env::var_os("HOME") {
            paths.push(PathBuf::from(&home).join(".wenyue").join("config.toml"));
            paths.push(PathBuf::from(&home).join(".config").join("wenyue").join("config.toml"));
        }

        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join(".wenyue.toml"));
            paths.push(current_dir.join("wenyue.toml"));
        }

        paths
    }

    /// Load from `explicit` if given, else from the first existing search
    /// path, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        Self::load_with_paths(&Self::config_paths())
    }

    pub fn load_with_paths(paths: &[PathBuf]) -> Result<Self, SettingsError> {
        match paths.iter().find(|p| p.is_file()) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let raw: RawSettings = toml::from_str(text)?;
        raw.try_into()
    }

    pub fn detection_config(&self) -> DetectionConfig {
        DetectionConfig {
            max_trial_lines: self.max_trial_lines,
            ..DetectionConfig::default()
        }
    }

    pub fn load_config(&self) -> FileLoadConfig {
        FileLoadConfig {
            strict_decoding: self.strict_decoding,
            detection: self.detection_config(),
        }
    }

    pub fn save_config(&self) -> FileSaveConfig {
        FileSaveConfig {
            atomic_writes: self.atomic_writes,
            write_bom: self.write_bom,
            ..FileSaveConfig::default()
        }
    }
}
