//! Configuration persistence for measuring-stick settings

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Application configuration persisted between sessions.
///
/// Sessions consume a clone of this read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Opacity of measurement annotations (0.0-1.0)
    pub opacity: f32,
    /// Folder screenshots are written to
    pub destination_folder: PathBuf,
    /// Whether completed exports also go to the clipboard
    pub copy_to_clipboard: bool,
    /// Whether to tell the user where an export went
    pub show_notification: bool,
    /// Whether completed exports are written to the destination folder
    pub auto_save_on_complete: bool,
}

fn default_destination_folder() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl AppConfig {
    /// Directory name under the platform config dir
    pub const APP_DIR: &'static str = "measuring-stick";
    const FILE_NAME: &'static str = "config.json";

    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::APP_DIR).join(Self::FILE_NAME))
    }

    /// Load configuration from the default location, or return defaults if unavailable
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("No config directory available, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from `path`, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                log::warn!("Error reading config {}: {err}", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<AppConfig>(&text) {
            Ok(config) => config.sanitized(),
            Err(err) => {
                log::warn!("Error loading config, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Opacity clamped to the valid range
    pub fn opacity(&self) -> f32 {
        if self.opacity.is_nan() {
            1.0
        } else {
            self.opacity.clamp(0.0, 1.0)
        }
    }

    /// Clamp out-of-range values and drop a destination folder that no longer exists
    fn sanitized(mut self) -> Self {
        self.opacity = self.opacity();
        if !self.destination_folder.is_dir() {
            log::warn!(
                "Destination folder {} does not exist, using default",
                self.destination_folder.display()
            );
            self.destination_folder = default_destination_folder();
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            destination_folder: default_destination_folder(),
            copy_to_clipboard: true,
            show_notification: true,
            auto_save_on_complete: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("nope.json"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            opacity: 0.4,
            destination_folder: dir.path().to_path_buf(),
            copy_to_clipboard: false,
            show_notification: false,
            auto_save_on_complete: true,
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path), config);
    }

    #[test]
    fn partial_file_fills_defaults_and_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "opacity": 3.5, "destination_folder": "/definitely/not/here" }"#,
        )
        .unwrap();
        let config = AppConfig::load_from(&path);
        assert_eq!(config.opacity, 1.0);
        assert_eq!(config.destination_folder, default_destination_folder());
        assert!(config.copy_to_clipboard);
        assert!(config.auto_save_on_complete);
    }
}
