//! Error types for capture, persistence and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Screen capture failed. Fatal to session start: no overlay is shown.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("no displays available")]
    NoDisplays,

    #[error("screen capture failed: {0}")]
    Platform(String),

    #[error("captured buffer is {actual_width}x{actual_height}, expected {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

/// Writing an exported raster to a file or the clipboard failed
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("destination folder {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

/// Reading or writing the configuration file failed
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no configuration directory on this system")]
    NoConfigDir,
}
