//! Error types for the Sunflow exporter.

use thiserror::Error;

/// Result type alias using ExportError.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Main error type for scene export operations.
///
/// Only conditions that abort an export pass are represented here. Recoverable
/// conditions (broken image textures, unsupported lamps, unreadable persisted
/// settings) are logged and the pass continues.
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error while reading a snapshot or writing scene files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to format scene text.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// The scene snapshot is internally inconsistent.
    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    /// The scene has no usable active camera.
    #[error("Missing camera: {0}")]
    MissingCamera(String),

    /// The export settings violate an exclusivity or dependency rule.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// The renderer config file is malformed.
    #[error("Config error: {0}")]
    Config(String),

    /// The renderer has not been configured yet.
    #[error("Renderer not configured: no config file at {0}")]
    NotConfigured(String),
}
