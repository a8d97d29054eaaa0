use thiserror::Error;

use crate::layers::source::Layer;

/// Main error type for the thumbnail compositor library
#[derive(Error, Debug)]
pub enum CompositorError {
    #[error("Image decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Output error: {0}")]
    Write(#[from] WriteError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Preview error: {reason}")]
    Preview { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning an input path into an RGBA layer
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("No {layer} image selected")]
    NotSelected { layer: Layer },

    #[error("{layer} image not found: {path}")]
    NotFound { layer: Layer, path: String },

    #[error("Failed to decode {layer} image {path}: {reason}")]
    InvalidImage {
        layer: Layer,
        path: String,
        reason: String,
    },
}

/// Errors raised while encoding or persisting the output PNG
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("PNG encoding failed: {reason}")]
    EncodeFailed { reason: String },

    #[error("Cannot create output file in {path}: {reason}")]
    CreateFailed { path: String, reason: String },

    #[error("Cannot write output file {path}: {reason}")]
    PersistFailed { path: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using CompositorError
pub type Result<T> = std::result::Result<T, CompositorError>;

impl CompositorError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Decode(DecodeError::NotSelected { .. }) => {
                "All four images (background, center, logo, banner) must be selected before rendering.".to_string()
            }
            Self::Decode(DecodeError::NotFound { layer, path }) => {
                format!("Could not find the {} image '{}'. Please check the file exists.", layer, path)
            }
            Self::Decode(DecodeError::InvalidImage { layer, path, .. }) => {
                format!(
                    "Could not read the {} image '{}'. Supported formats: PNG, JPEG, WEBP, BMP, GIF.",
                    layer, path
                )
            }
            Self::Write(WriteError::CreateFailed { path, .. }) => {
                format!("Cannot write into '{}'. Check the folder exists and is writable.", path)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
