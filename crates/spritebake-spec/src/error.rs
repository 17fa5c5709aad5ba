//! Error types for settings validation and scene document processing.

use thiserror::Error;

/// Errors from validating [`crate::CombineSettings`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    /// A settings field has an unusable value.
    #[error("invalid setting '{field}': {message}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable reason.
        message: String,
    },
}

impl SettingsError {
    /// Creates an invalid-value error for a field.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        SettingsError::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

/// Errors from loading, saving, or validating a scene document.
#[derive(Debug, Error)]
pub enum SceneError {
    /// JSON parsing or serialization error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error while reading or writing the document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A sprite renderer references a texture key missing from `textures`.
    #[error("node '{node}' references unknown texture '{texture}'")]
    UnknownTexture {
        /// Name of the node carrying the renderer.
        node: String,
        /// The missing texture key.
        texture: String,
    },

    /// An explicit root name does not match any node in the document.
    #[error("explicit root '{0}' not found in scene")]
    UnknownRoot(String),

    /// A sprite rect has zero width or height.
    #[error("node '{0}' has an empty sprite rect")]
    EmptyRect(String),

    /// The combiner settings are invalid.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
