//! Errors from a combine run.

use spritebake_spec::SettingsError;
use thiserror::Error;

use crate::png::PngError;
use crate::texture::TextureAccessError;

/// Errors that end a combine run. No output is produced for any of them.
#[derive(Debug, Error)]
pub enum CombineError {
    /// Collection found nothing to combine.
    #[error("no sprites found to combine")]
    NoSpritesFound,

    /// A sprite's pixels could not be read, even after making its texture
    /// readable.
    #[error("sprite '{instance}' could not be read from texture '{texture}': {source}")]
    SourceUnreadable {
        /// Name of the node carrying the sprite.
        instance: String,
        /// Texture key.
        texture: String,
        #[source]
        source: TextureAccessError,
    },

    /// Settings were rejected before any work began.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// PNG encoding failed.
    #[error("PNG encoding error: {0}")]
    Png(#[from] PngError),
}

impl From<SettingsError> for CombineError {
    fn from(e: SettingsError) -> Self {
        CombineError::InvalidConfiguration(e.to_string())
    }
}
