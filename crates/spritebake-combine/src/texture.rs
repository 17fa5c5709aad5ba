//! Texture access and scoped import-setting changes.
//!
//! Reading a sprite's pixels may require the engine to re-import its texture
//! as CPU-readable with a full-rect mesh. [`ReadableScope`] makes that change
//! for the lifetime of one sprite's copy and puts the original settings back
//! when dropped.

use spritebake_spec::ImportSettings;
use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Errors from a [`TextureStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureAccessError {
    /// No texture is registered under this key.
    #[error("unknown texture '{0}'")]
    UnknownTexture(String),

    /// The texture's pixels are not CPU-readable.
    #[error("texture '{0}' is not readable")]
    NotReadable(String),

    /// The engine could not apply new import settings.
    #[error("failed to re-import texture '{texture}': {message}")]
    Import { texture: String, message: String },

    /// The texture data could not be decoded.
    #[error("failed to decode texture '{texture}': {message}")]
    Decode { texture: String, message: String },

    /// The sprite rect reaches outside the texture.
    #[error("sprite rect {x},{y} {width}x{height} exceeds texture '{texture}' ({texture_width}x{texture_height})")]
    RectOutOfBounds {
        texture: String,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        texture_width: u32,
        texture_height: u32,
    },
}

/// Engine-side storage of sprite textures.
pub trait TextureStore {
    /// Current import settings of a texture.
    fn import_settings(&self, texture: &str) -> Result<ImportSettings, TextureAccessError>;

    /// Apply import settings to a texture and re-import it.
    fn apply_import_settings(
        &mut self,
        texture: &str,
        settings: &ImportSettings,
    ) -> Result<(), TextureAccessError>;

    /// Pixels of a texture. Fails unless the texture is currently readable.
    fn read_pixels(&self, texture: &str) -> Result<&PixelBuffer, TextureAccessError>;
}

/// Guard holding a texture in readable, full-rect state.
///
/// Settings are only touched when the texture was not already combine-ready,
/// and are restored exactly once, on drop.
pub struct ReadableScope<'a, S: TextureStore + ?Sized> {
    store: &'a mut S,
    texture: String,
    original: ImportSettings,
    changed: bool,
}

impl<'a, S: TextureStore + ?Sized> ReadableScope<'a, S> {
    /// Make `texture` readable for the lifetime of the returned guard.
    pub fn acquire(store: &'a mut S, texture: &str) -> Result<Self, TextureAccessError> {
        let original = store.import_settings(texture)?;
        let changed = !original.is_combine_ready();
        if changed {
            tracing::debug!("Making texture '{}' readable for combining", texture);
            store.apply_import_settings(texture, &ImportSettings::READABLE_FULL_RECT)?;
        }

        Ok(Self {
            store,
            texture: texture.to_string(),
            original,
            changed,
        })
    }

    /// Whether acquiring the guard changed the texture's settings.
    pub fn changed_settings(&self) -> bool {
        self.changed
    }

    /// Pixels of the guarded texture.
    pub fn pixels(&self) -> Result<&PixelBuffer, TextureAccessError> {
        self.store.read_pixels(&self.texture)
    }
}

impl<S: TextureStore + ?Sized> Drop for ReadableScope<'_, S> {
    fn drop(&mut self) {
        if !self.changed {
            return;
        }
        if let Err(e) = self
            .store
            .apply_import_settings(&self.texture, &self.original)
        {
            tracing::error!(
                "Failed to restore import settings of texture '{}': {}",
                self.texture,
                e
            );
        }
    }
}
