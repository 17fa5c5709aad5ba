//! In-memory [`TextureStore`] for tools and tests without an engine.
//!
//! Every `apply_import_settings` call is recorded, so callers can check that
//! temporary changes were undone.

use std::collections::BTreeMap;

use spritebake_spec::ImportSettings;

use crate::buffer::PixelBuffer;
use crate::texture::{TextureAccessError, TextureStore};

#[derive(Debug, Clone)]
struct MemoryTexture {
    pixels: PixelBuffer,
    initial: ImportSettings,
    settings: ImportSettings,
    locked: bool,
    history: Vec<ImportSettings>,
}

/// Texture store backed by a map of pixel buffers.
#[derive(Debug, Clone, Default)]
pub struct MemoryTextureStore {
    textures: BTreeMap<String, MemoryTexture>,
}

impl MemoryTextureStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a texture with default (non-readable, tight) import settings.
    pub fn insert(&mut self, key: impl Into<String>, pixels: PixelBuffer) {
        self.insert_with_settings(key, pixels, ImportSettings::default());
    }

    /// Add a texture with explicit import settings.
    pub fn insert_with_settings(
        &mut self,
        key: impl Into<String>,
        pixels: PixelBuffer,
        settings: ImportSettings,
    ) {
        self.textures.insert(
            key.into(),
            MemoryTexture {
                pixels,
                initial: settings,
                settings,
                locked: false,
                history: Vec::new(),
            },
        );
    }

    /// Lock a texture so its pixels cannot be read even when readable.
    pub fn set_locked(&mut self, key: &str, locked: bool) {
        if let Some(texture) = self.textures.get_mut(key) {
            texture.locked = locked;
        }
    }

    /// Every settings change applied to a texture, in order.
    pub fn history(&self, key: &str) -> &[ImportSettings] {
        self.textures
            .get(key)
            .map(|t| t.history.as_slice())
            .unwrap_or_default()
    }

    /// Number of settings changes applied to a texture.
    pub fn apply_count(&self, key: &str) -> usize {
        self.history(key).len()
    }

    /// Number of changes that put a texture back to its inserted settings.
    pub fn restore_count(&self, key: &str) -> usize {
        self.textures
            .get(key)
            .map(|t| t.history.iter().filter(|s| **s == t.initial).count())
            .unwrap_or(0)
    }

    fn texture(&self, key: &str) -> Result<&MemoryTexture, TextureAccessError> {
        self.textures
            .get(key)
            .ok_or_else(|| TextureAccessError::UnknownTexture(key.to_string()))
    }
}

impl TextureStore for MemoryTextureStore {
    fn import_settings(&self, texture: &str) -> Result<ImportSettings, TextureAccessError> {
        Ok(self.texture(texture)?.settings)
    }

    fn apply_import_settings(
        &mut self,
        texture: &str,
        settings: &ImportSettings,
    ) -> Result<(), TextureAccessError> {
        let entry = self
            .textures
            .get_mut(texture)
            .ok_or_else(|| TextureAccessError::UnknownTexture(texture.to_string()))?;
        entry.settings = *settings;
        entry.history.push(*settings);
        Ok(())
    }

    fn read_pixels(&self, texture: &str) -> Result<&PixelBuffer, TextureAccessError> {
        let entry = self.texture(texture)?;
        if !entry.settings.readable || entry.locked {
            return Err(TextureAccessError::NotReadable(texture.to_string()));
        }
        Ok(&entry.pixels)
    }
}
