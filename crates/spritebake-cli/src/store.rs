//! File-backed texture store.
//!
//! Textures are PNG files listed in the scene document's texture table.
//! Making a texture readable "re-imports" it by decoding the PNG; making it
//! non-readable drops the decoded pixels again.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use spritebake_combine::png::read_rgba_file;
use spritebake_combine::{PixelBuffer, TextureAccessError, TextureStore};
use spritebake_spec::{ImportSettings, TextureEntry};

/// Texture store over PNG files relative to a base directory.
#[derive(Debug)]
pub struct FileTextureStore {
    base_dir: PathBuf,
    textures: BTreeMap<String, TextureEntry>,
    pixels: BTreeMap<String, PixelBuffer>,
    load_errors: BTreeMap<String, String>,
}

impl FileTextureStore {
    /// Create a store for `textures`, resolving paths against `base_dir`.
    ///
    /// Textures that are already readable are decoded up front. A decode
    /// failure only surfaces when that texture's pixels are read.
    pub fn new(base_dir: impl Into<PathBuf>, textures: BTreeMap<String, TextureEntry>) -> Self {
        let mut store = Self {
            base_dir: base_dir.into(),
            textures,
            pixels: BTreeMap::new(),
            load_errors: BTreeMap::new(),
        };

        let readable: Vec<String> = store
            .textures
            .iter()
            .filter(|(_, entry)| entry.import.readable)
            .map(|(key, _)| key.clone())
            .collect();
        for key in readable {
            if let Err(e) = store.load(&key) {
                let message = match e {
                    TextureAccessError::Decode { message, .. } => message,
                    other => other.to_string(),
                };
                store.load_errors.insert(key, message);
            }
        }

        store
    }

    /// Give back the texture table with its current import settings.
    pub fn into_textures(self) -> BTreeMap<String, TextureEntry> {
        self.textures
    }

    /// Absolute path of a texture's PNG file.
    pub fn texture_path(&self, texture: &str) -> Option<PathBuf> {
        self.textures
            .get(texture)
            .map(|entry| self.base_dir.join(&entry.path))
    }

    fn entry(&self, texture: &str) -> Result<&TextureEntry, TextureAccessError> {
        self.textures
            .get(texture)
            .ok_or_else(|| TextureAccessError::UnknownTexture(texture.to_string()))
    }

    fn load(&mut self, texture: &str) -> Result<(), TextureAccessError> {
        let path = self
            .texture_path(texture)
            .ok_or_else(|| TextureAccessError::UnknownTexture(texture.to_string()))?;
        let buffer = decode(texture, &path)?;
        self.load_errors.remove(texture);
        self.pixels.insert(texture.to_string(), buffer);
        Ok(())
    }
}

fn decode(texture: &str, path: &Path) -> Result<PixelBuffer, TextureAccessError> {
    read_rgba_file(path).map_err(|e| TextureAccessError::Decode {
        texture: texture.to_string(),
        message: format!("{}: {}", path.display(), e),
    })
}

impl TextureStore for FileTextureStore {
    fn import_settings(&self, texture: &str) -> Result<ImportSettings, TextureAccessError> {
        Ok(self.entry(texture)?.import)
    }

    fn apply_import_settings(
        &mut self,
        texture: &str,
        settings: &ImportSettings,
    ) -> Result<(), TextureAccessError> {
        self.entry(texture)?;

        if settings.readable {
            self.load(texture).map_err(|e| TextureAccessError::Import {
                texture: texture.to_string(),
                message: e.to_string(),
            })?;
        } else {
            self.pixels.remove(texture);
        }

        if let Some(entry) = self.textures.get_mut(texture) {
            entry.import = *settings;
        }
        Ok(())
    }

    fn read_pixels(&self, texture: &str) -> Result<&PixelBuffer, TextureAccessError> {
        let entry = self.entry(texture)?;
        if !entry.import.readable {
            return Err(TextureAccessError::NotReadable(texture.to_string()));
        }
        if let Some(message) = self.load_errors.get(texture) {
            return Err(TextureAccessError::Decode {
                texture: texture.to_string(),
                message: message.clone(),
            });
        }
        self.pixels
            .get(texture)
            .ok_or_else(|| TextureAccessError::NotReadable(texture.to_string()))
    }
}
