//! PNG export of a finished composition.

use spritebake_spec::{CombinedSpriteManifest, OutputImportSettings, PlacementMetadata};

use crate::composite::Composition;
use crate::png::{write_rgba_to_vec_with_hash, PngConfig, PngError};

/// A combined sprite ready to hand back to the engine.
#[derive(Debug, Clone)]
pub struct CombinedSprite {
    /// PNG-encoded texture data.
    pub png_data: Vec<u8>,
    /// BLAKE3 hash of the PNG data.
    pub hash: String,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// Where to place the combined sprite.
    pub placement: PlacementMetadata,
    /// Number of sprites combined.
    pub sprite_count: usize,
}

impl CombinedSprite {
    /// Manifest describing this sprite, for a texture saved as `image`.
    pub fn manifest(
        &self,
        asset_name: impl Into<String>,
        image: impl Into<String>,
        pixels_per_unit: f64,
    ) -> CombinedSpriteManifest {
        CombinedSpriteManifest {
            asset_name: asset_name.into(),
            image: image.into(),
            width: self.width,
            height: self.height,
            hash: self.hash.clone(),
            sprite_count: self.sprite_count,
            placement: self.placement.clone(),
            import: OutputImportSettings::pixel_exact(pixels_per_unit),
        }
    }
}

/// Encode a composition's canvas as PNG. The composition is left untouched.
pub fn export(composition: &Composition, config: &PngConfig) -> Result<CombinedSprite, PngError> {
    let (png_data, hash) = write_rgba_to_vec_with_hash(&composition.canvas.pixels, config)?;

    Ok(CombinedSprite {
        png_data,
        hash,
        width: composition.canvas.width(),
        height: composition.canvas.height(),
        placement: composition.placement.clone(),
        sprite_count: composition.sprite_count,
    })
}
