//! Placement metadata and the manifest written next to a combined texture.

use serde::{Deserialize, Serialize};

/// Where and how the caller should display a combined sprite.
///
/// Sorting values, material, and tint are carried over from the first
/// collected sprite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementMetadata {
    /// World-space center of the combined sprite.
    pub center_world_position: [f64; 2],
    /// Sorting layer value of the first collected sprite.
    pub sorting_layer: i32,
    /// Sorting order of the first collected sprite.
    pub sorting_order: i32,
    /// Material of the first collected sprite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Tint color of the first collected sprite.
    pub tint: [f64; 4],
}

/// Texture filtering the combined sprite should be imported with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Nearest-neighbor sampling.
    #[default]
    Point,
    Bilinear,
    Trilinear,
}

/// Texture compression the combined sprite should be imported with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionMode {
    #[default]
    Uncompressed,
    Compressed,
}

/// Import settings recommended for the combined texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputImportSettings {
    /// Pixels per unit the texture was baked at.
    pub pixels_per_unit: f64,
    pub filter_mode: FilterMode,
    pub compression: CompressionMode,
    /// Whether the engine should generate a physics outline from alpha.
    pub generate_fallback_physics_shape: bool,
}

impl OutputImportSettings {
    /// Pixel-exact settings for a texture baked at `pixels_per_unit`.
    pub fn pixel_exact(pixels_per_unit: f64) -> Self {
        Self {
            pixels_per_unit,
            filter_mode: FilterMode::Point,
            compression: CompressionMode::Uncompressed,
            generate_fallback_physics_shape: false,
        }
    }
}

/// Manifest written as `<asset_name>.json` next to `<asset_name>.png`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedSpriteManifest {
    /// Asset name (`<scene>_<combiner>`).
    pub asset_name: String,
    /// Image file name, relative to the manifest.
    pub image: String,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// BLAKE3 hash of the PNG bytes.
    pub hash: String,
    /// Number of sprites combined.
    pub sprite_count: usize,
    pub placement: PlacementMetadata,
    pub import: OutputImportSettings,
}
