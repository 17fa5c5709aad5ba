//! End-to-end combine run.

use spritebake_spec::CombineSettings;

use crate::bounds::compute_bounds;
use crate::collect::{collect_sprites, CollectConfig, SceneGraph, SpriteInstance};
use crate::composite::composite_sprites;
use crate::error::CombineError;
use crate::export::{export, CombinedSprite};
use crate::png::PngConfig;
use crate::texture::TextureStore;

/// Combine every sprite under `root` and `explicit_roots` into one texture.
///
/// Settings are validated before the scene is touched. Nothing is written
/// anywhere; the caller decides where the PNG goes.
pub fn combine_sprites<G, S>(
    scene: &G,
    root: &G::NodeId,
    explicit_roots: &[G::NodeId],
    store: &mut S,
    settings: &CombineSettings,
) -> Result<CombinedSprite, CombineError>
where
    G: SceneGraph,
    S: TextureStore + ?Sized,
{
    settings.validate()?;

    let config = CollectConfig::from_settings(settings);
    let instances: Vec<SpriteInstance> = collect_sprites(scene, root, explicit_roots, &config)?
        .into_iter()
        .map(|c| c.instance)
        .collect();

    let bounds =
        compute_bounds(&instances, settings.pixels_per_unit).ok_or(CombineError::NoSpritesFound)?;

    let composition = composite_sprites(&instances, &bounds, settings, store)?;
    let sprite = export(&composition, &PngConfig::default())?;

    tracing::info!(
        "Combined {} sprites into {}x{} texture at ({}, {})",
        sprite.sprite_count,
        sprite.width,
        sprite.height,
        sprite.placement.center_world_position[0],
        sprite.placement.center_world_position[1]
    );
    tracing::debug!(
        "Pixel bounds ({}, {})..({}, {}), {} pixels clipped at the canvas edge",
        composition.bounds.min[0],
        composition.bounds.min[1],
        composition.bounds.max[0],
        composition.bounds.max[1],
        composition.clipped_pixels
    );

    Ok(sprite)
}
