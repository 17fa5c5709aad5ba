//! Combine command implementation
//!
//! Bakes every sprite under the scene's combiner node into one PNG, writes
//! a manifest next to it, and optionally places the result in the scene.

use anyhow::{Context, Result};
use colored::Colorize;
use spritebake_combine::document::resolve_roots;
use spritebake_combine::{combine_sprites, CombineError, CombinedSprite};
use spritebake_spec::{
    ImportSettings, NodePath, SceneDocument, SceneError, SceneNode, SpriteRect,
    SpriteRendererData, TextureEntry,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::json_output::{
    combine_error_to_json, error_codes, scene_error_to_json, CombineOutput, CombineResult,
    JsonError,
};
use crate::store::FileTextureStore;

/// Run the combine command.
///
/// # Arguments
/// * `scene_path` - Path to the scene document
/// * `out_root` - Output root directory (default: the scene's directory)
/// * `no_scene_object` - Skip adding the combined sprite to the scene
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on failure
pub fn run(
    scene_path: &str,
    out_root: Option<&str>,
    no_scene_object: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let out_root = out_root.map(Path::new);
    if json_output {
        run_json(scene_path, out_root, no_scene_object)
    } else {
        run_human(scene_path, out_root, no_scene_object)
    }
}

/// Run combine with human-readable (colored) output.
fn run_human(scene_path: &str, out_root: Option<&Path>, no_scene_object: bool) -> Result<ExitCode> {
    println!("{} {}", "Combining:".cyan().bold(), scene_path);

    let result = combine_scene(Path::new(scene_path), out_root, no_scene_object)?;

    println!("{} {}", "Image:".dimmed(), result.image_path);
    println!("{} {}", "Manifest:".dimmed(), result.manifest_path);
    println!("{} {}", "Hash:".dimmed(), &result.hash[..16]);
    if result.scene_object {
        println!(
            "{} '{}' at ({}, {})",
            "Scene object:".dimmed(),
            result.asset_name,
            result.center[0],
            result.center[1]
        );
    }

    println!(
        "\n{} Combined {} sprite(s) into {}x{}",
        "SUCCESS".green().bold(),
        result.sprite_count,
        result.width,
        result.height
    );
    Ok(ExitCode::SUCCESS)
}

/// Run combine with machine-readable JSON output.
fn run_json(scene_path: &str, out_root: Option<&Path>, no_scene_object: bool) -> Result<ExitCode> {
    let (output, code) = match combine_scene(Path::new(scene_path), out_root, no_scene_object) {
        Ok(result) => (CombineOutput::success(result), ExitCode::SUCCESS),
        Err(e) => (
            CombineOutput::failure(vec![error_to_json(&e, scene_path)]),
            ExitCode::from(1),
        ),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

fn error_to_json(error: &anyhow::Error, scene_path: &str) -> JsonError {
    if let Some(e) = error.downcast_ref::<CombineError>() {
        combine_error_to_json(e)
    } else if let Some(e) = error.downcast_ref::<SceneError>() {
        scene_error_to_json(e, scene_path)
    } else {
        JsonError::new(error_codes::FILE_WRITE, format!("{:#}", error))
    }
}

/// Combine a scene document and write the results.
///
/// Writes `<out_root>/<output_dir>/<scene>_<combiner>.png` and a `.json`
/// manifest beside it. Texture import settings touched during the run are
/// restored before anything is written.
pub fn combine_scene(
    scene_path: &Path,
    out_root: Option<&Path>,
    no_scene_object: bool,
) -> Result<CombineResult> {
    let mut doc = SceneDocument::load(scene_path)
        .with_context(|| format!("Failed to load scene: {}", scene_path.display()))?;
    let scene_dir = scene_path.parent().map(Path::to_path_buf).unwrap_or_default();

    let settings = doc.combiner.settings.clone();
    let roots = resolve_roots(&doc, &settings.explicit_roots).map_err(SceneError::UnknownRoot)?;

    let mut store = FileTextureStore::new(scene_dir.clone(), doc.textures.clone());
    let outcome = combine_sprites(&doc, &NodePath::root(), &roots, &mut store, &settings);
    doc.textures = store.into_textures();
    let sprite = outcome?;

    let asset_name = format!("{}_{}", doc.name, doc.root.name);
    let out_dir = out_root
        .map(Path::to_path_buf)
        .unwrap_or_else(|| scene_dir.clone())
        .join(&doc.combiner.output_dir);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let image_name = format!("{}.png", asset_name);
    let image_path = out_dir.join(&image_name);
    let manifest = sprite.manifest(&asset_name, &image_name, settings.pixels_per_unit);
    let manifest_json = serde_json::to_string_pretty(&manifest)?;
    let manifest_path = out_dir.join(format!("{}.json", asset_name));

    fs::write(&image_path, &sprite.png_data)
        .with_context(|| format!("Failed to write image: {}", image_path.display()))?;
    if let Err(e) = fs::write(&manifest_path, manifest_json) {
        // The image is only usable together with its manifest.
        if let Err(cleanup) = fs::remove_file(&image_path) {
            tracing::warn!(
                "Failed to remove image {} after manifest error: {}",
                image_path.display(),
                cleanup
            );
        }
        return Err(anyhow::Error::new(e)
            .context(format!("Failed to write manifest: {}", manifest_path.display())));
    }

    let scene_object = doc.combiner.create_object_in_scene && !no_scene_object;
    if scene_object {
        let texture_path = relative_to(&image_path, &scene_dir);
        place_in_scene(&mut doc, &asset_name, &sprite, texture_path);
        doc.save(scene_path)
            .with_context(|| format!("Failed to save scene: {}", scene_path.display()))?;
    }

    Ok(CombineResult {
        asset_name,
        image_path: image_path.display().to_string(),
        manifest_path: manifest_path.display().to_string(),
        width: sprite.width,
        height: sprite.height,
        hash: sprite.hash,
        sprite_count: sprite.sprite_count,
        center: sprite.placement.center_world_position,
        scene_object,
    })
}

fn relative_to(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(PathBuf::from)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .replace('\\', "/")
}

/// Register the combined texture and find-or-create the top-level node that
/// displays it, at the combined center and the combiner's depth.
fn place_in_scene(
    doc: &mut SceneDocument,
    asset_name: &str,
    sprite: &CombinedSprite,
    texture_path: String,
) {
    doc.textures.insert(
        asset_name.to_string(),
        TextureEntry {
            path: texture_path,
            import: ImportSettings::default(),
        },
    );

    let placement = &sprite.placement;
    let renderer = SpriteRendererData {
        texture: asset_name.to_string(),
        rect: SpriteRect::full(sprite.width, sprite.height),
        flip_x: false,
        flip_y: false,
        sorting_layer: placement.sorting_layer,
        sorting_order: placement.sorting_order,
        enabled: true,
        material: placement.material.clone(),
        color: placement.tint,
    };

    let [x, y] = placement.center_world_position;
    let z = doc.root.position[2];
    doc.upsert_top_level(
        SceneNode::new(asset_name)
            .with_position(x, y, z)
            .with_renderer(renderer),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{sample_scene, write_scene, BLUE, RED};
    use pretty_assertions::assert_eq;
    use spritebake_combine::png::read_rgba_file;
    use spritebake_spec::{CombinedSpriteManifest, Rgba8};
    use tempfile::tempdir;

    #[test]
    fn test_combine_writes_image_and_manifest() {
        let tmp = tempdir().unwrap();
        let scene_path = write_scene(tmp.path(), &sample_scene());

        let result = combine_scene(&scene_path, None, true).unwrap();
        assert_eq!(result.asset_name, "Level1_Combiner");
        assert_eq!((result.width, result.height), (8, 6));
        assert_eq!(result.sprite_count, 2);
        assert_eq!(result.center, [0.5, 0.0]);
        assert!(!result.scene_object);

        let out_dir = tmp.path().join("Sprites/CombinedSprites");
        let pixels = read_rgba_file(&out_dir.join("Level1_Combiner.png")).unwrap();
        assert_eq!(pixels.get(0, 0), Rgba8::CLEAR);
        assert_eq!(pixels.get(1, 1), RED);
        assert_eq!(pixels.get(3, 2), BLUE);
        assert_eq!(pixels.get(6, 4), BLUE);

        let manifest: CombinedSpriteManifest = serde_json::from_str(
            &fs::read_to_string(out_dir.join("Level1_Combiner.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(manifest.image, "Level1_Combiner.png");
        assert_eq!(manifest.hash, result.hash);
        assert_eq!(manifest.import.pixels_per_unit, 2.0);
    }

    #[test]
    fn test_combine_places_object_in_scene() {
        let tmp = tempdir().unwrap();
        let scene_path = write_scene(tmp.path(), &sample_scene());

        let result = combine_scene(&scene_path, None, false).unwrap();
        assert!(result.scene_object);

        let doc = SceneDocument::load(&scene_path).unwrap();
        let node = &doc.nodes[0];
        assert_eq!(node.name, "Level1_Combiner");
        assert_eq!(node.position, [0.5, 0.0, 5.0]);
        let renderer = node.sprite_renderer.as_ref().unwrap();
        assert_eq!(renderer.rect, SpriteRect::full(8, 6));
        assert_eq!(
            doc.textures["Level1_Combiner"].path,
            "Sprites/CombinedSprites/Level1_Combiner.png"
        );

        // Source textures are back to their original import settings.
        assert_eq!(doc.textures["red"].import, ImportSettings::default());

        // A second run updates the same node.
        combine_scene(&scene_path, None, false).unwrap();
        let doc = SceneDocument::load(&scene_path).unwrap();
        assert_eq!(doc.nodes.len(), 1);
    }

    #[test]
    fn test_combine_respects_out_root() {
        let tmp = tempdir().unwrap();
        let out = tempdir().unwrap();
        let scene_path = write_scene(tmp.path(), &sample_scene());

        combine_scene(&scene_path, Some(out.path()), true).unwrap();
        assert!(out
            .path()
            .join("Sprites/CombinedSprites/Level1_Combiner.png")
            .exists());
        assert!(!tmp.path().join("Sprites").exists());
    }

    #[test]
    fn test_manifest_write_failure_leaves_no_image() {
        let tmp = tempdir().unwrap();
        let scene_path = write_scene(tmp.path(), &sample_scene());
        let out_dir = tmp.path().join("Sprites/CombinedSprites");
        // A directory where the manifest file should go makes the write fail.
        fs::create_dir_all(out_dir.join("Level1_Combiner.json")).unwrap();

        let err = combine_scene(&scene_path, None, false).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to write manifest"));
        assert!(!out_dir.join("Level1_Combiner.png").exists());
        assert_eq!(SceneDocument::load(&scene_path).unwrap(), sample_scene());
    }

    #[test]
    fn test_combine_without_sprites_fails() {
        let tmp = tempdir().unwrap();
        let mut doc = sample_scene();
        doc.root.children.clear();
        let scene_path = write_scene(tmp.path(), &doc);

        let err = combine_scene(&scene_path, None, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CombineError>(),
            Some(CombineError::NoSpritesFound)
        ));
        assert_eq!(error_to_json(&err, "scene.json").code, error_codes::NO_SPRITES);
        assert!(!tmp.path().join("Sprites").exists());
    }

    #[test]
    fn test_combine_with_missing_texture_file() {
        let tmp = tempdir().unwrap();
        let scene_path = write_scene(tmp.path(), &sample_scene());
        fs::remove_file(tmp.path().join("textures/blue.png")).unwrap();

        let err = combine_scene(&scene_path, None, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CombineError>(),
            Some(CombineError::SourceUnreadable { .. })
        ));

        // Scene is untouched on failure.
        let doc = SceneDocument::load(&scene_path).unwrap();
        assert_eq!(doc, sample_scene());
    }

    #[test]
    fn test_combine_unknown_explicit_root() {
        let tmp = tempdir().unwrap();
        let mut doc = sample_scene();
        doc.combiner.settings.explicit_roots = vec!["Nowhere".to_string()];
        let scene_path = write_scene(tmp.path(), &doc);

        let err = combine_scene(&scene_path, None, false).unwrap_err();
        assert_eq!(error_to_json(&err, "scene.json").code, error_codes::INVALID_SCENE);
    }

    #[test]
    fn test_run_json_exit_codes() {
        let tmp = tempdir().unwrap();
        let scene_path = write_scene(tmp.path(), &sample_scene());
        let path = scene_path.to_str().unwrap();

        assert_eq!(run(path, None, true, true).unwrap(), ExitCode::SUCCESS);

        let missing = tmp.path().join("missing.json");
        let code = run(missing.to_str().unwrap(), None, true, true).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
