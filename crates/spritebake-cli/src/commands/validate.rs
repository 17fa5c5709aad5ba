//! Validate command implementation
//!
//! Checks a scene document without reading any texture: settings, explicit
//! roots, texture references, and sprite rects.

use anyhow::Result;
use colored::Colorize;
use spritebake_combine::document::resolve_roots;
use spritebake_combine::{collect_renderers, CollectConfig};
use spritebake_spec::{validate_scene, NodePath, SceneDocument, SceneError};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{scene_error_to_json, ValidateOutput, ValidateResult};

/// Run the validate command.
///
/// # Arguments
/// * `scene_path` - Path to the scene document
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(scene_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(scene_path)
    } else {
        run_human(scene_path)
    }
}

/// Run validate with human-readable (colored) output.
fn run_human(scene_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), scene_path);

    match check_scene(Path::new(scene_path)) {
        Ok(result) => {
            println!("{} {}", "Scene:".dimmed(), result.scene);
            println!("{} {}", "Textures:".dimmed(), result.textures);
            println!("{} {}", "Sprite renderers:".dimmed(), result.sprite_renderers);
            println!("\n{} Scene is valid", "SUCCESS".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            println!("\n{}", "Errors:".red().bold());
            for error in &errors {
                println!("  {} {}", "x".red(), error);
            }
            println!(
                "\n{} Scene has {} error(s)",
                "FAILED".red().bold(),
                errors.len()
            );
            Ok(ExitCode::from(1))
        }
    }
}

/// Run validate with machine-readable JSON output.
fn run_json(scene_path: &str) -> Result<ExitCode> {
    let (output, code) = match check_scene(Path::new(scene_path)) {
        Ok(result) => (ValidateOutput::success(result), ExitCode::SUCCESS),
        Err(errors) => (
            ValidateOutput::failure(
                errors
                    .iter()
                    .map(|e| scene_error_to_json(e, scene_path))
                    .collect(),
            ),
            ExitCode::from(1),
        ),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

/// Load and validate a scene document, collecting every problem found.
pub fn check_scene(scene_path: &Path) -> Result<ValidateResult, Vec<SceneError>> {
    let doc = SceneDocument::load(scene_path).map_err(|e| vec![e])?;
    validate_scene(&doc)?;

    let settings = &doc.combiner.settings;
    let roots = resolve_roots(&doc, &settings.explicit_roots)
        .map_err(|name| vec![SceneError::UnknownRoot(name)])?;
    let collected = collect_renderers(
        &doc,
        &NodePath::root(),
        &roots,
        &CollectConfig::from_settings(settings),
    );

    Ok(ValidateResult {
        scene: doc.name.clone(),
        textures: doc.textures.len(),
        sprite_renderers: collected.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::json_output::error_codes;
    use crate::commands::test_support::{sample_scene, write_scene};
    use pretty_assertions::assert_eq;
    use spritebake_spec::SpriteRect;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_valid_scene() {
        let tmp = tempdir().unwrap();
        let scene_path = write_scene(tmp.path(), &sample_scene());

        let result = check_scene(&scene_path).unwrap();
        assert_eq!(
            result,
            ValidateResult {
                scene: "Level1".to_string(),
                textures: 2,
                sprite_renderers: 2,
            }
        );
    }

    #[test]
    fn test_collects_every_problem() {
        let tmp = tempdir().unwrap();
        let mut doc = sample_scene();
        doc.combiner.settings.pixels_per_unit = -1.0;
        doc.textures.remove("blue");
        doc.root.children[0]
            .sprite_renderer
            .as_mut()
            .unwrap()
            .rect = SpriteRect::full(0, 4);
        let scene_path = write_scene(tmp.path(), &doc);

        let errors = check_scene(&scene_path).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], SceneError::Settings(_)));
        assert!(matches!(errors[1], SceneError::EmptyRect(_)));
        assert!(matches!(errors[2], SceneError::UnknownTexture { .. }));
    }

    #[test]
    fn test_unparseable_scene() {
        let tmp = tempdir().unwrap();
        let scene_path = tmp.path().join("scene.json");
        fs::write(&scene_path, "{ not json").unwrap();

        let errors = check_scene(&scene_path).unwrap_err();
        let json = scene_error_to_json(&errors[0], "scene.json");
        assert_eq!(json.code, error_codes::JSON_PARSE);
    }

    #[test]
    fn test_run_exit_codes() {
        let tmp = tempdir().unwrap();
        let scene_path = write_scene(tmp.path(), &sample_scene());
        let code = run(scene_path.to_str().unwrap(), true).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let missing = tmp.path().join("missing.json");
        let code = run(missing.to_str().unwrap(), false).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
