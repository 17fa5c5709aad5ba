//! Toggle command implementation
//!
//! Flips the enabled flag of every sprite renderer the combiner would
//! collect, so the source sprites can be hidden once the combined sprite is
//! in place (and shown again).

use anyhow::{Context, Result};
use colored::Colorize;
use spritebake_combine::document::resolve_roots;
use spritebake_combine::{toggle_renderers, CollectConfig};
use spritebake_spec::{NodePath, SceneDocument, SceneError};
use std::path::Path;
use std::process::ExitCode;

/// Run the toggle command.
///
/// # Returns
/// Exit code: 0 on success
pub fn run(scene_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Toggling:".cyan().bold(), scene_path);

    let toggled = toggle_scene(Path::new(scene_path))?;

    println!(
        "\n{} Toggled {} sprite renderer(s)",
        "SUCCESS".green().bold(),
        toggled
    );
    Ok(ExitCode::SUCCESS)
}

/// Toggle the collected renderers of a scene document and save it.
///
/// Returns the number of renderers toggled.
pub fn toggle_scene(scene_path: &Path) -> Result<usize> {
    let mut doc = SceneDocument::load(scene_path)
        .with_context(|| format!("Failed to load scene: {}", scene_path.display()))?;

    let settings = &doc.combiner.settings;
    let config = CollectConfig::from_settings(settings);
    let roots = resolve_roots(&doc, &settings.explicit_roots).map_err(SceneError::UnknownRoot)?;

    let toggled = toggle_renderers(&mut doc, &NodePath::root(), &roots, &config);
    tracing::info!("Toggled {} sprite renderers", toggled);

    doc.save(scene_path)
        .with_context(|| format!("Failed to save scene: {}", scene_path.display()))?;
    Ok(toggled)
}
