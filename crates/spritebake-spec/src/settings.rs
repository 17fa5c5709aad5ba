//! Combine settings.
//!
//! Defaults mirror the editor component the combiner is driven from:
//! 20 pixels per unit, 2 pixels of edge padding, a clear fill, and animated
//! objects skipped.

use serde::{Deserialize, Serialize};

use crate::color::Rgba8;
use crate::error::SettingsError;
use crate::validation::validate_positive;

/// Largest canvas edge, in pixels, a combine run may allocate.
///
/// Compositing holds 8 bytes per canvas pixel (the RGBA8 canvas plus the
/// occlusion record), about 2 GiB at this limit.
pub const MAX_CANVAS_DIMENSION: u32 = 16384;

/// Settings for one combine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CombineSettings {
    /// Resolution of the output texture relative to world units. Should
    /// usually match the pixels-per-unit of the sprites being combined.
    pub pixels_per_unit: f64,

    /// Empty border added around the bounding box on every side.
    pub edge_padding: u32,

    /// Color every canvas pixel starts as.
    pub fill_color: Rgba8,

    /// Draw without per-pixel sorting bookkeeping (last drawn wins).
    pub ignore_sorting_layers: bool,

    /// Skip nodes carrying an animator, together with their subtrees.
    pub skip_nodes_with_animator: bool,

    /// Skip disabled renderers and inactive nodes.
    pub skip_disabled: bool,

    /// Collect renderers from the combiner node and its descendants.
    pub include_subobjects: bool,

    /// Additional subtrees to collect from, by node name, in order.
    pub explicit_roots: Vec<String>,
}

impl Default for CombineSettings {
    fn default() -> Self {
        Self {
            pixels_per_unit: 20.0,
            edge_padding: 2,
            fill_color: Rgba8::CLEAR,
            ignore_sorting_layers: false,
            skip_nodes_with_animator: true,
            skip_disabled: false,
            include_subobjects: true,
            explicit_roots: Vec::new(),
        }
    }
}

impl CombineSettings {
    /// Validate settings before any work begins.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_positive("pixels_per_unit", self.pixels_per_unit)
            .map_err(|e| SettingsError::invalid("pixels_per_unit", e.message))?;

        if self.edge_padding > MAX_CANVAS_DIMENSION / 2 {
            return Err(SettingsError::invalid(
                "edge_padding",
                format!(
                    "must be at most {}, got {}",
                    MAX_CANVAS_DIMENSION / 2,
                    self.edge_padding
                ),
            ));
        }

        if let Some(empty) = self.explicit_roots.iter().position(|r| r.is_empty()) {
            return Err(SettingsError::invalid(
                "explicit_roots",
                format!("entry {} is an empty name", empty),
            ));
        }

        Ok(())
    }
}

/// The `combiner` block of a scene document: settings plus output options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CombinerOptions {
    /// Settings for the combine run.
    #[serde(default)]
    pub settings: CombineSettings,

    /// Directory, relative to the output root, the combined texture goes to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Whether to add (or update) a node displaying the combined sprite.
    #[serde(default = "default_true")]
    pub create_object_in_scene: bool,
}

fn default_output_dir() -> String {
    "Sprites/CombinedSprites".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CombinerOptions {
    fn default() -> Self {
        Self {
            settings: CombineSettings::default(),
            output_dir: default_output_dir(),
            create_object_in_scene: true,
        }
    }
}
