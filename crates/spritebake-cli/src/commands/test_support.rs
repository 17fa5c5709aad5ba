//! Scene fixtures on disk for command tests.

use std::path::{Path, PathBuf};

use spritebake_combine::png::{write_rgba, PngConfig};
use spritebake_combine::PixelBuffer;
use spritebake_spec::{
    ImportSettings, Rgba8, SceneDocument, SceneNode, SpriteRect, SpriteRendererData, TextureEntry,
};

pub const RED: Rgba8 = Rgba8::opaque(255, 0, 0);
pub const BLUE: Rgba8 = Rgba8::opaque(0, 0, 255);

fn renderer(texture: &str, order: i32) -> SpriteRendererData {
    SpriteRendererData {
        texture: texture.to_string(),
        rect: SpriteRect::full(4, 4),
        flip_x: false,
        flip_y: false,
        sorting_layer: 0,
        sorting_order: order,
        enabled: true,
        material: None,
        color: [1.0; 4],
    }
}

/// A scene with two overlapping 4x4 sprites at x=0 and x=1 (ppu 2),
/// written as `scene.json` next to `textures/red.png` and `textures/blue.png`.
pub fn sample_scene() -> SceneDocument {
    let root = SceneNode::new("Combiner")
        .with_position(0.0, 0.0, 5.0)
        .with_child(
            SceneNode::new("Red")
                .with_position(0.0, 0.0, 0.0)
                .with_renderer(renderer("red", 0)),
        )
        .with_child(
            SceneNode::new("Blue")
                .with_position(1.0, 0.0, 0.0)
                .with_renderer(renderer("blue", 1)),
        );

    let mut doc = SceneDocument::new("Level1", root);
    for key in ["red", "blue"] {
        doc.textures.insert(
            key.to_string(),
            TextureEntry {
                path: format!("textures/{}.png", key),
                import: ImportSettings::default(),
            },
        );
    }
    doc.combiner.settings.pixels_per_unit = 2.0;
    doc.combiner.settings.edge_padding = 1;
    doc
}

/// Write `doc` and its two textures under `dir`. Returns the scene path.
pub fn write_scene(dir: &Path, doc: &SceneDocument) -> PathBuf {
    let textures = dir.join("textures");
    std::fs::create_dir_all(&textures).unwrap();
    let config = PngConfig::default();
    write_rgba(&PixelBuffer::new(4, 4, RED), &textures.join("red.png"), &config).unwrap();
    write_rgba(&PixelBuffer::new(4, 4, BLUE), &textures.join("blue.png"), &config).unwrap();

    let path = dir.join("scene.json");
    doc.save(&path).unwrap();
    path
}
