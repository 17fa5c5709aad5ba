//! SpriteBake Sprite Combiner
//!
//! This crate bakes a set of world-positioned sprites into a single texture.
//! A run collects sprite renderers from a scene, computes a pixel-space
//! bounding box around them, composites every sprite's pixels into one
//! canvas, and encodes the canvas as PNG together with the metadata needed
//! to place the combined sprite back into the scene.
//!
//! # Pipeline
//!
//! 1. **Collect** ([`collect`]): depth-first walk from the combiner node and
//!    any explicit roots, skipping animated and (optionally) disabled nodes.
//! 2. **Bounds** ([`bounds`]): union of every sprite's pixel-space box.
//! 3. **Composite** ([`composite`]): copy pixels with flip handling and a
//!    per-pixel sorting layer/order occlusion rule.
//! 4. **Export** ([`export`]): deterministic PNG plus placement metadata.
//!
//! The scene and the textures stay owned by the caller, reached through the
//! [`SceneGraph`] and [`TextureStore`] traits. Any import setting changed to
//! read a texture is restored by [`ReadableScope`] when that sprite is done,
//! including when the run aborts.
//!
//! # Example
//!
//! ```
//! use spritebake_combine::memory::MemoryTextureStore;
//! use spritebake_combine::{combine_sprites, PixelBuffer};
//! use spritebake_spec::{
//!     CombineSettings, NodePath, Rgba8, SceneDocument, SceneNode, SpriteRect, SpriteRendererData,
//! };
//!
//! let renderer = SpriteRendererData {
//!     texture: "rock".to_string(),
//!     rect: SpriteRect::full(4, 4),
//!     flip_x: false,
//!     flip_y: false,
//!     sorting_layer: 0,
//!     sorting_order: 0,
//!     enabled: true,
//!     material: None,
//!     color: [1.0; 4],
//! };
//! let scene = SceneDocument::new(
//!     "Level1",
//!     SceneNode::new("Combiner").with_child(SceneNode::new("Rock").with_renderer(renderer)),
//! );
//!
//! let mut store = MemoryTextureStore::new();
//! store.insert("rock", PixelBuffer::new(4, 4, Rgba8::WHITE));
//!
//! let settings = CombineSettings {
//!     pixels_per_unit: 4.0,
//!     edge_padding: 1,
//!     ..CombineSettings::default()
//! };
//! let sprite = combine_sprites(&scene, &NodePath::root(), &[], &mut store, &settings).unwrap();
//! assert_eq!((sprite.width, sprite.height), (6, 6));
//! ```
//!
//! # Determinism
//!
//! The same scene, textures, and settings always produce byte-identical PNG
//! output: traversal order is fixed, overlap is resolved by sorting keys
//! rather than iteration accidents, and the PNG encoder uses fixed settings.

pub mod bounds;
pub mod buffer;
pub mod collect;
pub mod composite;
pub mod document;
pub mod error;
pub mod export;
pub mod memory;
pub mod pipeline;
pub mod png;
pub mod texture;

// Re-export main types for convenience
pub use bounds::{compute_bounds, Bounds};
pub use buffer::PixelBuffer;
pub use collect::{
    collect_renderers, collect_sprites, toggle_renderers, CollectConfig, Collected, NodeProbe,
    SceneGraph, SceneGraphMut, SpriteInstance,
};
pub use composite::{composite_sprites, Composition, OcclusionRecord, OutputCanvas, SortKey};
pub use error::CombineError;
pub use export::{export, CombinedSprite};
pub use pipeline::combine_sprites;
pub use png::{PngConfig, PngError};
pub use texture::{ReadableScope, TextureAccessError, TextureStore};
