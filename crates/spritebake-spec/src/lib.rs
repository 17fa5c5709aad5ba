//! SpriteBake Spec Library
//!
//! This crate provides the serializable types shared by the SpriteBake
//! combine backend and CLI: combine settings, scene documents, pixel colors,
//! and the manifest written next to every combined texture.
//!
//! # Example
//!
//! ```
//! use spritebake_spec::{CombineSettings, Rgba8};
//!
//! let settings = CombineSettings {
//!     pixels_per_unit: 16.0,
//!     edge_padding: 1,
//!     fill_color: Rgba8::CLEAR,
//!     ..CombineSettings::default()
//! };
//!
//! assert!(settings.validate().is_ok());
//! ```
//!
//! # Modules
//!
//! - [`color`]: 8-bit RGBA pixel color
//! - [`error`]: Error types for settings and scene documents
//! - [`output`]: Placement metadata and output manifest types
//! - [`scene`]: Scene document types (nodes, renderers, texture import settings)
//! - [`settings`]: Combine settings with defaults and validation
//! - [`validation`]: Shared validation helpers and scene validation

pub mod color;
pub mod error;
pub mod output;
pub mod scene;
pub mod settings;
pub mod validation;

// Re-export commonly used types at the crate root
pub use color::Rgba8;
pub use error::{SceneError, SettingsError};
pub use output::{
    CombinedSpriteManifest, CompressionMode, FilterMode, OutputImportSettings, PlacementMetadata,
};
pub use scene::{
    ImportSettings, NodePath, SceneDocument, SceneNode, SpriteMeshType, SpriteRect, SpriteRendererData,
    TextureEntry,
};
pub use settings::{CombineSettings, CombinerOptions, MAX_CANVAS_DIMENSION};
pub use validation::{validate_scene, CommonValidationError};
