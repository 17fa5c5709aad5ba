//! SpriteBake CLI library.
//!
//! This crate acts as the engine side of a combine run: scenes are JSON
//! documents, textures are PNG files next to them, and "re-importing" a
//! texture means decoding it from disk.

pub mod commands;
pub mod store;
