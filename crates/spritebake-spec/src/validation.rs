//! Validation helpers and scene document validation.

use std::fmt;

use crate::error::SceneError;
use crate::scene::{SceneDocument, SceneNode};

/// Error type for common validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValidationError {
    /// Human-readable error message.
    pub message: String,
}

impl CommonValidationError {
    /// Creates a new validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommonValidationError {}

/// Validate that a value is positive (> 0) and finite.
///
/// # Example
/// ```
/// use spritebake_spec::validation::validate_positive;
///
/// assert!(validate_positive("pixels_per_unit", 16.0).is_ok());
/// assert!(validate_positive("pixels_per_unit", 0.0).is_err());
/// assert!(validate_positive("pixels_per_unit", f64::NAN).is_err());
/// ```
pub fn validate_positive(name: &str, value: f64) -> Result<(), CommonValidationError> {
    if !value.is_finite() {
        return Err(CommonValidationError::new(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    if value <= 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate a scene document: combiner settings, explicit roots, texture
/// references, and sprite rects.
///
/// Collects every problem instead of stopping at the first.
pub fn validate_scene(doc: &SceneDocument) -> Result<(), Vec<SceneError>> {
    let mut errors = Vec::new();

    if let Err(e) = doc.combiner.settings.validate() {
        errors.push(SceneError::Settings(e));
    }

    for root in &doc.combiner.settings.explicit_roots {
        if doc.find_by_name(root).is_none() {
            errors.push(SceneError::UnknownRoot(root.clone()));
        }
    }

    fn check_node(doc: &SceneDocument, node: &SceneNode, errors: &mut Vec<SceneError>) {
        if let Some(renderer) = &node.sprite_renderer {
            if !doc.textures.contains_key(&renderer.texture) {
                errors.push(SceneError::UnknownTexture {
                    node: node.name.clone(),
                    texture: renderer.texture.clone(),
                });
            }
            if renderer.rect.is_empty() {
                errors.push(SceneError::EmptyRect(node.name.clone()));
            }
        }
        for child in &node.children {
            check_node(doc, child, errors);
        }
    }

    check_node(doc, &doc.root, &mut errors);
    for node in &doc.nodes {
        check_node(doc, node, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
