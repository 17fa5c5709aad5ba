//! 8-bit RGBA pixel color.

use serde::{Deserialize, Serialize};

/// RGBA color with 8-bit components.
///
/// Serializes as a `[r, g, b, a]` array so scene documents stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const CLEAR: Rgba8 = Rgba8::new(0, 0, 0, 0);

    /// Opaque black.
    pub const BLACK: Rgba8 = Rgba8::new(0, 0, 0, 255);

    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);

    /// Create a new color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Whether this pixel is fully transparent.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Convert to a byte array in RGBA order.
    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(c: [u8; 4]) -> Self {
        Rgba8::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        c.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparency() {
        assert!(Rgba8::CLEAR.is_transparent());
        assert!(!Rgba8::new(0, 0, 0, 1).is_transparent());
        assert!(!Rgba8::WHITE.is_transparent());
    }

    #[test]
    fn test_serializes_as_array() {
        let json = serde_json::to_string(&Rgba8::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, "[1,2,3,4]");

        let parsed: Rgba8 = serde_json::from_str("[255,128,0,255]").unwrap();
        assert_eq!(parsed, Rgba8::opaque(255, 128, 0));
    }
}
