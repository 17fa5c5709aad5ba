//! RGBA pixel buffer.

use spritebake_spec::Rgba8;

/// A 2D RGBA8 pixel buffer.
///
/// Rows are stored bottom-up: `y = 0` is the bottom row, matching engine
/// texture coordinates. Use [`PixelBuffer::from_rgba8_top_down`] and
/// [`PixelBuffer::to_rgba8_top_down`] to convert from and to image row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (row-major, bottom row first).
    pub data: Vec<Rgba8>,
}

impl PixelBuffer {
    /// Create a new buffer filled with a color.
    pub fn new(width: u32, height: u32, fill: Rgba8) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    /// Build a buffer from 8-bit RGBA bytes in image row order (top row first).
    ///
    /// Returns `None` if `bytes` is not exactly `width * height * 4` long.
    pub fn from_rgba8_top_down(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        let row_len = width as usize * 4;
        if bytes.len() != row_len * height as usize {
            return None;
        }

        let mut data = Vec::with_capacity(width as usize * height as usize);
        if row_len > 0 {
            for row in bytes.chunks_exact(row_len).rev() {
                data.extend(
                    row.chunks_exact(4)
                        .map(|px| Rgba8::new(px[0], px[1], px[2], px[3])),
                );
            }
        }

        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Convert to 8-bit RGBA bytes in image row order (top row first).
    pub fn to_rgba8_top_down(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        if self.width == 0 {
            return bytes;
        }
        for row in self.data.chunks_exact(self.width as usize).rev() {
            for color in row {
                bytes.extend_from_slice(&color.to_array());
            }
        }
        bytes
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Whether a signed coordinate falls inside the buffer.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgba8 {
        self.data[self.index(x, y)]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgba8) {
        let idx = self.index(x, y);
        self.data[idx] = color;
    }
}
