//! Pixel-space bounding box of a set of sprites.

use crate::collect::SpriteInstance;

/// Slack absorbed before rounding an extent up, so float noise from
/// `position * pixels_per_unit` cannot add a whole pixel row or column.
const EXTENT_EPSILON: f64 = 1e-6;

/// Axis-aligned box in pixel space (world position × pixels per unit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Bounds {
    /// Box centered on `center` with the given full size.
    pub fn centered(center: [f64; 2], size: [f64; 2]) -> Self {
        let half = [size[0] / 2.0, size[1] / 2.0];
        Self {
            min: [center[0] - half[0], center[1] - half[1]],
            max: [center[0] + half[0], center[1] + half[1]],
        }
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: [self.min[0].min(other.min[0]), self.min[1].min(other.min[1])],
            max: [self.max[0].max(other.max[0]), self.max[1].max(other.max[1])],
        }
    }

    /// Extent along each axis.
    pub fn size(&self) -> [f64; 2] {
        [self.max[0] - self.min[0], self.max[1] - self.min[1]]
    }

    /// Center in pixel space.
    pub fn center(&self) -> [f64; 2] {
        [
            (self.max[0] + self.min[0]) / 2.0,
            (self.max[1] + self.min[1]) / 2.0,
        ]
    }

    /// Whether every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.min.iter().chain(&self.max).all(|v| v.is_finite())
    }

    /// Canvas size for this box: each extent rounded up, plus `edge_padding`
    /// on both sides.
    ///
    /// Returned as `u64` so callers can range-check before allocating.
    pub fn canvas_size(&self, edge_padding: u32) -> (u64, u64) {
        let [w, h] = self.size();
        let pad = 2 * edge_padding as u64;
        (ceil_extent(w) + pad, ceil_extent(h) + pad)
    }
}

fn ceil_extent(extent: f64) -> u64 {
    (extent - EXTENT_EPSILON).ceil().max(0.0) as u64
}

/// Pixel-space box of one sprite.
pub fn instance_bounds(instance: &SpriteInstance, pixels_per_unit: f64) -> Bounds {
    let center = [
        instance.world_position[0] * pixels_per_unit,
        instance.world_position[1] * pixels_per_unit,
    ];
    let size = [
        instance.pixel_rect.width as f64,
        instance.pixel_rect.height as f64,
    ];
    Bounds::centered(center, size)
}

/// Union of every sprite's box. Returns `None` for an empty input.
pub fn compute_bounds<'a, I>(instances: I, pixels_per_unit: f64) -> Option<Bounds>
where
    I: IntoIterator<Item = &'a SpriteInstance>,
{
    instances
        .into_iter()
        .map(|instance| instance_bounds(instance, pixels_per_unit))
        .reduce(|acc, b| acc.union(&b))
}
