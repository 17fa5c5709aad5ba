//! Sprite compositing.
//!
//! Every sprite's pixels are copied into one canvas at the sprite's offset
//! from the bounding box. Overlap is resolved per pixel: a pixel already
//! drawn is only replaced by a sprite with a strictly greater
//! `(sorting_layer, sorting_order)`, so among equal keys the first sprite
//! collected wins. Transparent source pixels are never drawn.

use spritebake_spec::{CombineSettings, PlacementMetadata, Rgba8, MAX_CANVAS_DIMENSION};

use crate::bounds::Bounds;
use crate::buffer::PixelBuffer;
use crate::collect::SpriteInstance;
use crate::error::CombineError;
use crate::texture::{ReadableScope, TextureAccessError, TextureStore};

/// Two-level draw-order key. Compares by layer, then order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    pub layer: i32,
    pub order: i32,
}

impl SortKey {
    /// Key of a sprite.
    pub fn of(instance: &SpriteInstance) -> Self {
        Self {
            layer: instance.sorting_layer,
            order: instance.sorting_order,
        }
    }
}

/// Which sort key owns each drawn canvas pixel.
///
/// Cells hold a 1-based index into `keys`, 0 for a pixel no sprite has
/// drawn, so the record costs 4 bytes per canvas pixel.
#[derive(Debug, Clone)]
pub struct OcclusionRecord {
    width: u32,
    keys: Vec<SortKey>,
    cells: Vec<u32>,
}

impl OcclusionRecord {
    /// Empty record for a `width` x `height` canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            keys: Vec::new(),
            cells: vec![0; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Key of the sprite that last drew this pixel.
    pub fn get(&self, x: u32, y: u32) -> Option<SortKey> {
        match self.cells[self.index(x, y)] {
            0 => None,
            owner => self.keys.get(owner as usize - 1).copied(),
        }
    }

    /// Whether a sprite with `incoming` may draw this pixel.
    #[inline]
    pub fn permits(&self, x: u32, y: u32, incoming: SortKey) -> bool {
        match self.get(x, y) {
            None => true,
            Some(existing) => incoming > existing,
        }
    }

    /// Record `key` as the owner of this pixel.
    #[inline]
    pub fn record(&mut self, x: u32, y: u32, key: SortKey) {
        // Sprites are drawn one at a time, so only the newest key can repeat.
        if self.keys.last() != Some(&key) {
            self.keys.push(key);
        }
        let owner = self.keys.len() as u32;
        let idx = self.index(x, y);
        self.cells[idx] = owner;
    }
}

/// The combined texture being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCanvas {
    /// Canvas pixels, bottom row first.
    pub pixels: PixelBuffer,
    /// Color the canvas was filled with.
    pub fill_color: Rgba8,
}

impl OutputCanvas {
    /// Canvas filled with `fill_color`.
    pub fn new(width: u32, height: u32, fill_color: Rgba8) -> Self {
        Self {
            pixels: PixelBuffer::new(width, height, fill_color),
            fill_color,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width
    }

    pub fn height(&self) -> u32 {
        self.pixels.height
    }
}

/// Result of compositing.
#[derive(Debug, Clone)]
pub struct Composition {
    pub canvas: OutputCanvas,
    pub placement: PlacementMetadata,
    /// Pixel-space bounds the canvas was sized from.
    pub bounds: Bounds,
    /// Number of sprites drawn.
    pub sprite_count: usize,
    /// Destination pixels that fell outside the canvas.
    pub clipped_pixels: u64,
}

/// First destination coordinate along one axis.
///
/// Unflipped sprites start at their low edge; flipped sprites start at their
/// high edge minus half a pixel and step backwards. Rounds half away from
/// zero.
fn destination_start(curr: f64, size: u32, flipped: bool) -> i64 {
    let half = size as f64 / 2.0;
    if flipped {
        (curr + half - 0.5).round() as i64
    } else {
        (curr - half).round() as i64
    }
}

/// Composite `instances`, in order, into a canvas sized from `bounds`.
///
/// Textures are made readable one sprite at a time through
/// [`ReadableScope`]. On any failure the partially drawn canvas is dropped
/// and every import setting changed so far has already been restored.
pub fn composite_sprites<S: TextureStore + ?Sized>(
    instances: &[SpriteInstance],
    bounds: &Bounds,
    settings: &CombineSettings,
    store: &mut S,
) -> Result<Composition, CombineError> {
    let first = instances.first().ok_or(CombineError::NoSpritesFound)?;

    if !bounds.is_finite() {
        return Err(CombineError::InvalidConfiguration(format!(
            "sprite bounds are not finite: min {:?}, max {:?}",
            bounds.min, bounds.max
        )));
    }

    let (width, height) = bounds.canvas_size(settings.edge_padding);
    if width == 0 || height == 0 {
        return Err(CombineError::InvalidConfiguration(format!(
            "combined texture would be {}x{}; sprites have no area and edge_padding is 0",
            width, height
        )));
    }
    let max = MAX_CANVAS_DIMENSION as u64;
    if width > max || height > max {
        return Err(CombineError::InvalidConfiguration(format!(
            "combined texture would be {}x{}, max is {}x{}",
            width, height, max, max
        )));
    }
    let (width, height) = (width as u32, height as u32);

    tracing::debug!(
        "Compositing {} sprites into {}x{} canvas",
        instances.len(),
        width,
        height
    );

    let mut canvas = OutputCanvas::new(width, height, settings.fill_color);
    let mut occlusion =
        (!settings.ignore_sorting_layers).then(|| OcclusionRecord::new(width, height));

    let ppu = settings.pixels_per_unit;
    let padding = settings.edge_padding as f64;
    let mut clipped_pixels = 0;

    for instance in instances {
        let curr = [
            instance.world_position[0] * ppu - bounds.min[0] + padding,
            instance.world_position[1] * ppu - bounds.min[1] + padding,
        ];

        let unreadable = |source: TextureAccessError| CombineError::SourceUnreadable {
            instance: instance.name.clone(),
            texture: instance.texture.clone(),
            source,
        };

        let scope = ReadableScope::acquire(store, &instance.texture).map_err(unreadable)?;
        let source = scope.pixels().map_err(unreadable)?;
        check_rect(instance, source).map_err(unreadable)?;

        let clipped = draw_sprite(&mut canvas, occlusion.as_mut(), instance, source, curr);
        if clipped > 0 {
            tracing::debug!(
                "Sprite '{}' has {} pixels outside the canvas",
                instance.name,
                clipped
            );
        }
        clipped_pixels += clipped;
    }

    let center = bounds.center();
    let placement = PlacementMetadata {
        center_world_position: [center[0] / ppu, center[1] / ppu],
        sorting_layer: first.sorting_layer,
        sorting_order: first.sorting_order,
        material: first.material.clone(),
        tint: first.tint,
    };

    Ok(Composition {
        canvas,
        placement,
        bounds: *bounds,
        sprite_count: instances.len(),
        clipped_pixels,
    })
}

fn check_rect(instance: &SpriteInstance, source: &PixelBuffer) -> Result<(), TextureAccessError> {
    let rect = instance.pixel_rect;
    let fits_x = rect.x as u64 + rect.width as u64 <= source.width as u64;
    let fits_y = rect.y as u64 + rect.height as u64 <= source.height as u64;
    if fits_x && fits_y {
        return Ok(());
    }
    Err(TextureAccessError::RectOutOfBounds {
        texture: instance.texture.clone(),
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        texture_width: source.width,
        texture_height: source.height,
    })
}

/// Draw one sprite anchored at `curr`. Returns the number of clipped pixels.
fn draw_sprite(
    canvas: &mut OutputCanvas,
    mut occlusion: Option<&mut OcclusionRecord>,
    instance: &SpriteInstance,
    source: &PixelBuffer,
    curr: [f64; 2],
) -> u64 {
    let rect = instance.pixel_rect;
    let key = SortKey::of(instance);

    let start_x = destination_start(curr[0], rect.width, instance.flip_x);
    let start_y = destination_start(curr[1], rect.height, instance.flip_y);
    let step_x: i64 = if instance.flip_x { -1 } else { 1 };
    let step_y: i64 = if instance.flip_y { -1 } else { 1 };

    let mut clipped = 0;
    for sx in 0..rect.width {
        let dx = start_x + sx as i64 * step_x;
        for sy in 0..rect.height {
            let dy = start_y + sy as i64 * step_y;
            if !canvas.pixels.contains(dx, dy) {
                clipped += 1;
                continue;
            }
            let (dx, dy) = (dx as u32, dy as u32);

            if let Some(record) = occlusion.as_deref() {
                if !record.permits(dx, dy, key) {
                    continue;
                }
            }

            let color = source.get(rect.x + sx, rect.y + sy);
            if color.is_transparent() {
                continue;
            }

            canvas.pixels.set(dx, dy, color);
            if let Some(record) = occlusion.as_deref_mut() {
                record.record(dx, dy, key);
            }
        }
    }
    clipped
}
