//! Property-based tests for bounds and compositing.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p spritebake-combine --test proptest_combine
//! ```

use proptest::prelude::*;

use spritebake_combine::bounds::instance_bounds;
use spritebake_combine::memory::MemoryTextureStore;
use spritebake_combine::{compute_bounds, composite_sprites, PixelBuffer, SpriteInstance};
use spritebake_spec::{CombineSettings, Rgba8, SpriteRect};

fn instance(i: usize, x: f64, y: f64, w: u32, h: u32, layer: i32, order: i32) -> SpriteInstance {
    SpriteInstance {
        name: format!("sprite_{}", i),
        world_position: [x, y],
        pixel_rect: SpriteRect::full(w, h),
        texture: format!("tex_{}", i),
        flip_x: i % 2 == 1,
        flip_y: i % 3 == 2,
        sorting_layer: layer,
        sorting_order: order,
        enabled: true,
        has_animator: false,
        material: None,
        tint: [1.0; 4],
    }
}

/// Strategy for a small, non-empty set of sprites on a coarse grid.
fn sprites() -> impl Strategy<Value = Vec<SpriteInstance>> {
    prop::collection::vec(
        (-20i32..20, -20i32..20, 1u32..12, 1u32..12, -2i32..3, -2i32..3),
        1..6,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (x, y, w, h, layer, order))| {
                instance(i, x as f64 * 0.5, y as f64 * 0.5, w, h, layer, order)
            })
            .collect()
    })
}

fn store_for(instances: &[SpriteInstance]) -> MemoryTextureStore {
    let mut store = MemoryTextureStore::new();
    for (i, s) in instances.iter().enumerate() {
        let shade = (i * 40) as u8;
        store.insert(
            s.texture.clone(),
            PixelBuffer::new(
                s.pixel_rect.width,
                s.pixel_rect.height,
                Rgba8::opaque(shade, 255 - shade, 7),
            ),
        );
    }
    store
}

proptest! {
    /// The union contains every sprite's box.
    #[test]
    fn bounds_contain_every_sprite(instances in sprites(), ppu in 1u32..8) {
        let ppu = ppu as f64;
        let bounds = compute_bounds(&instances, ppu).unwrap();
        prop_assert!(bounds.min[0] <= bounds.max[0]);
        prop_assert!(bounds.min[1] <= bounds.max[1]);

        for s in &instances {
            let b = instance_bounds(s, ppu);
            prop_assert!(bounds.min[0] <= b.min[0] && b.max[0] <= bounds.max[0]);
            prop_assert!(bounds.min[1] <= b.min[1] && b.max[1] <= bounds.max[1]);
        }
    }

    /// The canvas always covers the bounds plus padding on both sides.
    #[test]
    fn canvas_covers_bounds(instances in sprites(), padding in 0u32..4) {
        let bounds = compute_bounds(&instances, 2.0).unwrap();
        let (w, h) = bounds.canvas_size(padding);
        let size = bounds.size();
        prop_assert!(w as f64 + 1e-6 >= size[0] + 2.0 * padding as f64);
        prop_assert!(h as f64 + 1e-6 >= size[1] + 2.0 * padding as f64);
        prop_assert!((w as f64) < size[0] + 2.0 * padding as f64 + 1.0);
    }

    /// Compositing the same input twice gives identical canvases, and every
    /// texture ends up with the settings it started with.
    #[test]
    fn compositing_is_deterministic(instances in sprites(), padding in 0u32..3) {
        let settings = CombineSettings {
            pixels_per_unit: 2.0,
            edge_padding: padding,
            ..CombineSettings::default()
        };
        let bounds = compute_bounds(&instances, settings.pixels_per_unit).unwrap();

        let mut store_a = store_for(&instances);
        let mut store_b = store_for(&instances);
        let a = composite_sprites(&instances, &bounds, &settings, &mut store_a).unwrap();
        let b = composite_sprites(&instances, &bounds, &settings, &mut store_b).unwrap();

        prop_assert_eq!(&a.canvas.pixels, &b.canvas.pixels);
        prop_assert_eq!(a.clipped_pixels, b.clipped_pixels);
        for s in &instances {
            prop_assert_eq!(store_a.restore_count(&s.texture), 1);
        }
    }
}
