//! Screen tiles for the parallel render path.
//!
//! Each tile is traced by one rayon task and copied back into the
//! [`ImageBuffer`](crate::ImageBuffer) afterwards, so tiles never share
//! pixels.

use crate::renderer::{render_pixel, RayStats};
use crate::{Camera, Color, RenderConfig};
use glint_core::Scene;

/// Pixel rectangle `[x, x + width) x [y, y + height)` traced as one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub x: u32,
    pub y: u32,
    /// Shorter than the bucket size along the right edge
    pub width: u32,
    /// Shorter than the bucket size along the bottom edge
    pub height: u32,
    /// Position in the center-out schedule
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Edge length used when [`RenderConfig::bucket_size`] is not overridden.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Tile a `width` x `height` frame, nearest-to-center tiles first.
///
/// Tiles cover every pixel exactly once. `index` follows the returned order.
/// A bucket size of zero is treated as one.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(size as usize)
        .flat_map(|y| {
            (0..width).step_by(size as usize).map(move |x| {
                Bucket::new(x, y, size.min(width - x), size.min(height - y), 0)
            })
        })
        .collect();

    sort_center_out(&mut buckets, width, height);
    for (index, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = index;
    }

    buckets
}

/// Order tiles by squared distance from their midpoint to the frame center.
/// The sort is stable, so equidistant tiles keep row-major order.
fn sort_center_out(buckets: &mut [Bucket], width: u32, height: u32) {
    let (cx, cy) = (width as f32 * 0.5, height as f32 * 0.5);
    let dist2 = |b: &Bucket| {
        let dx = b.x as f32 + b.width as f32 * 0.5 - cx;
        let dy = b.y as f32 + b.height as f32 * 0.5 - cy;
        dx * dx + dy * dy
    };

    buckets.sort_by(|a, b| dist2(a).total_cmp(&dist2(b)));
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
    /// Ray counters for this bucket alone
    pub stats: RayStats,
}

/// Render a single bucket.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);
    let mut stats = RayStats::default();

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(camera, scene, global_x, global_y, config, &mut stats));
        }
    }

    log::debug!(
        "Bucket {} at ({}, {}) done: {} rays",
        bucket.index,
        bucket.x,
        bucket.y,
        stats.rays_cast
    );

    BucketResult {
        bucket: *bucket,
        pixels,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageBuffer;
    use glint_core::reference_scene;

    #[test]
    fn test_tiles_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_tiles_ragged_edges() {
        let buckets = generate_buckets(1024, 768, 100);
        assert_eq!(buckets.len(), 11 * 8);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 1024 * 768);

        let corner = buckets.iter().find(|b| b.x == 1000 && b.y == 700).unwrap();
        assert_eq!((corner.width, corner.height), (24, 68));

        for (i, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.index, i);
        }
    }

    #[test]
    fn test_center_tile_first() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9);

        let first = &buckets[0];
        assert_eq!(first.x, 64);
        assert_eq!(first.y, 64);
        assert_eq!(first.index, 0);
    }

    #[test]
    fn test_zero_bucket_size() {
        let buckets = generate_buckets(3, 2, 0);
        assert_eq!(buckets.len(), 6);
    }

    #[test]
    fn test_render_bucket_writes_only_its_pixels() {
        let scene = reference_scene();
        let camera = Camera::new().with_resolution(32, 24).with_focal_length(22.0);
        let config = RenderConfig::default();
        let bucket = Bucket::new(8, 4, 8, 6, 0);

        let result = render_bucket(&bucket, &camera, &scene, &config);
        assert_eq!(result.pixels.len(), 48);
        assert!(result.stats.rays_cast >= 48);

        let marker = Color::splat(-1.0);
        let mut image = ImageBuffer {
            width: 32,
            height: 24,
            pixels: vec![marker; 32 * 24],
        };
        image.write_bucket(&result);

        let mut stats = RayStats::default();
        for y in 0..24 {
            for x in 0..32 {
                let inside = (8..16).contains(&x) && (4..10).contains(&y);
                if inside {
                    let expected = render_pixel(&camera, &scene, x, y, &config, &mut stats);
                    assert_eq!(image.get(x, y).to_array().map(f32::to_bits),
                               expected.to_array().map(f32::to_bits));
                } else {
                    assert_eq!(image.get(x, y), marker);
                }
            }
        }
    }
}
