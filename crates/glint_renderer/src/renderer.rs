//! Core Whitted ray tracer.
//!
//! Implements recursive ray tracing with:
//! - Hard shadows from point lights
//! - Lambert diffuse and Phong specular terms
//! - Mirror reflection and refraction up to a fixed bounce depth
//! - Per-material weighting of the four transport channels

use std::time::Instant;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::hittable::{scene_hit, HitRecord};
use crate::optics::{reflect, refract, try_refract};
use crate::{Camera, Color};
use glint_core::{NumericPolicy, RenderOverrides, Scene, MAX_BOUNCE_LIMIT};
use glint_math::{Ray, Vec3};
use rayon::prelude::*;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Deepest bounce that is still shaded; deeper rays see the background
    pub max_bounce: u32,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Treatment of NaN-prone lighting and refraction terms
    pub numeric_policy: NumericPolicy,
    /// Bucket edge length for parallel rendering
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_bounce: 3,
            background: Color::splat(0.9),
            numeric_policy: NumericPolicy::Faithful,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Apply the non-resolution overrides from a scene description.
    ///
    /// `max_bounce` is capped at [`MAX_BOUNCE_LIMIT`].
    pub fn apply(&mut self, overrides: &RenderOverrides) {
        if let Some(max_bounce) = overrides.max_bounce {
            if max_bounce > MAX_BOUNCE_LIMIT {
                log::warn!(
                    "max_bounce {} capped to {}",
                    max_bounce,
                    MAX_BOUNCE_LIMIT
                );
            }
            self.max_bounce = max_bounce.min(MAX_BOUNCE_LIMIT);
        }
        if let Some(background) = overrides.background {
            self.background = Color::from_array(background);
        }
        if let Some(policy) = overrides.numeric_policy {
            self.numeric_policy = policy;
        }
    }
}

/// Counters collected while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RayStats {
    /// Calls to [`cast_ray`], including ones that return the background
    pub rays_cast: u64,
    /// Shadow rays tested against the scene
    pub shadow_rays: u64,
    /// Deepest bounce any [`cast_ray`] call was entered with
    pub deepest_bounce: u32,
}

impl RayStats {
    #[inline]
    fn record_ray(&mut self, bounce: u32) {
        self.rays_cast += 1;
        self.deepest_bounce = self.deepest_bounce.max(bounce);
    }

    /// Fold another set of counters into this one.
    pub fn merge(&mut self, other: &RayStats) {
        self.rays_cast += other.rays_cast;
        self.shadow_rays += other.shadow_rays;
        self.deepest_bounce = self.deepest_bounce.max(other.deepest_bounce);
    }
}

/// Compute the color seen by a ray.
///
/// Every hit spawns one reflected and one refracted ray regardless of the
/// material weights, then adds direct light from every unshadowed light.
pub fn cast_ray(
    scene: &Scene,
    ray: &Ray,
    bounce: u32,
    config: &RenderConfig,
    stats: &mut RayStats,
) -> Color {
    stats.record_ray(bounce);

    if bounce > config.max_bounce {
        return config.background;
    }
    let Some(rec) = scene_hit(scene, ray) else {
        return config.background;
    };

    let dir = ray.direction();
    let point = rec.point;
    let normal = rec.normal;
    let material = rec.material;

    // Reflected ray starts exactly on the surface
    let reflect_dir = reflect(dir, normal).normalize();
    let reflect_color = cast_ray(scene, &Ray::new(point, reflect_dir), bounce + 1, config, stats);

    let refract_dir = refracted_direction(dir, normal, material.refractive_index, config.numeric_policy)
        .normalize();
    let refract_orig = refraction_origin(point, normal, refract_dir);
    let refract_color = cast_ray(scene, &Ray::new(refract_orig, refract_dir), bounce + 1, config, stats);

    let (diffuse, specular) = direct_light(scene, &rec, dir, config.numeric_policy, stats);

    material.diffuse * diffuse * material.diffuse_weight()
        + Color::ONE * specular * material.specular_weight()
        + reflect_color * material.reflect_weight()
        + refract_color * material.refract_weight()
}

/// Start point for a refracted ray.
///
/// A ray going against the normal starts one normal length below the
/// surface; any other ray (including NaN) starts on the surface.
fn refraction_origin(point: Vec3, normal: Vec3, refract_dir: Vec3) -> Vec3 {
    if refract_dir.dot(normal) < 0.0 {
        point - normal
    } else {
        point
    }
}

fn refracted_direction(dir: Vec3, normal: Vec3, eta_t: f32, policy: NumericPolicy) -> Vec3 {
    match policy {
        NumericPolicy::Faithful => refract(dir, normal, eta_t, 1.0),
        NumericPolicy::Clamped => {
            try_refract(dir, normal, eta_t, 1.0).unwrap_or_else(|| reflect(dir, normal))
        }
    }
}

/// Sum diffuse and specular intensity over all lights visible from `rec`.
///
/// Any hit along the shadow ray blocks the light, even one past the light.
fn direct_light(
    scene: &Scene,
    rec: &HitRecord<'_>,
    view_dir: Vec3,
    policy: NumericPolicy,
    stats: &mut RayStats,
) -> (f32, f32) {
    let mut diffuse = 0.0;
    let mut specular = 0.0;

    for light in &scene.lights {
        let light_dir = (light.position - rec.point).normalize();
        let shadow_orig = if light_dir.dot(rec.normal) < 0.0 {
            rec.point
        } else {
            rec.point + rec.normal
        };

        stats.shadow_rays += 1;
        if scene_hit(scene, &Ray::new(shadow_orig, light_dir)).is_some() {
            continue;
        }

        let mut lambert = rec.normal.dot(light_dir);
        let mut highlight = reflect(light_dir, rec.normal).dot(view_dir);
        if policy == NumericPolicy::Clamped {
            lambert = lambert.max(0.0);
            highlight = highlight.max(0.0);
        }

        diffuse += lambert * light.intensity;
        specular += highlight.powf(rec.material.specular_exponent) * light.intensity;
    }

    (diffuse, specular)
}

/// Render a single pixel.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    stats: &mut RayStats,
) -> Color {
    let ray = camera.get_ray(x, y);
    cast_ray(scene, &ray, 0, config, stats)
}

/// Linear-color frame buffer, row-major from the top-left pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let b = &result.bucket;
        for (row, chunk) in result.pixels.chunks(b.width as usize).enumerate() {
            let start = self.index(b.x, b.y + row as u32);
            self.pixels[start..start + chunk.len()].copy_from_slice(chunk);
        }
    }

    /// Number of pixels with a NaN channel.
    pub fn nan_count(&self) -> usize {
        self.pixels.iter().filter(|c| c.is_nan()).count()
    }
}

/// Render the entire scene to an image buffer on the calling thread.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    let mut stats = RayStats::default();

    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, scene, x, y, config, &mut stats);
            image.set(x, y, color);
        }
    }

    log_finished(&image, &stats, start);
    image
}

/// Render the scene in parallel buckets.
///
/// Produces the same pixels as [`render`].
pub fn render_parallel(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let buckets = generate_buckets(camera.image_width, camera.image_height, config.bucket_size);
    log::debug!(
        "Rendering {} buckets of up to {}px on {} threads",
        buckets.len(),
        config.bucket_size,
        rayon::current_num_threads()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, scene, config))
        .collect();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    let mut stats = RayStats::default();
    for result in &results {
        image.write_bucket(result);
        stats.merge(&result.stats);
    }

    log_finished(&image, &stats, start);
    image
}

fn log_finished(image: &ImageBuffer, stats: &RayStats, start: Instant) {
    log::info!(
        "Rendered {}x{} in {:?}: {} rays, {} shadow rays, deepest bounce {}",
        image.width,
        image.height,
        start.elapsed(),
        stats.rays_cast,
        stats.shadow_rays,
        stats.deepest_bounce
    );
    let nan_pixels = image.nan_count();
    if nan_pixels > 0 {
        log::warn!("{} pixels contain NaN", nan_pixels);
    }
}
