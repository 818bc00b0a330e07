//! Glint Renderer - CPU Whitted-style ray tracing
//!
//! A recursive ray tracer with hard shadows, Phong highlights, mirror
//! reflection and refraction, blended per material.

mod bucket;
mod camera;
mod floor;
mod hittable;
mod optics;
mod output;
mod renderer;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use floor::{Floor, FLOOR, FLOOR_MATERIAL};
pub use hittable::{scene_hit, HitRecord, Hittable, FAR_DISTANCE, MAX_VISIBLE_DISTANCE};
pub use optics::{reflect, refract, try_refract};
pub use output::{
    color_to_rgb, save_image, tone_map, write_ppm, OutputError, OutputResult,
};
pub use renderer::{
    cast_ray, render, render_parallel, render_pixel, ImageBuffer, RayStats, RenderConfig,
};

/// Re-export scene types from glint_core
pub use glint_core::{Color, Light, Material, NumericPolicy, Scene, Sphere};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Interval, Ray, Vec3, Vec4};
