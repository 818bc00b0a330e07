//! The fixed floor tile under the scene.
//!
//! An axis-aligned patch of the plane `y = -4`, always present and not
//! part of [`glint_core::Scene`]. It is shaded with one flat tint.

use crate::hittable::{HitRecord, Hittable};
use crate::{Color, Material};
use glint_math::{Interval, Ray, Vec3, Vec4};

/// Floor material: default optics with a dim gray diffuse color.
pub const FLOOR_MATERIAL: Material = Material::new(
    1.0,
    Vec4::new(1.0, 0.0, 0.0, 0.0),
    Color::new(0.4 * 0.3, 0.4 * 0.3, 0.4 * 0.3),
    0.0,
);

/// Rays this close to parallel with the floor never hit it.
const PARALLEL_EPSILON: f32 = 1e-3;

/// A bounded horizontal plane.
#[derive(Debug, Clone, Copy)]
pub struct Floor {
    /// Height of the plane
    pub y: f32,
    /// Hits require |x| < half_width
    pub half_width: f32,
    /// Hits require z_far < z < z_near
    pub z_near: f32,
    pub z_far: f32,
    pub material: Material,
}

/// The floor every scene is rendered with.
pub static FLOOR: Floor = Floor {
    y: -4.0,
    half_width: 10.0,
    z_near: -10.0,
    z_far: -30.0,
    material: FLOOR_MATERIAL,
};

impl Floor {
    fn in_bounds(&self, p: Vec3) -> bool {
        p.x.abs() < self.half_width && p.z < self.z_near && p.z > self.z_far
    }
}

impl Hittable for Floor {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let dir = ray.direction();
        if dir.y.abs() <= PARALLEL_EPSILON {
            return None;
        }

        let t = (self.y - ray.origin().y) / dir.y;
        let point = ray.at(t);
        if !ray_t.surrounds(t) || !self.in_bounds(point) {
            return None;
        }

        Some(HitRecord {
            t,
            point,
            normal: Vec3::Y,
            material: &self.material,
        })
    }
}
