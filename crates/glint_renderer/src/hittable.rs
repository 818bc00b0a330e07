//! Hittable trait, HitRecord and nearest-hit search over a scene.

use crate::floor::FLOOR;
use crate::Material;
use glint_core::Scene;
use glint_math::{Interval, Ray, Vec3};

/// Distance used as "nothing hit yet" while scanning primitives.
pub const FAR_DISTANCE: f32 = 20_000.0;

/// Hits at or beyond this distance count as background.
pub const MAX_VISIBLE_DISTANCE: f32 = 1_000.0;

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal. Sphere normals point away from the center
    /// regardless of which side the ray came from.
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object at a distance strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// Find the nearest visible surface along `ray`.
///
/// Spheres are scanned in scene order, then the floor tile. Returns `None`
/// when nothing is hit closer than [`MAX_VISIBLE_DISTANCE`].
pub fn scene_hit<'a>(scene: &'a Scene, ray: &Ray) -> Option<HitRecord<'a>> {
    let mut closest: Option<HitRecord<'a>> = None;
    let mut closest_so_far = FAR_DISTANCE;

    let objects = scene
        .spheres
        .iter()
        .map(|s| s as &dyn Hittable)
        .chain(std::iter::once(&FLOOR as &dyn Hittable));

    for object in objects {
        if let Some(rec) = object.hit(ray, Interval::POSITIVE.with_max(closest_so_far)) {
            closest_so_far = rec.t;
            closest = Some(rec);
        }
    }

    closest.filter(|rec| rec.t < MAX_VISIBLE_DISTANCE)
}
