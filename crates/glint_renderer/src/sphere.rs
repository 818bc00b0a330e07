//! Ray/sphere intersection.

use crate::hittable::{HitRecord, Hittable};
use glint_core::Sphere;
use glint_math::{Interval, Ray};

/// Distance along `ray` to the sphere surface, if any.
///
/// Projects the center onto the ray and rejects spheres whose center lies
/// behind the origin. An origin outside the sphere takes the near root, an
/// origin inside takes the far root; the other root is never tried.
/// `ray.direction` must be unit length.
pub(crate) fn intersect(sphere: &Sphere, ray: &Ray) -> Option<f32> {
    let to_center = sphere.center - ray.origin();
    let t_closest = to_center.dot(ray.direction());
    if t_closest < 0.0 {
        return None;
    }

    let radius2 = sphere.radius * sphere.radius;
    let dist2 = to_center.length_squared();
    let perp2 = dist2 - t_closest * t_closest;
    if radius2 < perp2 {
        return None;
    }

    let half_chord = (radius2 - perp2).sqrt();
    let t = if dist2.sqrt() > sphere.radius {
        t_closest - half_chord
    } else {
        t_closest + half_chord
    };

    // NaN compares false here, so degenerate directions miss
    (t > 0.0).then_some(t)
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let t = intersect(self, ray)?;
        if !ray_t.surrounds(t) {
            return None;
        }

        let point = ray.at(t);
        Some(HitRecord {
            t,
            point,
            normal: (point - self.center).normalize(),
            material: &self.material,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Material};
    use glint_math::{Vec3, Vec4};

    fn unit_sphere_at(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, Material::new(1.0, Vec4::X, Color::ONE, 0.0)).unwrap()
    }

    #[test]
    fn test_sphere_hit_toward_center() {
        let center = Vec3::new(1.0, 2.0, -10.0);
        let sphere = unit_sphere_at(center, 2.0);
        let origin = Vec3::new(0.5, -1.0, 3.0);
        let ray = Ray::new(origin, (center - origin).normalize());

        let t = intersect(&sphere, &ray).unwrap();
        let expected = (origin - center).length() - 2.0;
        assert!((t - expected).abs() < 1e-4, "t={} expected={}", t, expected);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(intersect(&sphere, &ray).is_none());

        // Passing beside it
        let ray = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(intersect(&sphere, &ray).is_none());
    }

    #[test]
    fn test_sphere_behind_origin() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(intersect(&sphere, &ray).is_none());
    }

    #[test]
    fn test_origin_inside_takes_far_root() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 3.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let t = intersect(&sphere, &ray).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_origin_inside_past_center_is_rejected() {
        // Center is behind the origin even though the ray starts inside
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, 1.0), 3.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(intersect(&sphere, &ray).is_none());
    }

    #[test]
    fn test_tangent_ray() {
        let sphere = unit_sphere_at(Vec3::new(1.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let t = intersect(&sphere, &ray).unwrap();
        assert!((t - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_nan_direction_misses() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::splat(f32::NAN));
        assert!(intersect(&sphere, &ray).is_none());
    }

    #[test]
    fn test_hit_respects_interval() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let rec = sphere.hit(&ray, Interval::POSITIVE).unwrap();
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);

        assert!(sphere.hit(&ray, Interval::new(0.0, 3.0)).is_none());
    }
}
