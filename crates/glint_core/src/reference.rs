//! The built-in demo scene: five spheres lit by three point lights.

use glint_math::{Vec3, Vec4};

use crate::scene::{Color, Light, Material, Scene, Sphere};

/// Matte green with a soft highlight.
pub const GREEN_MATTE: Material =
    Material::new(1.0, Vec4::new(0.6, 0.3, 0.1, 0.0), Color::new(0.1, 0.4, 0.1), 50.0);

/// Darker, shinier green.
pub const GREEN_GLOSS: Material =
    Material::new(1.0, Vec4::new(0.8, 0.5, 0.2, 0.0), Color::new(0.0, 0.3, 0.0), 10.0);

/// Dense glass, mostly refraction.
pub const GLASS: Material =
    Material::new(2.0, Vec4::new(0.0, 0.5, 0.1, 0.8), Color::new(0.6, 0.7, 0.8), 125.0);

/// Plain red plastic.
pub const RED: Material =
    Material::new(1.0, Vec4::new(0.9, 0.1, 0.0, 0.0), Color::new(0.5, 0.0, 0.0), 10.0);

/// Mirror with a very hot, tight highlight.
pub const MIRROR: Material =
    Material::new(1.0, Vec4::new(0.0, 10.0, 0.8, 0.0), Color::new(1.0, 1.0, 1.0), 1425.0);

/// Build the reference scene.
///
/// Built from literals that are known to be valid, so it bypasses the
/// checked constructors.
pub fn reference_scene() -> Scene {
    let spheres = vec![
        sphere(Vec3::new(-7.0, 0.0, -20.0), 3.0, GREEN_MATTE),
        sphere(Vec3::new(1.0, -1.0, -10.0), 1.0, GREEN_GLOSS),
        sphere(Vec3::new(3.0, 3.0, -12.0), 2.0, GLASS),
        sphere(Vec3::new(1.5, -0.5, -18.0), 4.0, RED),
        sphere(Vec3::new(-4.0, 4.0, -14.0), 3.0, MIRROR),
    ];

    let lights = vec![
        light(Vec3::new(-20.0, 20.0, 20.0), 1.5),
        light(Vec3::new(30.0, 50.0, -25.0), 1.8),
        light(Vec3::new(30.0, 20.0, 30.0), 1.7),
    ];

    Scene { spheres, lights }
}

fn sphere(center: Vec3, radius: f32, material: Material) -> Sphere {
    Sphere {
        center,
        radius,
        material,
    }
}

fn light(position: Vec3, intensity: f32) -> Light {
    Light {
        position,
        intensity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scene_counts() {
        let scene = reference_scene();
        assert_eq!(scene.sphere_count(), 5);
        assert_eq!(scene.light_count(), 3);
    }

    #[test]
    fn test_reference_scene_is_valid() {
        // Every literal must pass the same checks as user-built scenes
        let scene = reference_scene();
        for s in &scene.spheres {
            assert!(Sphere::new(s.center, s.radius, s.material).is_ok());
        }
        for l in &scene.lights {
            assert!(Light::new(l.position, l.intensity).is_ok());
        }
    }

    #[test]
    fn test_reference_materials() {
        assert_eq!(GLASS.refractive_index, 2.0);
        assert_eq!(MIRROR.specular_weight(), 10.0);
        assert_eq!(RED.diffuse, Color::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_matches_bundled_scene_file() {
        let desc = crate::load_scene_from_str(include_str!("../../../scenes/reference.json")).unwrap();
        let scene = reference_scene();
        assert_eq!(desc.scene.spheres, scene.spheres);
        assert_eq!(desc.scene.lights, scene.lights);
    }
}
