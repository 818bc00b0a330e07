//! Scene types for Glint.
//!
//! A scene is an ordered list of spheres and an ordered list of point
//! lights. Everything here is immutable once built; the renderer only
//! ever borrows a `Scene`.

use glint_math::{Vec3, Vec4};
use thiserror::Error;

/// Color type alias (linear RGB, usually 0-1 but unbounded).
pub type Color = Vec3;

/// Errors raised while constructing scene elements.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Light intensity must be positive and finite, got {0}")]
    InvalidIntensity(f32),

    #[error("Invalid material: {0}")]
    InvalidMaterial(String),
}

/// Result type for scene construction.
pub type SceneResult<T> = Result<T, SceneError>;

/// Optical properties of a surface.
///
/// The four `brightness` weights scale the transport channels
/// `[diffuse, specular, reflect, refract]`. They need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Index of refraction of the medium inside the surface (1.0 = air)
    pub refractive_index: f32,

    /// Channel weights: diffuse, specular, reflect, refract
    pub brightness: Vec4,

    /// Base color used by the diffuse channel
    pub diffuse: Color,

    /// Phong exponent, larger is a tighter highlight
    pub specular_exponent: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            refractive_index: 1.0,
            brightness: Vec4::new(1.0, 0.0, 0.0, 0.0),
            diffuse: Color::ZERO,
            specular_exponent: 0.0,
        }
    }
}

impl Material {
    /// Create a new material.
    pub const fn new(
        refractive_index: f32,
        brightness: Vec4,
        diffuse: Color,
        specular_exponent: f32,
    ) -> Self {
        Self {
            refractive_index,
            brightness,
            diffuse,
            specular_exponent,
        }
    }

    /// Check that the material parameters are usable by the renderer.
    pub fn validate(&self) -> SceneResult<()> {
        if !(self.refractive_index.is_finite() && self.refractive_index > 0.0) {
            return Err(SceneError::InvalidMaterial(format!(
                "refractive index {} must be positive",
                self.refractive_index
            )));
        }
        if !self.brightness.is_finite() || self.brightness.min_element() < 0.0 {
            return Err(SceneError::InvalidMaterial(format!(
                "brightness weights {:?} must be non-negative",
                self.brightness.to_array()
            )));
        }
        if !(self.specular_exponent.is_finite() && self.specular_exponent >= 0.0) {
            return Err(SceneError::InvalidMaterial(format!(
                "specular exponent {} must be non-negative",
                self.specular_exponent
            )));
        }
        Ok(())
    }

    /// Weight of the diffuse channel.
    #[inline]
    pub fn diffuse_weight(&self) -> f32 {
        self.brightness.x
    }

    /// Weight of the specular highlight channel.
    #[inline]
    pub fn specular_weight(&self) -> f32 {
        self.brightness.y
    }

    /// Weight of the mirror reflection channel.
    #[inline]
    pub fn reflect_weight(&self) -> f32 {
        self.brightness.z
    }

    /// Weight of the refraction channel.
    #[inline]
    pub fn refract_weight(&self) -> f32 {
        self.brightness.w
    }
}

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Fails for a non-positive radius or an invalid material.
    pub fn new(center: Vec3, radius: f32, material: Material) -> SceneResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SceneError::InvalidRadius(radius));
        }
        material.validate()?;

        Ok(Self {
            center,
            radius,
            material,
        })
    }
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: f32,
}

impl Light {
    /// Create a new point light. Intensity must be positive.
    pub fn new(position: Vec3, intensity: f32) -> SceneResult<Self> {
        if !(intensity.is_finite() && intensity > 0.0) {
            return Err(SceneError::InvalidIntensity(intensity));
        }
        Ok(Self {
            position,
            intensity,
        })
    }
}

/// The renderable scene: spheres and point lights, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sphere to the scene.
    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Builder-style variant of [`Scene::add_sphere`].
    pub fn with_sphere(mut self, sphere: Sphere) -> Self {
        self.add_sphere(sphere);
        self
    }

    /// Builder-style variant of [`Scene::add_light`].
    pub fn with_light(mut self, light: Light) -> Self {
        self.add_light(light);
        self
    }

    /// Number of spheres.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Number of lights.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
