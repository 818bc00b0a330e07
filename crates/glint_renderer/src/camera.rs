//! Pinhole camera for primary ray generation.

use glint_math::{Ray, Vec3};

/// Fixed pinhole camera looking down -Z.
///
/// The image plane sits `focal_length` pixels in front of the origin, so
/// the focal length doubles as the field of view control.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,
    origin: Vec3,
    focal_length: f32,
}

impl Camera {
    /// Create a camera with the reference settings (1024x768, f = 700).
    pub fn new() -> Self {
        Self {
            image_width: 1024,
            image_height: 768,
            origin: Vec3::Z,
            focal_length: 700.0,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the camera position.
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// Set the distance from the origin to the image plane, in pixels.
    pub fn with_focal_length(mut self, focal_length: f32) -> Self {
        self.focal_length = focal_length;
        self
    }

    /// Camera position.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Generate the primary ray through pixel (i, j).
    ///
    /// Pixel (0, 0) is the top-left corner; no sub-pixel jitter.
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        let dir_x = i as f32 - self.image_width as f32 / 2.0;
        let dir_y = self.image_height as f32 / 2.0 - j as f32;
        let dir_z = -self.focal_length;

        Ray::new(self.origin, Vec3::new(dir_x, dir_y, dir_z).normalize())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
