// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_dot_and_normalize() {
        let v = Vec3::new(3.0, 0.0, 4.0);
        assert_eq!(v.dot(v), 25.0);
        assert!((v.normalize().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_vec4_indexing() {
        // Material brightness weights are addressed by channel index
        let w = Vec4::new(0.6, 0.3, 0.1, 0.0);
        assert_eq!(w[0], 0.6);
        assert_eq!(w[3], 0.0);
    }
}
