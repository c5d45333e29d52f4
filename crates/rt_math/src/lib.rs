// Re-export glam for convenience
pub use glam::*;

// Ray tracing math types
mod camera;
mod interval;
mod ray;
mod transform;
mod vector;

pub use camera::{Camera, DEFAULT_FOV_DEGREES};
pub use interval::Interval;
pub use ray::Ray;
pub use transform::{translate_then_rotate, Mat4Ext};
pub use vector::{direction_between, reflect, refract};

/// A point in world space.
pub type Position = Vec3;

/// Linear RGB color (HDR, components are not clamped).
pub type Color = Vec3;

/// Universal tolerance for self-intersection rejection and near-zero denominators.
pub const EPSILON: f32 = 1.0e-5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_color_is_componentwise() {
        let surface: Color = Vec3::new(0.5, 1.0, 0.25);
        let light: Color = Vec3::new(1.0, 0.5, 2.0);
        assert_eq!(surface * light, Vec3::new(0.5, 0.5, 0.5));
    }
}
