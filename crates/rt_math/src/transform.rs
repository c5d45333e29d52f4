// Transform utilities for Mat4
//
// Extends glam::Mat4 with the homogeneous point / direction / normal transforms
// used when solids are placed into the world at load time.

use glam::{Mat3, Mat4, Vec3, Vec4};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a position in homogeneous coordinates (w=1), dividing by the
    /// resulting w. Affine matrices leave w at 1.
    fn transform_position(&self, position: Vec3) -> Vec3;

    /// Transform a direction (applies rotation and scale, but NOT translation).
    /// Directions have an implicit w=0 component.
    fn transform_direction(&self, direction: Vec3) -> Vec3;

    /// Transform a surface normal with the inverse-transpose of the linear part
    /// and renormalize, so normals stay unit length and perpendicular to the
    /// transformed surface under non-uniform scale.
    fn transform_normal(&self, normal: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn transform_position(&self, position: Vec3) -> Vec3 {
        let p4 = *self * position.extend(1.0);
        if p4.w != 0.0 && p4.w != 1.0 {
            p4.truncate() / p4.w
        } else {
            p4.truncate()
        }
    }

    fn transform_direction(&self, direction: Vec3) -> Vec3 {
        let v4 = *self * Vec4::new(direction.x, direction.y, direction.z, 0.0);
        v4.truncate()
    }

    fn transform_normal(&self, normal: Vec3) -> Vec3 {
        let linear = Mat3::from_mat4(*self);
        let normal_matrix = if linear.determinant().abs() > f32::EPSILON {
            linear.inverse().transpose()
        } else {
            linear
        };
        (normal_matrix * normal).normalize_or_zero()
    }
}

/// Build a placement matrix: translate first, then rotate about X, Y and Z
/// (angles in degrees).
pub fn translate_then_rotate(translate: Vec3, rotate_degrees: Vec3) -> Mat4 {
    Mat4::from_rotation_z(rotate_degrees.z.to_radians())
        * Mat4::from_rotation_y(rotate_degrees.y.to_radians())
        * Mat4::from_rotation_x(rotate_degrees.x.to_radians())
        * Mat4::from_translation(translate)
}
