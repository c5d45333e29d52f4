//! Infinite plane primitive.

use crate::hittable::Hittable;
use rt_math::{Mat4, Mat4Ext, Ray, Vec3, EPSILON};

/// An infinite plane through `point` with unit `normal`.
///
/// Planes have no interior; they are hit from both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Create a new plane. The normal is normalized here.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
        }
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let denominator = ray.direction().dot(self.normal);
        if denominator.abs() <= EPSILON {
            return None;
        }
        let t = (self.point - ray.origin()).dot(self.normal) / denominator;
        (t > EPSILON).then_some(t)
    }

    fn contains(&self, _point: Vec3) -> bool {
        false
    }

    fn normal_at(&self, _point: Vec3, ray_origin: Vec3) -> Vec3 {
        if (ray_origin - self.point).dot(self.normal) >= 0.0 {
            self.normal
        } else {
            -self.normal
        }
    }

    fn transform(&mut self, matrix: &Mat4) {
        self.point = matrix.transform_position(self.point);
        self.normal = matrix.transform_normal(self.normal);
    }
}
