//! Sphere primitive.

use crate::hittable::Hittable;
use rt_math::{Mat4, Mat4Ext, Ray, Vec3, EPSILON};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Outward unit normal at a surface point.
    fn outward_normal(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize_or_zero()
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        if a == 0.0 {
            return None;
        }
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root ahead of the origin; the far root covers rays starting inside
        let near = (h - sqrtd) / a;
        if near > EPSILON {
            return Some(near);
        }
        let far = (h + sqrtd) / a;
        if far > EPSILON {
            return Some(far);
        }
        None
    }

    fn contains(&self, point: Vec3) -> bool {
        point.distance(self.center) < self.radius - EPSILON
    }

    fn normal_at(&self, point: Vec3, ray_origin: Vec3) -> Vec3 {
        let normal = self.outward_normal(point);
        if self.contains(ray_origin) {
            -normal
        } else {
            normal
        }
    }

    fn transform(&mut self, matrix: &Mat4) {
        self.center = matrix.transform_position(self.center);
    }
}
