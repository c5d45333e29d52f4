//! Hittable trait: the capability set every solid shape provides.

use rt_math::{Mat4, Ray, Vec3};

/// Trait for shapes that can be hit by rays.
///
/// The tracer and the scene resolver only ever use these four operations,
/// never the concrete shape.
pub trait Hittable: Send + Sync + std::fmt::Debug {
    /// Ray parameter of the entry intersection ahead of the ray origin
    /// (beyond [`EPSILON`](rt_math::EPSILON)), or `None` if the ray misses.
    fn intersect(&self, ray: &Ray) -> Option<f32>;

    /// Strict containment test. Shapes without an interior return `false`.
    fn contains(&self, point: Vec3) -> bool;

    /// Unit surface normal at `point`, oriented towards the side `ray_origin` is on.
    fn normal_at(&self, point: Vec3, ray_origin: Vec3) -> Vec3;

    /// Apply an affine 4x4 transform in place.
    fn transform(&mut self, matrix: &Mat4);
}
