//! Vector helpers shared by the shading and tracing code.

use crate::Vec3;

/// Mirror `vector` about the plane perpendicular to `normal`.
///
/// `normal` must be unit length.
#[inline]
pub fn reflect(vector: Vec3, normal: Vec3) -> Vec3 {
    vector - 2.0 * vector.dot(normal) * normal
}

/// Unit vector pointing from `from` towards `to`.
#[inline]
pub fn direction_between(from: Vec3, to: Vec3) -> Vec3 {
    (to - from).normalize_or_zero()
}

/// Refract `direction` through a surface separating a medium with index
/// `index_from` (where the ray comes from) and one with index `index_to`.
///
/// The normal may face either side; it is oriented against `direction`
/// before use. Returns `None` on total internal reflection: when leaving a
/// denser medium at an incidence angle at or beyond `asin(index_to / index_from)`.
pub fn refract(index_from: f32, index_to: f32, normal: Vec3, direction: Vec3) -> Option<Vec3> {
    let d = direction.normalize_or_zero();
    let mut n = normal.normalize_or_zero();
    let mut cos_i = -n.dot(d);
    if cos_i < 0.0 {
        n = -n;
        cos_i = -cos_i;
    }
    let cos_i = cos_i.min(1.0);

    if index_from > index_to {
        let critical_angle = (index_to / index_from).asin();
        let incidence_angle = cos_i.acos();
        if incidence_angle >= critical_angle {
            return None;
        }
    }

    let eta = index_from / index_to;
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(eta * d + (eta * cos_i - k.sqrt()) * n)
}
