use glam::Vec3;

use crate::Ray;

const DEFAULT_ASPECT_RATIO: f32 = 16.0 / 9.0;
/// Vertical field of view used when a scene does not set one.
pub const DEFAULT_FOV_DEGREES: f32 = 25.0;

/// Pinhole camera for primary ray generation.
///
/// `forward`, `up` and `right` are kept orthonormal: every setter touching
/// an orientation vector re-derives `right = forward x up` and renormalizes.
/// Degenerate orientations (zero or parallel vectors) are rejected and the
/// previous basis is kept. The tangent of `fov` is used directly as the half-height of the image
/// plane at unit distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,
    up: Vec3,
    right: Vec3,
    fov: f32,
    aspect_ratio: f32,
    half_width: f32,
    half_height: f32,
}

impl Camera {
    /// Create a new camera looking along `forward` with the default fov and aspect.
    pub fn new(position: Vec3, forward: Vec3, up: Vec3) -> Self {
        let (forward, right, up) = orthonormal_basis(forward, up)
            .unwrap_or_else(|| (Vec3::Z, Vec3::Z.cross(Vec3::Y), Vec3::Y));
        let mut camera = Self {
            position,
            forward,
            up,
            right,
            fov: 0.0,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            half_width: 0.0,
            half_height: 0.0,
        };
        camera.set_fov(DEFAULT_FOV_DEGREES.to_radians());
        camera
    }

    /// Set the aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.set_aspect_ratio(aspect_ratio);
        self
    }

    /// Set the field of view angle in radians.
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.set_fov(fov);
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set the view direction; re-derives the right vector.
    pub fn set_forward(&mut self, forward: Vec3) {
        self.orient(forward, self.up);
    }

    /// Set the up vector; re-derives the right vector.
    pub fn set_up(&mut self, up: Vec3) {
        self.orient(self.forward, up);
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
        self.half_height = fov.tan();
        self.half_width = self.half_height * self.aspect_ratio;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.half_width = self.half_height * aspect_ratio;
    }

    /// Place the camera at `position` looking at `target`.
    pub fn look_at(&mut self, position: Vec3, target: Vec3, up: Vec3) {
        self.position = position;
        self.orient(target - position, up);
    }

    /// Ray through normalized screen coordinates `x`, `y` (roughly [-1, 1]).
    ///
    /// Pure: nothing is recorded on the camera, so any number of threads can
    /// generate rays from one shared camera.
    #[inline]
    pub fn ray_through(&self, x: f32, y: f32) -> Ray {
        let direction = self.forward
            + x * self.half_width * self.right
            + y * self.half_height * self.up;
        Ray::new(self.position, direction.normalize())
    }

    fn orient(&mut self, forward: Vec3, up: Vec3) {
        match orthonormal_basis(forward, up) {
            Some((forward, right, up)) => {
                self.forward = forward;
                self.right = right;
                self.up = up;
            }
            None => log::warn!(
                "Ignoring degenerate camera orientation (forward {forward}, up {up})"
            ),
        }
    }
}

/// `(forward, right, up)` from a view direction and an approximate up vector,
/// or `None` when either is zero or they are parallel.
fn orthonormal_basis(forward: Vec3, up: Vec3) -> Option<(Vec3, Vec3, Vec3)> {
    let forward = forward.try_normalize()?;
    let right = forward.cross(up).try_normalize()?;
    Some((forward, right, right.cross(forward)))
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(camera: &Camera) {
        for v in [camera.forward(), camera.up(), camera.right()] {
            assert!((v.length() - 1.0).abs() < 0.0001);
        }
        assert!(camera.forward().dot(camera.up()).abs() < 0.0001);
        assert!(camera.forward().dot(camera.right()).abs() < 0.0001);
        assert!(camera.up().dot(camera.right()).abs() < 0.0001);
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 3.0), Vec3::Y);

        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, -5.0));
        assert!((camera.forward() - Vec3::Z).length() < 0.0001);
        assert!((camera.fov() - 25f32.to_radians()).abs() < 0.0001);
        assert_eq!(camera.aspect_ratio(), 16.0 / 9.0);
        assert_orthonormal(&camera);
    }

    #[test]
    fn test_right_is_forward_cross_up() {
        let camera = Camera::default();
        assert!((camera.right() - Vec3::Z.cross(Vec3::Y)).length() < 0.0001);
    }

    #[test]
    fn test_setters_keep_orthonormal_basis() {
        let mut camera = Camera::default();

        camera.set_forward(Vec3::new(1.0, 0.5, 2.0));
        assert_orthonormal(&camera);

        // Up that is not perpendicular to forward gets straightened
        camera.set_up(Vec3::new(0.3, 1.0, 0.0));
        assert_orthonormal(&camera);
        assert!(camera.up().y > 0.0);
    }

    #[test]
    fn test_center_ray_follows_forward() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, 4.0), Vec3::Y);
        let ray = camera.ray_through(0.0, 0.0);

        assert_eq!(ray.origin, Vec3::new(1.0, 2.0, 3.0));
        assert!((ray.direction - Vec3::Z).length() < 0.0001);
    }

    #[test]
    fn test_corner_ray_uses_tan_fov() {
        let camera = Camera::default()
            .with_fov(45f32.to_radians())
            .with_aspect_ratio(2.0);
        let ray = camera.ray_through(1.0, 1.0);

        // forward + 2 * right + 1 * up, normalized
        let expected = (Vec3::Z + 2.0 * camera.right() + camera.up()).normalize();
        assert!((ray.direction - expected).length() < 0.0001);
        assert!((ray.direction.length() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_look_at() {
        let mut camera = Camera::default();
        camera.look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);

        assert!((camera.forward() - Vec3::new(0.0, 0.0, -1.0)).length() < 0.0001);
        assert_orthonormal(&camera);
    }

    #[test]
    fn test_degenerate_look_at_keeps_previous_basis() {
        let mut camera = Camera::default();
        camera.look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        let before = camera;

        // Target on top of the eye
        camera.look_at(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert_eq!(camera.position(), Vec3::ONE);
        assert_eq!(camera.forward(), before.forward());
        assert_eq!(camera.up(), before.up());
        assert_eq!(camera.right(), before.right());

        // Up parallel to the view direction
        camera.look_at(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert_eq!(camera.forward(), before.forward());

        camera.set_up(Vec3::ZERO);
        camera.set_forward(Vec3::X);
        assert!((camera.forward() - Vec3::X).length() < 0.0001);
        assert_orthonormal(&camera);
        assert!(camera.ray_through(0.3, -0.7).direction.is_finite());
    }

    #[test]
    fn test_degenerate_new_uses_default_basis() {
        let camera = Camera::new(Vec3::ONE, Vec3::ZERO, Vec3::Y);
        assert_eq!(camera.forward(), Vec3::Z);
        assert_orthonormal(&camera);
        assert!(camera.ray_through(0.0, 0.0).direction.is_finite());
    }
}
