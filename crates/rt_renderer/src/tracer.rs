//! Recursive Whitted-style ray tracer.
//!
//! Each call resolves the nearest hit, evaluates direct lighting there and,
//! while recursion depth remains, follows one reflected and (for transparent
//! solids) one refracted ray. Secondary contributions are attenuated by
//! `coefficient ^ (max_depth - depth + 1)`, so deeper bounces fade faster
//! than a fixed per-bounce factor would make them.
//!
//! The tracer only reads the scene; it is safe to share across threads.

use rt_core::{Scene, SolidList};
use rt_math::{reflect, refract, Color, Ray, Vec3, EPSILON};

use crate::lighting::direct_color;

/// Counters gathered while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Every ray handed to the tracer, primary rays included
    pub rays: u64,
    /// Reflected and refracted rays spawned by recursion
    pub recursive_calls: u64,
}

impl TraceStats {
    /// Combine two sets of counters.
    pub fn merge(self, other: TraceStats) -> TraceStats {
        TraceStats {
            rays: self.rays + other.rays,
            recursive_calls: self.recursive_calls + other.recursive_calls,
        }
    }
}

/// Ray tracer over an immutable scene.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    max_depth: u32,
}

impl<'a> Tracer<'a> {
    /// Create a tracer using the scene's configured recursion depth.
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            max_depth: scene.image.recursion_depth,
        }
    }

    /// Override the maximum recursion depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Color seen along `ray`.
    pub fn trace(&self, ray: &Ray) -> Color {
        let mut stats = TraceStats::default();
        self.trace_with_stats(ray, &mut stats)
    }

    /// Color seen along `ray`, counting traced rays into `stats`.
    pub fn trace_with_stats(&self, ray: &Ray, stats: &mut TraceStats) -> Color {
        stats.rays += 1;
        self.trace_depth(ray, self.max_depth, stats)
    }

    fn trace_depth(&self, ray: &Ray, depth: u32, stats: &mut TraceStats) -> Color {
        let solids = &self.scene.solids;
        let Some(hit) = solids.closest_intersection(ray) else {
            return self.scene.image.background_color;
        };
        let solid = hit.solid;
        let point = ray.position_after(hit.t);

        let mut color = direct_color(self.scene, solid, point, ray);
        if depth == 0 {
            return color;
        }

        let level = (self.max_depth as i64 - depth as i64 + 1) as i32;
        let normal = solid.normal_at(point, ray.origin());

        let reflected = Ray::new(point, reflect(ray.direction(), normal));
        color += solid.material.reflection.powi(level) * self.recurse(&reflected, depth, stats);

        let far_point = ray.position_after(hit.t + EPSILON);
        let index_from = refraction_index_at(solids, ray.origin());
        let index_to = refraction_index_at(solids, far_point);
        if let Some(direction) = refract(index_from, index_to, normal, ray.direction()) {
            if solid.material.transparency > 0.0 {
                let refracted = Ray::new(far_point, direction);
                color += solid.material.transparency.powi(level)
                    * self.recurse(&refracted, depth, stats);
            }
        }

        color
    }

    fn recurse(&self, ray: &Ray, depth: u32, stats: &mut TraceStats) -> Color {
        stats.rays += 1;
        stats.recursive_calls += 1;
        self.trace_depth(ray, depth - 1, stats)
    }
}

/// Refraction index of the medium at `point` (vacuum when outside every solid).
fn refraction_index_at(solids: &SolidList, point: Vec3) -> f32 {
    solids
        .solid_containing(point)
        .map_or(1.0, |solid| solid.material.refraction_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rt_core::{ImageParameters, LightSource, Material, Plane, Solid, Sphere};

    fn sphere_scene(material: Material, depth: u32) -> Scene {
        let mut scene = Scene::new().with_image(ImageParameters {
            recursion_depth: depth,
            background_color: Color::new(0.1, 0.2, 0.3),
            ..Default::default()
        });
        scene.solids.add(Solid::new(
            Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0),
            Color::new(1.0, 0.5, 0.0),
            material,
        ));
        scene
    }

    /// Two parallel glass-and-mirror walls facing each other so every ray
    /// reflects and refracts until the depth runs out.
    fn mirror_box(depth: u32) -> Scene {
        let mut scene = Scene::new().with_image(ImageParameters {
            recursion_depth: depth,
            ..Default::default()
        });
        let material = Material::new(0.1, 0.5, 0.1, 20.0).with_transparency(0.5, 1.0);
        scene.solids.add(Solid::new(
            Plane::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z),
            Color::ONE,
            material,
        ));
        scene.solids.add(Solid::new(
            Plane::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z),
            Color::ONE,
            material,
        ));
        scene
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = sphere_scene(Material::default(), 5);
        let tracer = Tracer::new(&scene);

        let away = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert_eq!(tracer.trace(&away), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_pure_ambient_sphere() {
        let material = Material::new(1.0, 0.0, 0.3, 10.0);
        let scene = sphere_scene(material, 0);
        let tracer = Tracer::new(&scene);

        let color = tracer.trace(&Ray::new(Vec3::ZERO, Vec3::Z));
        let expected = Color::new(1.0, 0.5, 0.0) * 0.3 * 0.5;
        assert!((color - expected).length() < 1e-6);
    }

    #[test]
    fn test_depth_zero_ignores_reflection_and_transparency() {
        let material = Material::new(0.2, 0.9, 0.3, 10.0).with_transparency(0.9, 1.5);
        let mut scene = sphere_scene(material, 0);
        scene.solids.add(Solid::new(
            Plane::new(Vec3::new(0.0, -2.0, 0.0), Vec3::Y),
            Color::ONE,
            Material::default(),
        ));
        let tracer = Tracer::new(&scene);

        let mut stats = TraceStats::default();
        let color = tracer.trace_with_stats(&Ray::new(Vec3::ZERO, Vec3::Z), &mut stats);

        let expected = Color::new(1.0, 0.5, 0.0) * 0.3 * 0.5;
        assert!((color - expected).length() < 1e-6);
        assert_eq!(stats.recursive_calls, 0);
        assert_eq!(stats.rays, 1);
    }

    #[test]
    fn test_reflection_adds_light_at_positive_depth() {
        let material = Material::new(0.0, 0.5, 0.0, 10.0);
        let mut scene = sphere_scene(material, 1);
        scene.image.background_color = Color::ONE;
        let tracer = Tracer::new(&scene);

        // Reflected ray leaves the sphere back towards -Z and sees the background
        let color = tracer.trace(&Ray::new(Vec3::ZERO, Vec3::Z));
        assert!((color - Color::splat(0.5)).length() < 1e-5);
    }

    #[test]
    fn test_recursion_is_bounded() {
        for depth in 0..6u32 {
            let scene = mirror_box(depth);
            let tracer = Tracer::new(&scene);
            let mut stats = TraceStats::default();
            tracer.trace_with_stats(&Ray::new(Vec3::ZERO, Vec3::Z), &mut stats);

            let bound = (1u64 << (depth + 1)) - 1;
            assert!(
                stats.recursive_calls <= bound,
                "depth {depth}: {} calls exceeds {bound}",
                stats.recursive_calls
            );
            assert_eq!(stats.rays, stats.recursive_calls + 1);
            if depth == 0 {
                assert_eq!(stats.recursive_calls, 0);
            } else {
                assert!(stats.recursive_calls > 0);
            }
        }
    }

    #[test]
    fn test_attenuation_grows_with_depth() {
        // A ray bouncing between two mirrors collects reflection^1, ^2, ^3 ...
        let mut scene = Scene::new().with_image(ImageParameters {
            recursion_depth: 2,
            background_color: Color::ZERO,
            ..Default::default()
        });
        let mirror = Material::new(0.0, 0.5, 1.0, 10.0);
        scene.lights.set_ambient(1.0);
        scene.solids.add(Solid::new(
            Plane::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z),
            Color::ONE,
            mirror,
        ));
        scene.solids.add(Solid::new(
            Plane::new(Vec3::new(0.0, 0.0, -1.0), Vec3::Z),
            Color::ONE,
            mirror,
        ));
        let tracer = Tracer::new(&scene);

        let color = tracer.trace(&Ray::new(Vec3::ZERO, Vec3::Z));
        // ambient 1 at each hit; depth 2 -> 1 + 0.5 * (1 + 0.25 * 1)
        let expected = 1.0 + 0.5 * (1.0 + 0.25);
        assert!((color.x - expected).abs() < 1e-5, "got {}", color.x);
    }

    #[test]
    fn test_shadowed_light_contributes_nothing() {
        let material = Material::new(1.0, 0.0, 0.0, 10.0);
        let mut scene = sphere_scene(material, 0);
        // Light hidden behind the sphere
        scene
            .lights
            .add(LightSource::new(Vec3::new(0.0, 0.0, 10.0), Color::ONE, 5.0));
        let tracer = Tracer::new(&scene);

        let color = tracer.trace(&Ray::new(Vec3::ZERO, Vec3::Z));
        assert_eq!(color, Color::ZERO);
    }
}
