//! Direct illumination at a hit point.
//!
//! Local illumination only: an ambient term plus, per light source, a
//! diffuse and a specular term scaled by a binary shadow test with
//! inverse-distance falloff.

use rt_core::{AmbientLight, LightSource, Scene, Solid, SolidList};
use rt_math::{direction_between, reflect, Color, Position, Ray, EPSILON};

/// Ambient contribution of a solid: `color * ambient * intensity`.
#[inline]
pub fn ambient(solid: &Solid, light: AmbientLight) -> Color {
    solid.color * solid.material.ambient * light.intensity
}

/// Visibility of `light` from `point`.
///
/// Zero when any solid lies along the ray towards the light (whether in
/// front of or behind it), otherwise `1 / distance`.
pub fn shadow_factor(solids: &SolidList, point: Position, light: &LightSource) -> f32 {
    let towards_light = Ray::new(point, direction_between(point, light.position));
    if let Some(hit) = solids.closest_intersection(&towards_light) {
        if hit.t > EPSILON || hit.t < -EPSILON {
            return 0.0;
        }
    }
    1.0 / point.distance(light.position)
}

/// Diffuse and specular contribution of one light source.
pub fn shade(
    solids: &SolidList,
    solid: &Solid,
    light: &LightSource,
    point: Position,
    ray: &Ray,
) -> Color {
    let normal = solid.normal_at(point, ray.origin());
    let light_vector = direction_between(point, light.position);
    let material = &solid.material;

    let diffuse =
        solid.color * light.intensity * material.diffuse * normal.dot(light_vector).max(0.0);

    let reflect_vector = -reflect(light_vector, normal);
    let cos_beta = normal.dot(reflect_vector).max(0.0);
    let highlight = cos_beta.powf(material.reflection_size);
    let specular = light.color * light.intensity * material.reflection * highlight;

    (diffuse + specular) * shadow_factor(solids, point, light)
}

/// Total direct color at `point`: ambient plus every light source.
pub fn direct_color(scene: &Scene, solid: &Solid, point: Position, ray: &Ray) -> Color {
    let lights = &scene.lights;
    lights
        .sources()
        .map(|light| shade(&scene.solids, solid, light, point, ray))
        .fold(ambient(solid, lights.ambient()), |total, contribution| {
            total + contribution
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rt_core::{Material, Plane, Sphere};
    use rt_math::Vec3;

    fn matte_floor() -> Solid {
        Solid::new(
            Plane::new(Vec3::ZERO, Vec3::Y),
            Color::new(1.0, 0.5, 0.25),
            Material::new(0.8, 0.0, 0.2, 10.0),
        )
    }

    #[test]
    fn test_ambient_term() {
        let solid = matte_floor();
        let color = ambient(&solid, AmbientLight::new(0.5));
        assert!((color - Color::new(0.1, 0.05, 0.025)).length() < 1e-6);
    }

    #[test]
    fn test_unblocked_light_uses_inverse_distance() {
        let solids = SolidList::new();
        let light = LightSource::new(Vec3::new(0.0, 4.0, 0.0), Color::ONE, 1.0);
        assert!((shadow_factor(&solids, Vec3::ZERO, &light) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_blocked_light_is_shadowed() {
        let mut solids = SolidList::new();
        solids.add(Solid::new(
            Sphere::new(Vec3::new(0.0, 2.0, 0.0), 0.5),
            Color::ONE,
            Material::default(),
        ));
        let light = LightSource::new(Vec3::new(0.0, 4.0, 0.0), Color::ONE, 1.0);
        assert_eq!(shadow_factor(&solids, Vec3::ZERO, &light), 0.0);
    }

    #[test]
    fn test_diffuse_only_shading() {
        let floor = matte_floor();
        let solids = SolidList::new();
        let light = LightSource::new(Vec3::new(0.0, 2.0, 0.0), Color::ONE, 3.0);
        let ray = Ray::new(Vec3::new(0.0, 1.0, -1.0), Vec3::new(0.0, -1.0, 1.0));

        let color = shade(&solids, &floor, &light, Vec3::ZERO, &ray);
        // color * intensity * diffuse * cos(0) / distance
        let expected = Color::new(1.0, 0.5, 0.25) * 3.0 * 0.8 / 2.0;
        assert!((color - expected).length() < 1e-5);
    }

    #[test]
    fn test_light_below_surface_adds_nothing() {
        let floor = matte_floor();
        let solids = SolidList::new();
        let light = LightSource::new(Vec3::new(0.0, -2.0, 0.0), Color::ONE, 3.0);
        let ray = Ray::new(Vec3::new(0.0, 1.0, -1.0), Vec3::new(0.0, -1.0, 1.0));

        let color = shade(&solids, &floor, &light, Vec3::ZERO, &ray);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_direct_color_sums_lights() {
        let mut scene = Scene::new();
        scene.lights.set_ambient(1.0);
        scene
            .lights
            .add(LightSource::new(Vec3::new(0.0, 2.0, 0.0), Color::ONE, 1.0));
        scene
            .lights
            .add(LightSource::new(Vec3::new(0.0, 4.0, 0.0), Color::ONE, 1.0));

        let floor = matte_floor();
        let ray = Ray::new(Vec3::new(0.0, 1.0, -1.0), Vec3::new(0.0, -1.0, 1.0));
        let color = direct_color(&scene, &floor, Vec3::ZERO, &ray);

        let base = Color::new(1.0, 0.5, 0.25);
        let expected = base * 0.2 + base * 0.8 / 2.0 + base * 0.8 / 4.0;
        assert!((color - expected).length() < 1e-5);
    }
}
