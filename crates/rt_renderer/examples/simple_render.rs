//! Simple ray tracer example.
//!
//! Builds a small scene in code and saves it as PFM plus a PNG preview.

use rt_core::{ImageParameters, LightSource, Material, Plane, Scene, Solid, Sphere};
use rt_renderer::{Color, Renderer, Vec3};

fn main() -> Result<(), rt_renderer::OutputError> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let start = std::time::Instant::now();
    let scene = build_scene();
    log::info!("Scene built in {:?}", start.elapsed());

    let (image, stats) = Renderer::new(&scene).render_frame(&scene.camera, 0);
    log::info!(
        "{} pixels, {} rays in {:?}",
        stats.pixels,
        stats.trace.rays,
        stats.elapsed
    );

    image.save_pfm("simple_render.pfm")?;
    image.save_png("simple_render.png")?;
    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::new().with_image(ImageParameters {
        width: 640,
        height: 360,
        recursion_depth: 4,
        spp: 9,
        anti_alias: true,
        background_color: Color::new(0.05, 0.05, 0.1),
    });
    scene
        .camera
        .look_at(Vec3::new(0.0, 1.5, -6.0), Vec3::new(0.0, 0.5, 0.0), Vec3::Y);

    // Ground
    scene.solids.add(Solid::new(
        Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y),
        Color::new(0.6, 0.6, 0.6),
        Material::new(0.6, 0.3, 0.1, 50.0),
    ));

    // Matte, mirror and glass spheres
    scene.solids.add(Solid::new(
        Sphere::new(Vec3::new(-2.2, 0.0, 1.0), 1.0),
        Color::new(0.8, 0.2, 0.1),
        Material::new(0.85, 0.1, 0.05, 20.0),
    ));
    scene.solids.add(Solid::new(
        Sphere::new(Vec3::new(0.0, 0.0, 2.0), 1.0),
        Color::new(0.9, 0.9, 0.9),
        Material::new(0.1, 0.85, 0.05, 300.0),
    ));
    scene.solids.add(Solid::new(
        Sphere::new(Vec3::new(2.2, 0.0, 1.0), 1.0),
        Color::new(0.7, 0.9, 1.0),
        Material::new(0.2, 0.3, 0.05, 150.0).with_transparency(0.8, 1.5),
    ));

    scene.lights.set_ambient(0.3);
    scene.lights.add(LightSource::new(
        Vec3::new(-4.0, 6.0, -4.0),
        Color::ONE,
        8.0,
    ));
    scene.lights.add(LightSource::new(
        Vec3::new(5.0, 3.0, -2.0),
        Color::new(1.0, 0.9, 0.7),
        4.0,
    ));

    scene
}
