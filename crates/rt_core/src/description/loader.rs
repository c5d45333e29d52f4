//! Build a [`Scene`] from a JSON scene document.
//!
//! The shape hierarchy is flattened here: each node's transform is composed
//! with its ancestors' (`world = parent * local`), color and material are
//! inherited from the nearest ancestor that sets them, and every sphere or
//! plane becomes one world-space [`Solid`].

use std::fs;
use std::path::Path;

use rt_math::{translate_then_rotate, Camera, Color, Mat4, Vec3, DEFAULT_FOV_DEGREES};
use thiserror::Error;

use super::types::{CameraDesc, SceneDocument, ShapeNode, Vec3Desc};
use crate::light::LightSource;
use crate::material::Material;
use crate::plane::Plane;
use crate::scene::{AnimationInfo, ImageParameters, Scene};
use crate::solid::{Solid, SolidList};
use crate::sphere::Sphere;

/// Errors raised while loading a scene document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scene has no camera")]
    MissingCamera,

    #[error("Shape '{node}' has no {property} and no ancestor provides one")]
    MissingProperty { node: String, property: &'static str },

    #[error("Invalid {property}: {reason}")]
    InvalidProperty { property: String, reason: String },
}

pub type LoadResult<T> = Result<T, LoadError>;

fn invalid(property: impl Into<String>, reason: impl Into<String>) -> LoadError {
    LoadError::InvalidProperty {
        property: property.into(),
        reason: reason.into(),
    }
}

/// Load a scene from a JSON file.
///
/// A relative `camera_script` path is resolved against the scene file's
/// directory.
pub fn load_scene(path: impl AsRef<Path>) -> LoadResult<Scene> {
    let path = path.as_ref();
    log::info!("Loading scene {}", path.display());

    let json = fs::read_to_string(path)?;
    let document: SceneDocument = serde_json::from_str(&json)?;
    build_scene(document, path.parent())
}

/// Load a scene from a JSON string. Relative script paths are left untouched.
pub fn load_scene_from_str(json: &str) -> LoadResult<Scene> {
    let document: SceneDocument = serde_json::from_str(json)?;
    build_scene(document, None)
}

fn build_scene(document: SceneDocument, base_dir: Option<&Path>) -> LoadResult<Scene> {
    let image = ImageParameters {
        width: document.image.width,
        height: document.image.height,
        recursion_depth: document.image.recursion_depth,
        spp: document.image.spp,
        anti_alias: document.image.anti_alias,
        background_color: Color::from_array(document.image.background_color),
    };
    if image.width == 0 || image.height == 0 {
        return Err(invalid(
            "image size",
            format!("{}x{} has a zero dimension", image.width, image.height),
        ));
    }

    let camera_desc = document.camera.as_ref().ok_or(LoadError::MissingCamera)?;
    let camera = build_camera(camera_desc)?.with_aspect_ratio(image.aspect_ratio());

    let mut solids = SolidList::new();
    for (index, node) in document.shapes.iter().enumerate() {
        flatten(
            node,
            &format!("shapes[{index}]"),
            Mat4::IDENTITY,
            None,
            None,
            &mut solids,
        )?;
    }

    let mut scene = Scene::new().with_image(image);
    scene.camera = camera;
    scene.solids = solids;

    if let Some(ambient) = &document.lights.ambient {
        scene.lights.set_ambient(ambient.intensity);
    }
    for light in &document.lights.sources {
        scene.lights.add(LightSource::new(
            Vec3::from_array(light.position),
            Color::from_array(light.color),
            light.intensity,
        ));
    }

    if let Some(animation) = document.animation {
        if animation.fps == 0 {
            return Err(invalid("animation fps", "must be positive"));
        }
        if !(animation.length > 0.0) {
            return Err(invalid(
                "animation length",
                format!("{} is not positive", animation.length),
            ));
        }
        let camera_script = animation.camera_script.map(|script| match base_dir {
            Some(dir) if script.is_relative() => dir.join(script),
            _ => script,
        });
        scene.animation = Some(AnimationInfo {
            fps: animation.fps,
            length: animation.length,
            camera_script,
        });
    }

    log::info!(
        "Scene loaded: {} solids, {} lights, {}x{}",
        scene.solids.len(),
        scene.lights.len(),
        scene.image.width,
        scene.image.height
    );
    if let Some(animation) = &scene.animation {
        log::info!(
            "Animation: {} frames at {} fps",
            animation.frame_count(),
            animation.fps
        );
    }

    Ok(scene)
}

fn nonzero(property: &str, value: Vec3Desc) -> LoadResult<Vec3> {
    let vector = Vec3::from_array(value);
    if vector.length_squared() <= f32::EPSILON {
        return Err(invalid(property, "vector has zero length"));
    }
    Ok(vector)
}

fn build_camera(desc: &CameraDesc) -> LoadResult<Camera> {
    let forward = nonzero("camera view_vector", desc.view_vector)?;
    let up = nonzero("camera up_vector", desc.up_vector)?;
    if forward.normalize().cross(up.normalize()).length_squared() <= f32::EPSILON {
        return Err(invalid(
            "camera up_vector",
            "parallel to the view vector",
        ));
    }

    let fov = desc.fov.unwrap_or(DEFAULT_FOV_DEGREES);
    if !(fov > 0.0 && fov < 90.0) {
        return Err(invalid("camera fov", format!("{fov} is outside (0, 90)")));
    }

    Ok(Camera::new(Vec3::from_array(desc.position), forward, up).with_fov(fov.to_radians()))
}

fn flatten(
    node: &ShapeNode,
    path: &str,
    parent: Mat4,
    inherited_color: Option<Color>,
    inherited_material: Option<Material>,
    solids: &mut SolidList,
) -> LoadResult<()> {
    let label = node.name.as_deref().unwrap_or(path);

    let local = node
        .transform
        .as_ref()
        .map(|t| translate_then_rotate(Vec3::from_array(t.translate), Vec3::from_array(t.rotate)))
        .unwrap_or(Mat4::IDENTITY);
    let world = parent * local;

    let color = node.color.map(Color::from_array).or(inherited_color);
    let material = node.material.or(inherited_material);

    let mut emit = |mut solid: Solid| {
        solid.transform(&world);
        solids.add(solid);
    };

    if let Some(sphere) = &node.sphere {
        if sphere.radius < 0.0 {
            return Err(invalid(
                format!("{label} radius"),
                format!("{} is negative", sphere.radius),
            ));
        }
        let (color, material) = surface(label, color, material)?;
        emit(Solid::new(
            Sphere::new(Vec3::from_array(sphere.position), sphere.radius),
            color,
            material,
        ));
    }

    if let Some(plane) = &node.plane {
        let normal = nonzero(&format!("{label} normal"), plane.normal)?;
        let (color, material) = surface(label, color, material)?;
        emit(Solid::new(
            Plane::new(Vec3::from_array(plane.position), normal),
            color,
            material,
        ));
    }

    for (index, child) in node.children.iter().enumerate() {
        flatten(
            child,
            &format!("{path}.children[{index}]"),
            world,
            color,
            material,
            solids,
        )?;
    }

    Ok(())
}

fn surface(
    label: &str,
    color: Option<Color>,
    material: Option<Material>,
) -> LoadResult<(Color, Material)> {
    let color = color.ok_or_else(|| LoadError::MissingProperty {
        node: label.to_string(),
        property: "color",
    })?;
    let material = material.ok_or_else(|| LoadError::MissingProperty {
        node: label.to_string(),
        property: "material",
    })?;
    Ok((color, material))
}
