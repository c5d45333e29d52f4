//! Serde types mirroring the JSON scene document.
//!
//! These types are a direct image of the file; validation, inheritance and
//! hierarchy flattening happen in the loader.

use std::path::PathBuf;

use serde::Deserialize;

use crate::material::Material;
use crate::scene::ImageParameters;

/// Three floats written as `[x, y, z]` (or `[r, g, b]`).
pub type Vec3Desc = [f32; 3];

/// Root of a scene document.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneDocument {
    #[serde(default)]
    pub image: ImageDesc,

    pub camera: Option<CameraDesc>,

    #[serde(default)]
    pub shapes: Vec<ShapeNode>,

    #[serde(default)]
    pub lights: LightsDesc,

    pub animation: Option<AnimationDesc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageDesc {
    pub width: u32,
    pub height: u32,
    pub recursion_depth: u32,
    pub spp: u32,
    pub anti_alias: bool,
    pub background_color: Vec3Desc,
}

impl Default for ImageDesc {
    fn default() -> Self {
        let defaults = ImageParameters::default();
        Self {
            width: defaults.width,
            height: defaults.height,
            recursion_depth: defaults.recursion_depth,
            spp: defaults.spp,
            anti_alias: defaults.anti_alias,
            background_color: defaults.background_color.to_array(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraDesc {
    pub position: Vec3Desc,

    pub view_vector: Vec3Desc,

    #[serde(default = "default_up")]
    pub up_vector: Vec3Desc,

    /// Field of view in degrees
    pub fov: Option<f32>,
}

fn default_up() -> Vec3Desc {
    [0.0, 1.0, 0.0]
}

/// One node of the shape hierarchy.
///
/// A node may carry geometry, a transform, color/material overrides that its
/// descendants inherit, and child nodes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShapeNode {
    pub name: Option<String>,

    pub transform: Option<TransformDesc>,

    pub sphere: Option<SphereDesc>,

    pub plane: Option<PlaneDesc>,

    pub color: Option<Vec3Desc>,

    pub material: Option<Material>,

    #[serde(default)]
    pub children: Vec<ShapeNode>,
}

/// Translation followed by rotations about X, Y and Z (degrees).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransformDesc {
    pub translate: Vec3Desc,
    pub rotate: Vec3Desc,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SphereDesc {
    #[serde(default)]
    pub position: Vec3Desc,
    pub radius: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaneDesc {
    #[serde(default)]
    pub position: Vec3Desc,
    pub normal: Vec3Desc,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LightsDesc {
    pub ambient: Option<AmbientDesc>,

    #[serde(default)]
    pub sources: Vec<LightDesc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AmbientDesc {
    pub intensity: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightDesc {
    pub position: Vec3Desc,

    #[serde(default = "default_light_color")]
    pub color: Vec3Desc,

    pub intensity: f32,
}

fn default_light_color() -> Vec3Desc {
    [1.0, 1.0, 1.0]
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimationDesc {
    pub fps: u32,

    /// Length in seconds
    pub length: f32,

    pub camera_script: Option<PathBuf>,
}
