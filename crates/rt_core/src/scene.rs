//! Scene aggregate: everything a render pass reads.
//!
//! A scene is built once (usually by [`load_scene`](crate::load_scene)) and
//! is read-only while rendering, so it can be shared across worker threads
//! without locking.

use std::path::PathBuf;

use rt_math::{Camera, Color};

use crate::light::Lights;
use crate::solid::SolidList;

/// Output image and sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageParameters {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Maximum number of reflection/refraction bounces
    pub recursion_depth: u32,

    /// Samples per pixel; only the largest square below it is used
    pub spp: u32,

    /// Whether jittered anti-aliasing is enabled
    pub anti_alias: bool,

    /// Color of rays that miss all geometry
    pub background_color: Color,
}

impl Default for ImageParameters {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            recursion_depth: 10,
            spp: 10,
            anti_alias: true,
            background_color: Color::ZERO,
        }
    }
}

impl ImageParameters {
    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Camera animation descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationInfo {
    /// Frames per second
    pub fps: u32,

    /// Total animation length in seconds
    pub length: f32,

    /// Optional keyframe script path
    pub camera_script: Option<PathBuf>,
}

impl AnimationInfo {
    /// Number of frames rendered: `fps * length`, rounded.
    pub fn frame_count(&self) -> usize {
        (self.fps as f32 * self.length).round().max(0.0) as usize
    }

    /// Time of frame `index` in seconds.
    pub fn frame_time(&self, index: usize) -> f32 {
        index as f32 / self.fps.max(1) as f32
    }
}

/// A complete scene: solids, camera, lights, image parameters and optional animation.
#[derive(Debug, Default)]
pub struct Scene {
    pub solids: SolidList,
    pub camera: Camera,
    pub lights: Lights,
    pub image: ImageParameters,
    pub animation: Option<AnimationInfo>,
}

impl Scene {
    /// Create an empty scene with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image parameters and match the camera aspect ratio to them.
    pub fn with_image(mut self, image: ImageParameters) -> Self {
        self.camera.set_aspect_ratio(image.aspect_ratio());
        self.image = image;
        self
    }
}
