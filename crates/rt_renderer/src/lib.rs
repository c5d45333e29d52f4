//! Recursive ray tracer.
//!
//! Whitted-style tracing over an `rt_core::Scene`: direct lighting with
//! binary shadows, recursive reflection and refraction with depth-dependent
//! attenuation, jittered anti-aliasing, and Catmull-Rom camera paths for
//! animation. Frames are rendered in parallel rows and written as PFM
//! (float) or PNG (preview).

pub mod animation;
pub mod lighting;
mod output;
mod renderer;
pub mod sampler;
pub mod script;
mod tracer;

pub use animation::{CameraPath, CameraPose, KeyFrame};
pub use output::{OutputError, OutputResult};
pub use renderer::{
    color_to_rgba, linear_to_gamma, render_animation, ImageBuffer, RenderStats, Renderer,
    DEFAULT_SEED,
};
pub use sampler::Sampler;
pub use script::{parse_keyframe_script, read_keyframe_script, ScriptError, ScriptResult};
pub use tracer::{TraceStats, Tracer};

/// Re-export the scene model and math types
pub use rt_core::{load_scene, Material, Scene};
pub use rt_math::{Camera, Color, Vec3};
