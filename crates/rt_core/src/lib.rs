//! Scene model for the ray tracer.
//!
//! This crate provides:
//!
//! - **Solids**: `Sphere` and `Plane` shapes behind the `Hittable` trait,
//!   paired with a color and `Material`
//! - **Resolver**: `SolidList` answers closest-hit and containment queries
//! - **Lights and scene**: `Lights`, `ImageParameters`, `Scene`
//! - **Scene files**: JSON scene loading
//!
//! # Example
//!
//! ```ignore
//! use rt_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} solids, {} lights",
//!     scene.solids.len(),
//!     scene.lights.len());
//! ```

pub mod description;
pub mod hittable;
pub mod light;
pub mod material;
pub mod plane;
pub mod scene;
pub mod solid;
pub mod sphere;

// Re-export commonly used types
pub use description::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use hittable::Hittable;
pub use light::{AmbientLight, LightId, LightSource, Lights};
pub use material::Material;
pub use plane::Plane;
pub use scene::{AnimationInfo, ImageParameters, Scene};
pub use solid::{Hit, Solid, SolidId, SolidList};
pub use sphere::Sphere;
