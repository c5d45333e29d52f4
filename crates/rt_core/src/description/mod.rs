//! JSON scene descriptions.

mod loader;
mod types;

pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use types::{SceneDocument, ShapeNode};
