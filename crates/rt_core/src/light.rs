//! Scene lighting: one global ambient term plus point light sources.

use rt_math::{Color, Position};

/// Scene-global, non-directional, unshadowed light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(intensity: f32) -> Self {
        Self { intensity }
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// A point light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub position: Position,
    pub color: Color,
    pub intensity: f32,
}

impl LightSource {
    pub fn new(position: Position, color: Color, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }
}

/// Handle returned when a light source is added to [`Lights`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightId(usize);

/// All lighting of a scene.
///
/// Light sources keep insertion order; each contributes independently.
#[derive(Debug, Clone, Default)]
pub struct Lights {
    ambient: AmbientLight,
    sources: Vec<(LightId, LightSource)>,
    next_id: usize,
}

impl Lights {
    /// Create lighting with the default ambient intensity and no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ambient light (the previous one is discarded, not merged).
    pub fn set_ambient(&mut self, intensity: f32) {
        self.ambient = AmbientLight::new(intensity);
    }

    pub fn ambient(&self) -> AmbientLight {
        self.ambient
    }

    /// Add a light source and return its handle.
    pub fn add(&mut self, light: LightSource) -> LightId {
        let id = LightId(self.next_id);
        self.next_id += 1;
        self.sources.push((id, light));
        id
    }

    /// Remove a light source by handle.
    pub fn remove(&mut self, id: LightId) -> Option<LightSource> {
        let index = self.sources.iter().position(|(entry, _)| *entry == id)?;
        Some(self.sources.remove(index).1)
    }

    /// Iterate over light sources in insertion order.
    pub fn sources(&self) -> impl Iterator<Item = &LightSource> {
        self.sources.iter().map(|(_, light)| light)
    }

    /// Get the number of light sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
