//! Surface material coefficients.

use serde::Deserialize;

/// How a solid interacts with light.
///
/// All coefficients are independent. By convention diffuse, reflection,
/// ambient and transparency sit in [0, 1] (diffuse + reflection + ambient
/// roughly summing to 1), the reflection size (specular exponent) in
/// [5, 500] and the refraction index is at least 1. None of this is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Diffuse coefficient
    pub diffuse: f32,

    /// Reflection coefficient, scales both specular highlights and mirrored rays
    pub reflection: f32,

    /// Ambient coefficient
    pub ambient: f32,

    /// Specular exponent (higher = tighter highlight)
    pub reflection_size: f32,

    /// Transparency coefficient, scales refracted rays
    pub transparency: f32,

    /// Refraction index of the solid's interior (1 = vacuum)
    pub refraction_index: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: 0.4,
            reflection: 0.55,
            ambient: 0.05,
            reflection_size: 155.0,
            transparency: 0.0,
            refraction_index: 1.0,
        }
    }
}

impl Material {
    /// Create a material from its diffuse, reflection, ambient and specular
    /// exponent coefficients; opaque with a vacuum refraction index.
    pub fn new(diffuse: f32, reflection: f32, ambient: f32, reflection_size: f32) -> Self {
        Self {
            diffuse,
            reflection,
            ambient,
            reflection_size,
            transparency: 0.0,
            refraction_index: 1.0,
        }
    }

    /// Set transparency and refraction index.
    pub fn with_transparency(mut self, transparency: f32, refraction_index: f32) -> Self {
        self.transparency = transparency;
        self.refraction_index = refraction_index;
        self
    }

    /// Check if refracted rays should be traced through this material.
    pub fn is_transparent(&self) -> bool {
        self.transparency > 0.0
    }
}
