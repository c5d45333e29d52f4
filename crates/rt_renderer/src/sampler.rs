//! Stratified (jittered) anti-aliasing.
//!
//! A pixel is split into a k×k grid with `k = floor(sqrt(spp))` and one
//! uniformly random point is drawn strictly inside each cell. Sample counts
//! that are not perfect squares round down: spp 15 gives 9 and 17 gives 16.

use rand::distributions::Open01;
use rand::Rng;
use rt_core::ImageParameters;
use rt_math::Color;

/// Sub-pixel sample generator for one image size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    grid: u32,
    pixel_width: f32,
    pixel_height: f32,
}

impl Sampler {
    /// Create a sampler for `spp` samples per pixel on a `width`×`height`
    /// image spanning screen coordinates [-1, 1] in both axes.
    pub fn new(spp: u32, width: u32, height: u32) -> Self {
        let grid = ((spp as f64).sqrt().floor() as u32).max(1);
        Self {
            grid,
            pixel_width: 2.0 / width.max(1) as f32,
            pixel_height: 2.0 / height.max(1) as f32,
        }
    }

    pub fn from_image(image: &ImageParameters) -> Self {
        Self::new(image.spp, image.width, image.height)
    }

    /// Samples drawn per pixel (`k²`).
    pub fn sample_count(&self) -> u32 {
        self.grid * self.grid
    }

    /// Jittered sample positions for the pixel centered at (`x`, `y`), one per
    /// grid cell, row by row.
    pub fn jittered_points<R: Rng + ?Sized>(
        &self,
        x: f32,
        y: f32,
        rng: &mut R,
    ) -> Vec<(f32, f32)> {
        let cell_width = self.pixel_width / self.grid as f32;
        let cell_height = self.pixel_height / self.grid as f32;
        let left = x - self.pixel_width / 2.0;
        let bottom = y - self.pixel_height / 2.0;

        let mut points = Vec::with_capacity(self.sample_count() as usize);
        for j in 0..self.grid {
            for i in 0..self.grid {
                let u: f32 = rng.sample(Open01);
                let v: f32 = rng.sample(Open01);
                points.push((
                    left + (i as f32 + u) * cell_width,
                    bottom + (j as f32 + v) * cell_height,
                ));
            }
        }
        points
    }

    /// Average of `trace` over every jittered sample of the pixel.
    pub fn sample_pixel<R, F>(&self, x: f32, y: f32, rng: &mut R, mut trace: F) -> Color
    where
        R: Rng + ?Sized,
        F: FnMut(f32, f32) -> Color,
    {
        let total = self
            .jittered_points(x, y, rng)
            .into_iter()
            .fold(Color::ZERO, |sum, (sx, sy)| sum + trace(sx, sy));
        total / self.sample_count() as f32
    }
}
