//! Frame rendering.
//!
//! Rows of the image are independent tasks fanned out over rayon's thread
//! pool. Each row owns its own random generator for anti-aliasing jitter,
//! seeded from the renderer seed, the frame index and the row, so output is
//! reproducible regardless of scheduling.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rt_core::Scene;
use rt_math::{Camera, Color};

use crate::animation::CameraPath;
use crate::sampler::Sampler;
use crate::tracer::{TraceStats, Tracer};

/// Default seed for anti-aliasing jitter.
pub const DEFAULT_SEED: u64 = 0x5eed_0f_a11a5;

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let channel = |value: f32| (255.0 * linear_to_gamma(value).clamp(0.0, 1.0)) as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

/// Screen coordinate of a pixel column: +1 at column 0, falling to the right.
#[inline]
pub fn screen_x(col: u32, width: u32) -> f32 {
    -2.0 * col as f32 / width as f32 + 1.0
}

/// Screen coordinate of a pixel row: +1 at row 0, falling downwards.
#[inline]
pub fn screen_y(row: u32, height: u32) -> f32 {
    -2.0 * row as f32 / height as f32 + 1.0
}

/// Row-major float image; row 0 is the top of the picture.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, col: u32, row: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Get the pixel at (col, row).
    pub fn get(&self, col: u32, row: u32) -> Color {
        self.pixels[self.index(col, row)]
    }

    /// Set the pixel at (col, row).
    pub fn set(&mut self, col: u32, row: u32, color: Color) {
        let index = self.index(col, row);
        self.pixels[index] = color;
    }

    /// Store an RGB triple at (col, row).
    pub fn put_pixel(&mut self, col: u32, row: u32, rgb: [f32; 3]) {
        self.set(col, row, Color::from_array(rgb));
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgba(*color))
            .collect()
    }
}

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    pub pixels: usize,
    pub samples_per_pixel: u32,
    pub trace: TraceStats,
    pub elapsed: Duration,
}

/// Renders frames of one scene.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    scene: &'a Scene,
    tracer: Tracer<'a>,
    sampler: Sampler,
    seed: u64,
}

impl<'a> Renderer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            tracer: Tracer::new(scene),
            sampler: Sampler::from_image(&scene.image),
            seed: DEFAULT_SEED,
        }
    }

    /// Set the anti-aliasing jitter seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Samples traced per pixel with the current image settings.
    pub fn samples_per_pixel(&self) -> u32 {
        if self.scene.image.anti_alias {
            self.sampler.sample_count()
        } else {
            1
        }
    }

    /// Render one frame through `camera`.
    pub fn render(&self, camera: &Camera) -> ImageBuffer {
        self.render_frame(camera, 0).0
    }

    /// Render frame number `frame` through `camera`, returning its statistics.
    pub fn render_frame(&self, camera: &Camera, frame: u64) -> (ImageBuffer, RenderStats) {
        let image = &self.scene.image;
        let mut buffer = ImageBuffer::new(image.width, image.height);
        let start = Instant::now();

        log::info!(
            "Rendering {}x{} @ {} spp, depth {}, anti-aliasing {}",
            image.width,
            image.height,
            self.samples_per_pixel(),
            image.recursion_depth,
            if image.anti_alias { "on" } else { "off" }
        );

        let row_len = (image.width as usize).max(1);
        let trace = buffer
            .pixels
            .par_chunks_mut(row_len)
            .enumerate()
            .map(|(row, pixels)| {
                let row = row as u32;
                let mut rng = StdRng::seed_from_u64(self.row_seed(frame, row));
                let mut stats = TraceStats::default();
                for (col, pixel) in pixels.iter_mut().enumerate() {
                    *pixel = self.render_pixel(camera, col as u32, row, &mut rng, &mut stats);
                }
                stats
            })
            .reduce(TraceStats::default, TraceStats::merge);

        let stats = RenderStats {
            pixels: image.pixel_count(),
            samples_per_pixel: self.samples_per_pixel(),
            trace,
            elapsed: start.elapsed(),
        };
        log::info!(
            "Rendered in {:.2?} ({} rays, {} secondary)",
            stats.elapsed,
            stats.trace.rays,
            stats.trace.recursive_calls
        );

        (buffer, stats)
    }

    /// Color of the pixel at (`col`, `row`).
    ///
    /// A single ray through the pixel's screen position when anti-aliasing
    /// is off, otherwise the average of the jittered sample grid.
    pub fn render_pixel(
        &self,
        camera: &Camera,
        col: u32,
        row: u32,
        rng: &mut StdRng,
        stats: &mut TraceStats,
    ) -> Color {
        let image = &self.scene.image;
        let x = screen_x(col, image.width);
        let y = screen_y(row, image.height);

        if !image.anti_alias {
            return self
                .tracer
                .trace_with_stats(&camera.ray_through(x, y), stats);
        }

        self.sampler.sample_pixel(x, y, rng, |sx, sy| {
            self.tracer
                .trace_with_stats(&camera.ray_through(sx, sy), stats)
        })
    }

    fn row_seed(&self, frame: u64, row: u32) -> u64 {
        self.seed
            ^ frame.wrapping_mul(0x9e37_79b9_7f4a_7c15)
            ^ (row as u64).wrapping_mul(0xc2b2_ae3d_27d4_eb4f)
    }
}

/// Render every frame of the scene's animation.
///
/// Frame `k` is rendered at `T = k / fps` for `k` in `0..round(fps * length)`
/// with the scene camera moved to the path's pose (field of view and aspect
/// ratio are kept). Each finished frame is handed to `sink` with its index.
/// Returns the number of frames rendered; zero when the scene has no
/// animation.
pub fn render_animation<F, E>(scene: &Scene, path: &mut CameraPath, mut sink: F) -> Result<usize, E>
where
    F: FnMut(usize, &ImageBuffer) -> Result<(), E>,
{
    let Some(animation) = &scene.animation else {
        return Ok(0);
    };

    let renderer = Renderer::new(scene);
    let frames = animation.frame_count();
    log::info!(
        "Rendering {} frames ({} fps, {} s)",
        frames,
        animation.fps,
        animation.length
    );

    let mut camera = scene.camera;
    for frame in 0..frames {
        let time = animation.frame_time(frame);
        let pose = path.camera_at(time);
        pose.apply(&mut camera);
        log::debug!(
            "Frame {} at {:.3}s: position {} look_at {} up {}",
            frame,
            time,
            pose.position,
            pose.look_at,
            pose.up
        );

        let (image, _) = renderer.render_frame(&camera, frame as u64);
        sink(frame, &image)?;
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rt_core::{AnimationInfo, ImageParameters, LightSource, Material, Solid, Sphere};
    use rt_math::Vec3;

    fn sphere_scene(material: Material, image: ImageParameters) -> Scene {
        let mut scene = Scene::new().with_image(image);
        scene.lights.set_ambient(0.5);
        scene.solids.add(Solid::new(
            Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0),
            Color::new(0.8, 0.4, 0.2),
            material,
        ));
        scene
    }

    fn small_image(anti_alias: bool, recursion_depth: u32) -> ImageParameters {
        ImageParameters {
            width: 16,
            height: 16,
            recursion_depth,
            spp: 4,
            anti_alias,
            background_color: Color::new(0.0, 0.0, 0.25),
        }
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::new(-1.0, 0.25, 4.0)), [0, 127, 255, 255]);
    }

    #[test]
    fn test_image_buffer_put_pixel() {
        let mut image = ImageBuffer::new(3, 2);
        image.put_pixel(2, 1, [0.1, 0.2, 0.3]);
        assert_eq!(image.get(2, 1), Color::new(0.1, 0.2, 0.3));
        assert_eq!(image.pixels[5], Color::new(0.1, 0.2, 0.3));
        assert_eq!(image.to_rgba().len(), 3 * 2 * 4);
    }

    #[test]
    fn test_screen_coordinates() {
        assert_eq!(screen_x(0, 16), 1.0);
        assert_eq!(screen_x(8, 16), 0.0);
        assert_eq!(screen_y(8, 16), 0.0);
        assert_eq!(screen_y(16, 16), -1.0);
    }

    #[test]
    fn test_center_pixel_is_pure_ambient() {
        let material = Material::new(1.0, 0.0, 0.3, 50.0);
        let scene = sphere_scene(material, small_image(false, 5));
        let image = Renderer::new(&scene).render(&scene.camera);

        let expected = Color::new(0.8, 0.4, 0.2) * 0.3 * 0.5;
        assert!((image.get(8, 8) - expected).length() < 1e-6);
        // Corners miss the sphere
        assert_eq!(image.get(0, 0), Color::new(0.0, 0.0, 0.25));
    }

    #[test]
    fn test_depth_zero_has_no_secondary_rays() {
        let material = Material::new(0.2, 0.9, 0.3, 50.0).with_transparency(0.8, 1.5);
        let scene = sphere_scene(material, small_image(false, 0));
        let (image, stats) = Renderer::new(&scene).render_frame(&scene.camera, 0);

        let expected = Color::new(0.8, 0.4, 0.2) * 0.3 * 0.5;
        assert!((image.get(8, 8) - expected).length() < 1e-6);
        assert_eq!(stats.trace.recursive_calls, 0);
        assert_eq!(stats.trace.rays, 256);
    }

    #[test]
    fn test_anti_aliased_render_is_reproducible() {
        let material = Material::new(0.7, 0.2, 0.1, 50.0);
        let mut scene = sphere_scene(material, small_image(true, 2));
        scene
            .lights
            .add(LightSource::new(Vec3::new(3.0, 3.0, 0.0), Color::ONE, 4.0));

        let renderer = Renderer::new(&scene).with_seed(11);
        let (first, stats) = renderer.render_frame(&scene.camera, 0);
        let second = renderer.render(&scene.camera);
        assert_eq!(first, second);
        assert_eq!(stats.samples_per_pixel, 4);
        assert!(stats.trace.rays >= 256 * 4);
    }

    #[test]
    fn test_render_animation_frames() {
        let mut scene = sphere_scene(Material::default(), small_image(false, 1));
        scene.image.width = 4;
        scene.image.height = 4;
        scene.animation = Some(AnimationInfo {
            fps: 4,
            length: 1.5,
            camera_script: None,
        });

        let mut path = CameraPath::default_orbit(1.5);
        let mut seen = Vec::new();
        let count = render_animation(&scene, &mut path, |frame, image| {
            assert_eq!(image.width, 4);
            seen.push(frame);
            Ok::<(), std::io::Error>(())
        })
        .unwrap();

        assert_eq!(count, 6);
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_render_animation_without_animation() {
        let scene = sphere_scene(Material::default(), small_image(false, 1));
        let mut path = CameraPath::default_orbit(1.0);
        let count = render_animation(&scene, &mut path, |_, _| Ok::<(), std::io::Error>(()));
        assert_eq!(count.unwrap(), 0);
    }
}
