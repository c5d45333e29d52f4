//! Keyframed camera paths.
//!
//! The path is a cyclic sequence of keyframes covering `[0, duration)`.
//! Position, look-at target and up vector are each interpolated with a
//! Catmull-Rom spline through the keyframe values, wrapping at both ends so
//! the motion loops without a seam.

use std::path::Path;

use rt_math::{direction_between, Camera, Interval, Vec3};

use crate::script::read_keyframe_script;

/// Minimum number of keyframes a path needs before the default orbit is used.
pub const MIN_KEYFRAMES: usize = 4;

/// Camera state over a half-open time span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyFrame {
    /// `[start, end)` in seconds
    pub span: Interval,
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
}

impl KeyFrame {
    pub fn new(start: f32, end: f32, position: Vec3, look_at: Vec3, up: Vec3) -> Self {
        Self {
            span: Interval::new(start, end),
            position,
            look_at,
            up,
        }
    }
}

/// Interpolated camera state at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
}

impl CameraPose {
    /// Normalized view direction from position to look-at target.
    pub fn forward(&self) -> Vec3 {
        direction_between(self.position, self.look_at)
    }

    /// Move `camera` to this pose, keeping its field of view and aspect ratio.
    pub fn apply(&self, camera: &mut Camera) {
        camera.look_at(self.position, self.look_at, self.up);
    }
}

/// Cyclic Catmull-Rom camera path.
#[derive(Debug, Clone)]
pub struct CameraPath {
    keyframes: Vec<KeyFrame>,
    duration: f32,
    phase: usize,
}

impl CameraPath {
    /// Build a path from keyframes.
    ///
    /// Fewer than [`MIN_KEYFRAMES`] keyframes are replaced by the default
    /// orbit. The first keyframe always starts at 0, keyframes starting at or
    /// after `duration` are dropped, and the last one is clamped to end at
    /// `duration` or followed by a closing keyframe that returns to the
    /// first keyframe's state.
    pub fn from_keyframes(keyframes: Vec<KeyFrame>, duration: f32) -> Self {
        let mut keyframes = if keyframes.len() < MIN_KEYFRAMES {
            if !keyframes.is_empty() {
                log::warn!(
                    "Camera path has {} keyframes, at least {} needed; using the default orbit",
                    keyframes.len(),
                    MIN_KEYFRAMES
                );
            }
            default_orbit_keyframes(duration)
        } else {
            keyframes
        };

        keyframes[0].span.min = 0.0;
        let first = keyframes[0];
        let mut keyframes: Vec<KeyFrame> = std::iter::once(first)
            .chain(
                keyframes
                    .into_iter()
                    .skip(1)
                    .filter(|frame| frame.span.min < duration),
            )
            .collect();

        if let Some(last) = keyframes.last_mut() {
            if last.span.max > duration {
                last.span.max = duration;
            }
        }
        if let Some(last) = keyframes.last().copied() {
            if last.span.max < duration {
                keyframes.push(KeyFrame::new(
                    last.span.max,
                    duration,
                    first.position,
                    first.look_at,
                    first.up,
                ));
            }
        }

        for frame in &keyframes {
            log::debug!(
                "Keyframe [{:.3}, {:.3}) pos {} look_at {} up {}",
                frame.span.min,
                frame.span.max,
                frame.position,
                frame.look_at,
                frame.up
            );
        }

        Self {
            keyframes,
            duration,
            phase: 0,
        }
    }

    /// Four-keyframe sideways sway around the origin, looking down +Z.
    pub fn default_orbit(duration: f32) -> Self {
        Self::from_keyframes(default_orbit_keyframes(duration), duration)
    }

    /// Build a path from an optional keyframe script.
    ///
    /// A script that cannot be read or parsed is reported and replaced by
    /// the default orbit; it never aborts the render.
    pub fn load(script: Option<&Path>, duration: f32) -> Self {
        let keyframes = match script {
            Some(path) => match read_keyframe_script(path, duration) {
                Ok(keyframes) => {
                    log::info!(
                        "Loaded {} keyframes from {}",
                        keyframes.len(),
                        path.display()
                    );
                    keyframes
                }
                Err(error) => {
                    log::warn!(
                        "Failed to read camera script {}: {}; using the default orbit",
                        path.display(),
                        error
                    );
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Self::from_keyframes(keyframes, duration)
    }

    pub fn keyframes(&self) -> &[KeyFrame] {
        &self.keyframes
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Camera pose at `time` seconds; times outside `[0, duration)` wrap.
    ///
    /// The keyframe found last is cached, so queries with increasing times
    /// only scan forward from the previous answer.
    pub fn camera_at(&mut self, time: f32) -> CameraPose {
        let time = if self.duration > 0.0 {
            time.rem_euclid(self.duration)
        } else {
            0.0
        };
        let len = self.keyframes.len();

        while self.phase + 1 < len && time >= self.keyframes[self.phase].span.max {
            self.phase += 1;
        }
        while self.phase > 0 && time < self.keyframes[self.phase].span.min {
            self.phase -= 1;
        }

        let previous = &self.keyframes[(self.phase + len - 1) % len];
        let current = &self.keyframes[self.phase];
        let next = &self.keyframes[(self.phase + 1) % len];
        let next_next = &self.keyframes[(self.phase + 2) % len];

        let t = current.span.fraction(time).clamp(0.0, 1.0);

        CameraPose {
            position: catmull_rom(
                t,
                previous.position,
                current.position,
                next.position,
                next_next.position,
            ),
            look_at: catmull_rom(
                t,
                previous.look_at,
                current.look_at,
                next.look_at,
                next_next.look_at,
            ),
            up: catmull_rom(t, previous.up, current.up, next.up, next_next.up),
        }
    }
}

fn default_orbit_keyframes(duration: f32) -> Vec<KeyFrame> {
    let quarter = duration / 4.0;
    [
        Vec3::ZERO,
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::ZERO,
        Vec3::new(1.0, 0.0, 0.0),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, position)| {
        let start = quarter * i as f32;
        let end = if i == 3 { duration } else { quarter * (i + 1) as f32 };
        KeyFrame::new(start, end, position, Vec3::Z, Vec3::Y)
    })
    .collect()
}

/// Catmull-Rom segment between `p1` (t = 0) and `p2` (t = 1).
pub fn catmull_rom(t: f32, p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Vec3 {
    let a = 2.0 * p1;
    let b = p2 - p0;
    let c = 2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3;
    let d = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
    0.5 * (a + b * t + c * t * t + d * t * t * t)
}
