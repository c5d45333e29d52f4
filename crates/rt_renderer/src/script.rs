//! Keyframe script parsing.
//!
//! A script is line oriented:
//!
//! ```text
//! # orbit around the origin
//! t=0,pos=(0;0;-5),lookat=(0;0;0),up=(0;1;0)
//! t=2.5,pos=(5;0;0)
//! t=5,pos=(0;0;5)
//! end
//! ```
//!
//! Keys missing from a line keep their previous value. Each line starts a
//! keyframe that lasts until the next line's time; the last one runs to
//! the end of the animation.

use std::fs;
use std::path::Path;

use rt_math::Vec3;
use thiserror::Error;

use crate::animation::KeyFrame;

/// Errors raised while reading a keyframe script.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: '{value}' is not a number")]
    InvalidNumber { line: usize, value: String },

    #[error("Line {line}: '{value}' is not a vector of the form (x;y;z)")]
    InvalidVector { line: usize, value: String },

    #[error("Line {line}: '{entry}' is not a key=value pair")]
    MalformedEntry { line: usize, entry: String },

    #[error("Line {line}: time {time} is earlier than the previous keyframe at {previous}")]
    TimeOutOfOrder { line: usize, time: f32, previous: f32 },

    #[error("Line {line}: camera has no view direction (lookat on pos, or up along the view)")]
    DegenerateCamera { line: usize },
}

pub type ScriptResult<T> = Result<T, ScriptError>;

/// Read and parse a keyframe script file.
pub fn read_keyframe_script(
    path: impl AsRef<Path>,
    duration: f32,
) -> ScriptResult<Vec<KeyFrame>> {
    let text = fs::read_to_string(path)?;
    parse_keyframe_script(&text, duration)
}

/// Camera state accumulated while reading lines.
#[derive(Debug, Clone, Copy)]
struct Entry {
    time: f32,
    position: Vec3,
    look_at: Vec3,
    up: Vec3,
}

impl Entry {
    /// True when no camera basis can be built from this state.
    fn is_degenerate(&self) -> bool {
        (self.look_at - self.position)
            .try_normalize()
            .and_then(|view| view.cross(self.up).try_normalize())
            .is_none()
    }
}

/// Parse keyframes from script text.
///
/// The returned keyframes are contiguous; the last one ends at `duration`.
pub fn parse_keyframe_script(text: &str, duration: f32) -> ScriptResult<Vec<KeyFrame>> {
    let mut entries: Vec<Entry> = Vec::new();
    let mut current = Entry {
        time: 0.0,
        position: Vec3::ZERO,
        look_at: Vec3::Z,
        up: Vec3::Y,
    };

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed == "end" {
            break;
        }

        for entry in trimmed.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let Some((key, value)) = entry.split_once('=') else {
                return Err(ScriptError::MalformedEntry {
                    line,
                    entry: entry.to_string(),
                });
            };
            let value = value.trim();
            match key.trim() {
                "t" => current.time = parse_number(line, value)?,
                "pos" => current.position = parse_vector(line, value)?,
                "lookat" => current.look_at = parse_vector(line, value)?,
                "up" => current.up = parse_vector(line, value)?,
                other => log::debug!("Keyframe script line {line}: ignoring key '{other}'"),
            }
        }

        if let Some(previous) = entries.last() {
            if current.time < previous.time {
                return Err(ScriptError::TimeOutOfOrder {
                    line,
                    time: current.time,
                    previous: previous.time,
                });
            }
        }
        if current.is_degenerate() {
            return Err(ScriptError::DegenerateCamera { line });
        }
        entries.push(current);
    }

    let ends = entries
        .iter()
        .skip(1)
        .map(|entry| entry.time)
        .chain(std::iter::once(duration));
    Ok(entries
        .iter()
        .zip(ends)
        .map(|(entry, end)| {
            KeyFrame::new(entry.time, end, entry.position, entry.look_at, entry.up)
        })
        .collect())
}

fn parse_number(line: usize, value: &str) -> ScriptResult<f32> {
    value.parse().map_err(|_| ScriptError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

fn parse_vector(line: usize, value: &str) -> ScriptResult<Vec3> {
    let invalid = || ScriptError::InvalidVector {
        line,
        value: value.to_string(),
    };

    let inner = value
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let components = inner
        .split(';')
        .map(|component| component.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    match components.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(invalid()),
    }
}
