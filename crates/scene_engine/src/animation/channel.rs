//! Keyframe tracks and sampling
//!
//! An [`AnimationChannel`] holds three independent keyframe tracks (position,
//! rotation, scale) for one target node. Sampling maps a time in clip ticks to
//! an interpolated local [`Transform`].
//!
//! End-of-track policy: times at or beyond the track boundaries clamp to the
//! boundary key. Looping is handled upstream by the clip, which wraps time
//! into `[0, duration)` before sampling.

use crate::foundation::math::{Quat, Transform, Vec3};
use serde::{Deserialize, Serialize};

/// A single keyframe: a time in ticks and the value at that time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    /// Keyframe time in clip ticks
    pub time: f32,

    /// Value at this time
    pub value: T,
}

impl<T> Keyframe<T> {
    /// Create a new keyframe
    pub fn new(time: f32, value: T) -> Self {
        Self { time, value }
    }
}

/// Keyframe tracks for one animated node
///
/// Each track is expected to be monotonically increasing in time and to hold
/// at least one key. Tracks are sampled independently of each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationChannel {
    /// Name of the node this channel animates
    pub target: String,

    /// Translation keys
    pub position_keys: Vec<Keyframe<Vec3>>,

    /// Rotation keys
    pub rotation_keys: Vec<Keyframe<Quat>>,

    /// Scale keys
    pub scale_keys: Vec<Keyframe<Vec3>>,
}

impl AnimationChannel {
    /// Create an empty channel for a target node
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            position_keys: Vec::new(),
            rotation_keys: Vec::new(),
            scale_keys: Vec::new(),
        }
    }

    /// True if every track holds at least one key
    pub fn is_complete(&self) -> bool {
        !self.position_keys.is_empty()
            && !self.rotation_keys.is_empty()
            && !self.scale_keys.is_empty()
    }

    /// Sample the translation track at a time in ticks
    pub fn sample_position(&self, ticks: f32) -> Vec3 {
        sample_track(&self.position_keys, ticks, lerp_vec3).unwrap_or_else(Vec3::zeros)
    }

    /// Sample the rotation track at a time in ticks
    pub fn sample_rotation(&self, ticks: f32) -> Quat {
        sample_track(&self.rotation_keys, ticks, interpolate_rotation)
            .unwrap_or_else(Quat::identity)
    }

    /// Sample the scale track at a time in ticks
    pub fn sample_scale(&self, ticks: f32) -> Vec3 {
        sample_track(&self.scale_keys, ticks, lerp_vec3)
            .unwrap_or_else(|| Vec3::new(1.0, 1.0, 1.0))
    }

    /// Sample all three tracks into a local transform
    pub fn sample(&self, ticks: f32) -> Transform {
        Transform::new(
            self.sample_position(ticks),
            self.sample_rotation(ticks),
            self.sample_scale(ticks),
        )
    }
}

/// Sample one track with the given interpolation function.
///
/// A single-key track returns that key unconditionally. Times at or outside
/// the track boundaries clamp to the boundary key. Returns `None` only for an
/// empty track, which well-formed import data never produces.
fn sample_track<T: Copy>(
    keys: &[Keyframe<T>],
    ticks: f32,
    interpolate: impl Fn(&T, &T, f32) -> T,
) -> Option<T> {
    let (first, rest) = keys.split_first()?;
    if rest.is_empty() || ticks <= first.time {
        return Some(first.value);
    }
    let last = keys[keys.len() - 1];
    if ticks >= last.time {
        return Some(last.value);
    }

    // Find the segment [i, i+1] containing `ticks`.
    let mut index = 0;
    for (i, window) in keys.windows(2).enumerate() {
        if ticks < window[1].time {
            index = i;
            break;
        }
    }

    let start = &keys[index];
    let end = &keys[index + 1];
    let delta = end.time - start.time;
    if delta <= 0.0 {
        // Degenerate segment (duplicate key times).
        return Some(start.value);
    }
    let factor = (ticks - start.time) / delta;
    Some(interpolate(&start.value, &end.value, factor))
}

fn lerp_vec3(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Normalized spherical interpolation between two rotations.
///
/// Near-antipodal pairs fall back to a hemisphere-corrected normalized lerp,
/// since a great-arc slerp is undefined at 180 degrees.
fn interpolate_rotation(a: &Quat, b: &Quat, t: f32) -> Quat {
    match a.try_slerp(b, t, 1.0e-6) {
        Some(q) => q,
        None => {
            let flipped = Quat::new_unchecked(-b.into_inner());
            a.nlerp(&flipped, t)
        }
    }
}
