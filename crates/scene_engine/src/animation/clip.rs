//! Animation clips
//!
//! A clip groups the keyframe channels of one animation, keyed by the name of
//! the node each channel targets, together with its duration and tick rate.

use crate::animation::AnimationChannel;
use std::collections::HashMap;

/// Tick rate used when a source clip declares none (Assimp convention)
pub const DEFAULT_TICKS_PER_SECOND: f32 = 25.0;

/// A named animation clip with per-node keyframe channels
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Clip name as authored
    pub name: String,

    /// Clip length in ticks
    pub duration_ticks: f32,

    /// Ticks per wall-clock second; 0 means "use the default"
    pub ticks_per_second: f32,

    /// Channels keyed by target node name
    channels: HashMap<String, AnimationChannel>,
}

impl AnimationClip {
    /// Create a clip from a list of channels.
    ///
    /// Channels with an empty track are dropped and channels targeting a node
    /// that already has one are ignored (first wins); both are data errors in
    /// the source asset and logged as warnings.
    pub fn new(
        name: impl Into<String>,
        duration_ticks: f32,
        ticks_per_second: f32,
        channels: Vec<AnimationChannel>,
    ) -> Self {
        let name = name.into();
        let mut by_target: HashMap<String, AnimationChannel> = HashMap::new();
        for channel in channels {
            if !channel.is_complete() {
                log::warn!(
                    "clip '{}': channel for '{}' has an empty track, dropping it",
                    name,
                    channel.target
                );
                continue;
            }
            if by_target.contains_key(&channel.target) {
                log::warn!(
                    "clip '{}': duplicate channel for '{}', keeping the first",
                    name,
                    channel.target
                );
                continue;
            }
            by_target.insert(channel.target.clone(), channel);
        }

        Self {
            name,
            duration_ticks,
            ticks_per_second,
            channels: by_target,
        }
    }

    /// Look up the channel animating a node, if any
    pub fn channel(&self, target: &str) -> Option<&AnimationChannel> {
        self.channels.get(target)
    }

    /// Number of channels in this clip
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Convert wall-clock seconds to a time in clip ticks.
    ///
    /// Playback always loops: the result is wrapped into `[0, duration)`.
    pub fn ticks_at(&self, seconds: f32) -> f32 {
        let ticks_per_second = if self.ticks_per_second == 0.0 {
            DEFAULT_TICKS_PER_SECOND
        } else {
            self.ticks_per_second
        };
        if self.duration_ticks <= 0.0 {
            return 0.0;
        }
        (seconds * ticks_per_second) % self.duration_ticks
    }
}
