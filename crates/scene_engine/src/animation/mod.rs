//! Skeletal animation system
//!
//! Covers the full path from imported keyframe data to per-frame skinning
//! matrices:
//! - [`channel`]: keyframe tracks and time sampling
//! - [`clip`]: named clips with per-node channels and tick conversion
//! - [`skinning`]: bone registries and per-vertex influence storage
//! - [`evaluator`]: the per-frame hierarchy walk producing world and
//!   skinning transforms
//!
//! Only single-clip sampling is provided; blending and state machines are
//! out of scope.

pub mod channel;
pub mod clip;
pub mod evaluator;
pub mod skinning;

pub use channel::{AnimationChannel, Keyframe};
pub use clip::{AnimationClip, DEFAULT_TICKS_PER_SECOND};
pub use evaluator::{evaluate_bind_pose, evaluate_clip};
pub use skinning::{BoneInfo, BoneRegistry, VertexBoneData, MAX_BONE_INFLUENCES};
