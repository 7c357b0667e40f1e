//! # Scene Engine
//!
//! The scene and animation core of a 3D editor: scene-hierarchy
//! construction, skeletal animation evaluation, bounding-volume
//! aggregation and view-frustum culling.
//!
//! ## Features
//!
//! - **Scene Import**: RON scene documents built into flattened models
//! - **Skeletal Animation**: keyframe channels, bone palettes, clip playback
//! - **Visibility**: model- and mesh-level frustum culling
//! - **Frame Queue**: backend-agnostic draw submission
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     scene_engine::foundation::logging::init();
//!
//!     let mut scene = SceneManager::new();
//!     let key = scene.insert_model(load_model("assets/demo_scene.ron")?);
//!     scene.set_active_clip(key, Some(0));
//!
//!     let projection = nalgebra::Perspective3::new(16.0 / 9.0, 0.8, 0.1, 100.0);
//!     let frustum = Frustum::from_view_projection(&projection.to_homogeneous());
//!
//!     let mut timer = Timer::new();
//!     loop {
//!         timer.update();
//!         scene.update(timer.total_time(), &frustum);
//!         let queue = scene.frame_queue(FrameOptions::empty());
//!         // hand `queue` to a RenderBackend
//!         # break;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod animation;
pub mod assets;
pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        animation::{AnimationClip, BoneRegistry},
        assets::{load_model, ImportError, ImportJob, SceneDocument},
        config::{Config, EditorConfig},
        foundation::{
            math::{Mat4, Quat, Transform, Vec3},
            time::Timer,
        },
        render::{FrameOptions, FrameQueue, HeadlessBackend, RenderBackend},
        scene::{Frustum, Model, ModelKey, SceneManager},
    };
}
