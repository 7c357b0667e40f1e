//! Scene representation: hierarchy, bounds, models, visibility, ownership
//!
//! The scene is a flat collection of [`Model`]s owned by the
//! [`SceneManager`]. Each model carries its own flattened node hierarchy and
//! bounding volumes; visibility against a [`CullingVolume`] is decided here,
//! while draw submission lives in [`crate::render`].

pub mod bounds;
pub mod hierarchy;
pub mod model;
pub mod scene_manager;
pub mod visibility;

pub use bounds::BoundingBox;
pub use hierarchy::{is_preorder, Node};
pub use model::{Material, Mesh, Model, Vertex};
pub use scene_manager::{ModelKey, SceneConfig, SceneManager};
pub use visibility::{update_visibility, CullingVolume, Frustum, Plane};
