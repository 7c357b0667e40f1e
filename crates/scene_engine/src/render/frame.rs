//! Per-frame submission data
//!
//! The bridge between the scene and a rendering backend: a flat list of draw
//! calls borrowing into the scene's models. Everything here lives for one
//! frame only — the backend never owns scene data.

use crate::animation::BoneInfo;
use crate::foundation::math::Mat4;
use crate::scene::{Mesh, Model};
use bitflags::bitflags;

bitflags! {
    /// Options controlling what goes into a frame submission
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FrameOptions: u8 {
        /// Submit every mesh regardless of visibility flags
        const SKIP_CULLING = 1 << 0;
        /// Submit geometry without material bindings (depth/shadow passes)
        const SKIP_MATERIALS = 1 << 1;
    }
}

/// One mesh to draw, with everything the backend needs for it
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    /// The mesh geometry
    pub mesh: &'a Mesh,

    /// Composed world matrix (mesh offset x model matrix)
    pub world_matrix: Mat4,

    /// Index into the owning model's material list; `None` when materials
    /// are skipped for this frame
    pub material_index: Option<usize>,

    /// Skinning palette in bone order, or `None` for unrigged meshes
    pub skinning_palette: Option<&'a [BoneInfo]>,
}

/// All draw calls for one frame, in model/mesh traversal order
#[derive(Debug, Default)]
pub struct FrameQueue<'a> {
    draws: Vec<DrawCall<'a>>,
}

impl<'a> FrameQueue<'a> {
    /// Build a queue from models whose visibility flags are current.
    ///
    /// A mesh is submitted when both its own flag and its model's flag are
    /// set (or unconditionally under [`FrameOptions::SKIP_CULLING`]).
    pub fn gather(models: impl IntoIterator<Item = &'a Model>, options: FrameOptions) -> Self {
        let skip_culling = options.contains(FrameOptions::SKIP_CULLING);
        let skip_materials = options.contains(FrameOptions::SKIP_MATERIALS);

        let mut draws = Vec::new();
        for model in models {
            if !skip_culling && !model.visible {
                continue;
            }
            for mesh in &model.meshes {
                if !skip_culling && !mesh.visible {
                    continue;
                }
                draws.push(DrawCall {
                    mesh,
                    world_matrix: model.mesh_world_matrix(mesh),
                    material_index: (!skip_materials).then_some(mesh.material_index),
                    skinning_palette: mesh.is_rigged().then(|| mesh.bones.bones()),
                });
            }
        }
        Self { draws }
    }

    /// The draw calls of this frame
    pub fn draws(&self) -> &[DrawCall<'a>] {
        &self.draws
    }

    /// Number of draw calls queued
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    /// True if nothing survived culling
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}
