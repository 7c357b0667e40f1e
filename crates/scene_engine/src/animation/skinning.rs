//! Bone registry and per-vertex skinning data
//!
//! Each rigged mesh owns a [`BoneRegistry`]: a name-to-index map over its
//! bones, the inverse bind-pose offset of each bone, the per-frame skinning
//! matrices, and the per-vertex (bone, weight) influences.

use crate::foundation::math::Mat4;
use std::collections::HashMap;

/// Maximum number of bone influences stored per vertex
pub const MAX_BONE_INFLUENCES: usize = 4;

/// Fixed-capacity (bone, weight) pairs for one vertex.
///
/// A weight of zero marks an empty slot, so zero-weight influences are never
/// stored. Weights are kept exactly as authored and are **not** normalized to
/// sum to 1 — normalization is left to the consuming renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VertexBoneData {
    /// Bone indices, parallel to `weights`
    pub bone_ids: [u32; MAX_BONE_INFLUENCES],

    /// Influence weights; 0.0 marks an unused slot
    pub weights: [f32; MAX_BONE_INFLUENCES],
}

impl VertexBoneData {
    /// Add an influence to the first empty slot.
    ///
    /// Rejected without error: zero weights, bones already present for this
    /// vertex, and anything arriving after all slots are occupied. Returns
    /// whether the influence was stored. Callers must not assume every
    /// influence is preserved.
    pub fn push(&mut self, bone_id: u32, weight: f32) -> bool {
        if weight == 0.0 {
            return false;
        }
        for slot in 0..MAX_BONE_INFLUENCES {
            if self.weights[slot] != 0.0 && self.bone_ids[slot] == bone_id {
                return false;
            }
        }
        for slot in 0..MAX_BONE_INFLUENCES {
            if self.weights[slot] == 0.0 {
                self.bone_ids[slot] = bone_id;
                self.weights[slot] = weight;
                return true;
            }
        }
        false
    }

    /// Number of occupied slots
    pub fn influence_count(&self) -> usize {
        self.weights.iter().filter(|w| **w != 0.0).count()
    }
}

/// A single bone: its inverse bind-pose offset and the current skinning matrix
#[derive(Debug, Clone)]
pub struct BoneInfo {
    /// Inverse bind-pose matrix, fixed at import
    pub offset_transform: Mat4,

    /// Skinning matrix for the current frame (`node_world * offset`)
    pub final_transform: Mat4,
}

impl BoneInfo {
    /// Create a bone with the given offset and an identity skinning matrix
    pub fn new(offset_transform: Mat4) -> Self {
        Self {
            offset_transform,
            final_transform: Mat4::identity(),
        }
    }
}

/// Per-mesh bone table and vertex influence storage
#[derive(Debug, Clone, Default)]
pub struct BoneRegistry {
    bones: Vec<BoneInfo>,
    name_to_index: HashMap<String, usize>,
    vertex_influences: Vec<VertexBoneData>,
}

impl BoneRegistry {
    /// Create an empty registry sized for a mesh with `vertex_count` vertices
    pub fn with_vertex_count(vertex_count: usize) -> Self {
        Self {
            bones: Vec::new(),
            name_to_index: HashMap::new(),
            vertex_influences: vec![VertexBoneData::default(); vertex_count],
        }
    }

    /// True if the mesh carries no skinning data
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Number of registered bones
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Register a bone by name, returning its index.
    ///
    /// Duplicate names within a mesh are a data error; the second occurrence
    /// is ignored and the existing index returned.
    pub fn register_bone(&mut self, name: &str, offset_transform: Mat4) -> usize {
        if let Some(&existing) = self.name_to_index.get(name) {
            log::warn!("duplicate bone name '{name}' in mesh, keeping the first occurrence");
            return existing;
        }
        let index = self.bones.len();
        self.bones.push(BoneInfo::new(offset_transform));
        self.name_to_index.insert(name.to_owned(), index);
        index
    }

    /// Look up a bone index by node name
    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Add a (bone, weight) influence for a vertex.
    ///
    /// Out-of-range vertex ids are skipped with a warning; slot-level policy
    /// is [`VertexBoneData::push`].
    pub fn add_influence(&mut self, vertex: usize, bone_id: u32, weight: f32) {
        match self.vertex_influences.get_mut(vertex) {
            Some(data) => {
                data.push(bone_id, weight);
            }
            None => {
                log::warn!(
                    "bone weight references vertex {vertex} outside mesh ({} vertices), skipping",
                    self.vertex_influences.len()
                );
            }
        }
    }

    /// Store the skinning matrix for a bone computed by the evaluator
    pub fn set_final_transform(&mut self, index: usize, final_transform: Mat4) {
        if let Some(bone) = self.bones.get_mut(index) {
            bone.final_transform = final_transform;
        }
    }

    /// The bone table, indexed `0..bone_count`
    pub fn bones(&self) -> &[BoneInfo] {
        &self.bones
    }

    /// Current skinning matrices in bone order, for upload by the renderer
    pub fn final_transforms(&self) -> impl Iterator<Item = &Mat4> {
        self.bones.iter().map(|bone| &bone.final_transform)
    }

    /// Per-vertex influence data, parallel to the mesh's vertex array
    pub fn vertex_influences(&self) -> &[VertexBoneData] {
        &self.vertex_influences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_weight_is_never_inserted() {
        let mut data = VertexBoneData::default();
        assert!(!data.push(3, 0.0));
        assert_eq!(data.influence_count(), 0);
    }

    #[test]
    fn test_duplicate_bone_id_is_rejected() {
        let mut data = VertexBoneData::default();
        assert!(data.push(3, 0.5));
        assert!(!data.push(3, 0.25));
        assert_eq!(data.influence_count(), 1);
        assert_eq!(data.weights[0], 0.5);
    }

    #[test]
    fn test_bone_zero_can_be_added() {
        // Bone index 0 collides with the empty-slot default id; occupancy is
        // tracked by weight, so it must still be storable.
        let mut data = VertexBoneData::default();
        assert!(data.push(0, 0.75));
        assert_eq!(data.influence_count(), 1);
        assert_eq!(data.bone_ids[0], 0);
    }

    #[test]
    fn test_overflow_is_dropped_silently() {
        let mut data = VertexBoneData::default();
        for bone in 0..MAX_BONE_INFLUENCES as u32 {
            assert!(data.push(bone, 0.25));
        }
        assert!(!data.push(99, 0.25));
        assert_eq!(data.influence_count(), MAX_BONE_INFLUENCES);
        assert!(!data.bone_ids.contains(&99));
    }

    #[test]
    fn test_weights_are_not_normalized() {
        let mut data = VertexBoneData::default();
        data.push(0, 0.9);
        data.push(1, 0.9);
        let total: f32 = data.weights.iter().sum();
        assert_eq!(total, 1.8);
    }

    #[test]
    fn test_duplicate_bone_name_keeps_first_offset() {
        let mut registry = BoneRegistry::with_vertex_count(0);
        let offset_a = Mat4::new_scaling(2.0);
        let offset_b = Mat4::new_scaling(3.0);

        let first = registry.register_bone("spine", offset_a);
        let second = registry.register_bone("spine", offset_b);

        assert_eq!(first, second);
        assert_eq!(registry.bone_count(), 1);
        assert_eq!(registry.bones()[0].offset_transform, offset_a);
    }

    #[test]
    fn test_out_of_range_vertex_is_skipped() {
        let mut registry = BoneRegistry::with_vertex_count(2);
        registry.register_bone("spine", Mat4::identity());
        registry.add_influence(7, 0, 0.5);
        assert_eq!(registry.vertex_influences()[0].influence_count(), 0);
        assert_eq!(registry.vertex_influences()[1].influence_count(), 0);
    }
}
