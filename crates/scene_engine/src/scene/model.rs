//! Model and mesh representation
//!
//! A [`Model`] is the unit of import and ownership: it exclusively owns its
//! meshes, its flattened node hierarchy, its materials and its animation
//! clips. Nothing inside a model is shared across models; the rendering
//! pipeline only ever borrows into it for the duration of a frame.

use crate::animation::{AnimationClip, BoneRegistry};
use crate::foundation::math::Mat4;
use crate::scene::{BoundingBox, Node};

/// 3D vertex data for rendering
///
/// `#[repr(C)]` keeps the layout stable for GPU buffer uploads performed by
/// the backend.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in mesh-local space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],

    /// Tangent vector for normal mapping
    pub tangent: [f32; 3],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2], tangent: [f32; 3]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
            tangent,
        }
    }

    /// Create a vertex holding only a position
    pub fn from_position(position: [f32; 3]) -> Self {
        Self::new(position, [0.0; 3], [0.0; 2], [0.0; 3])
    }
}

/// Material data as delivered by the importer: a name and texture paths.
///
/// Texture decoding and GPU upload belong to the resource layer, not here.
#[derive(Debug, Clone, Default)]
pub struct Material {
    /// Material name as authored
    pub name: String,

    /// Paths of the textures this material references
    pub texture_paths: Vec<String>,
}

/// One mesh of a model: immutable geometry plus per-frame skinning state
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex buffer; immutable after import
    pub vertices: Vec<Vertex>,

    /// Triangle index buffer; immutable after import
    pub indices: Vec<u32>,

    /// Index into the owning model's material list
    pub material_index: usize,

    /// Mesh offset relative to the model root
    pub local_matrix: Mat4,

    /// Mesh-local bounds, computed from vertex positions at import
    pub bounds: BoundingBox,

    /// Skinning data; empty for unrigged meshes
    pub bones: BoneRegistry,

    /// Per-frame visibility flag written by the frustum culler
    pub visible: bool,
}

impl Mesh {
    /// Create a mesh, computing its local bounds from the vertex positions
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, material_index: usize) -> Self {
        let mut bounds = BoundingBox::empty();
        for vertex in &vertices {
            bounds.expand_point(vertex.position.into());
        }
        Self {
            vertices,
            indices,
            material_index,
            local_matrix: Mat4::identity(),
            bounds,
            bones: BoneRegistry::with_vertex_count(0),
            visible: true,
        }
    }

    /// True if this mesh carries skinning data
    pub fn is_rigged(&self) -> bool {
        !self.bones.is_empty()
    }
}

/// An imported model: meshes, node hierarchy, materials and animation clips
#[derive(Debug, Clone)]
pub struct Model {
    /// Meshes in import traversal order
    pub meshes: Vec<Mesh>,

    /// Flattened node hierarchy in pre-order (see [`crate::scene::hierarchy`])
    pub nodes: Vec<Node>,

    /// Materials referenced by the meshes
    pub materials: Vec<Material>,

    /// Animation clips shipped with the model
    pub animations: Vec<AnimationClip>,

    /// Model-to-world transform, edited by the user
    pub model_matrix: Mat4,

    /// Union of all mesh bounds, in model space
    pub bounds: BoundingBox,

    /// Per-frame visibility flag written by the frustum culler
    pub visible: bool,

    /// Clip selected for playback, supplied by the editor UI
    pub active_clip: Option<usize>,
}

impl Default for Model {
    /// An empty model with an identity transform and no usable bounds
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }
}

impl Model {
    /// Assemble a model, folding the mesh bounds into the model-level box
    pub fn new(
        meshes: Vec<Mesh>,
        nodes: Vec<Node>,
        materials: Vec<Material>,
        animations: Vec<AnimationClip>,
    ) -> Self {
        let mut bounds = BoundingBox::empty();
        for mesh in &meshes {
            bounds.merge(&mesh.bounds);
        }
        Self {
            meshes,
            nodes,
            materials,
            animations,
            model_matrix: Mat4::identity(),
            bounds,
            visible: true,
            active_clip: None,
        }
    }

    /// Number of animation clips this model ships with
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// True if any mesh is rigged and at least one clip exists
    pub fn is_animated(&self) -> bool {
        !self.animations.is_empty() && self.meshes.iter().any(Mesh::is_rigged)
    }

    /// Composed world matrix for one of this model's meshes
    pub fn mesh_world_matrix(&self, mesh: &Mesh) -> Mat4 {
        mesh.local_matrix * self.model_matrix
    }
}
