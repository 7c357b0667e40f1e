//! Scene document types delivered by an importer
//!
//! This is the already-parsed scene graph the core consumes: a single-rooted
//! node tree, meshes with optional skinning data, materials as texture path
//! lists, and animation clips. Format parsers (glTF, OBJ, ...) live outside
//! the core and target these types; the bundled RON reader in
//! [`crate::assets::scene_loader`] is one such producer.

use crate::animation::AnimationChannel;
use crate::foundation::math::Mat4;
use serde::{Deserialize, Serialize};

fn identity_matrix() -> Mat4 {
    Mat4::identity()
}

/// A complete imported scene, ready to be built into a model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Root of the node tree; a document without one is malformed
    #[serde(default)]
    pub root: Option<DocumentNode>,

    /// Meshes referenced by the node tree
    #[serde(default)]
    pub meshes: Vec<DocumentMesh>,

    /// Materials referenced by the meshes
    #[serde(default)]
    pub materials: Vec<DocumentMaterial>,

    /// Animation clips shipped with the scene
    #[serde(default)]
    pub animations: Vec<DocumentClip>,
}

/// One node of the imported tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Node name; animation channels target nodes by this name
    pub name: String,

    /// Local bind-pose transform relative to the parent
    #[serde(default = "identity_matrix")]
    pub transform: Mat4,

    /// Indices into [`SceneDocument::meshes`] attached to this node
    #[serde(default)]
    pub mesh_indices: Vec<usize>,

    /// Child nodes
    #[serde(default)]
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    /// Create a leaf node with an identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::identity(),
            mesh_indices: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// Mesh geometry plus optional skinning data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMesh {
    /// Mesh name, for diagnostics only
    #[serde(default)]
    pub name: String,

    /// Vertex positions; the only mandatory attribute
    pub positions: Vec<[f32; 3]>,

    /// Vertex normals; empty or one per position
    #[serde(default)]
    pub normals: Vec<[f32; 3]>,

    /// Texture coordinates; empty or one per position
    #[serde(default)]
    pub tex_coords: Vec<[f32; 2]>,

    /// Tangents; empty or one per position
    #[serde(default)]
    pub tangents: Vec<[f32; 3]>,

    /// Triangle indices into the position array
    #[serde(default)]
    pub indices: Vec<u32>,

    /// Index into [`SceneDocument::materials`]
    #[serde(default)]
    pub material_index: usize,

    /// Bones influencing this mesh; empty for unrigged meshes
    #[serde(default)]
    pub bones: Vec<DocumentBone>,
}

/// One bone of a rigged mesh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentBone {
    /// Name of the hierarchy node this bone follows
    pub name: String,

    /// Inverse bind-pose matrix
    #[serde(default = "identity_matrix")]
    pub offset_transform: Mat4,

    /// Per-vertex influences of this bone
    #[serde(default)]
    pub weights: Vec<VertexWeight>,
}

/// A single (vertex, weight) influence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexWeight {
    /// Index of the influenced vertex
    pub vertex: usize,

    /// Influence weight as authored
    pub weight: f32,
}

/// Material description: a name and the texture paths it references
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMaterial {
    /// Material name
    #[serde(default)]
    pub name: String,

    /// Texture file paths, resolved by the resource layer
    #[serde(default)]
    pub texture_paths: Vec<String>,
}

/// An animation clip as imported
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentClip {
    /// Clip name
    pub name: String,

    /// Clip length in ticks
    pub duration_ticks: f32,

    /// Tick rate hint; 0 means unspecified
    #[serde(default)]
    pub ticks_per_second: f32,

    /// Keyframe channels, one per animated node
    #[serde(default)]
    pub channels: Vec<AnimationChannel>,
}
