//! Turns a parsed [`SceneDocument`] into a runtime [`Model`]
//!
//! The document's node tree is flattened into the pre-order array the
//! animation evaluator walks, meshes are collected in traversal order, and
//! skinning data is folded into per-mesh bone registries.

use crate::animation::{evaluate_bind_pose, AnimationClip, BoneRegistry};
use crate::assets::import_data::{DocumentMesh, DocumentNode, SceneDocument};
use crate::assets::ImportError;
use crate::scene::{Material, Mesh, Model, Node, Vertex};

/// Build a model from a scene document
///
/// Fails with [`ImportError::MissingRoot`] when the document has no node
/// tree and with [`ImportError::InvalidGeometry`] when a mesh is internally
/// inconsistent. The returned model already has its bind pose evaluated, so
/// it can be drawn before the first animation update.
pub fn build_model(document: SceneDocument) -> Result<Model, ImportError> {
    let root = document.root.ok_or(ImportError::MissingRoot)?;

    let mut nodes = Vec::new();
    let mut mesh_refs = Vec::new();
    flatten_node(root, None, &mut nodes, &mut mesh_refs);

    let mut meshes = Vec::with_capacity(mesh_refs.len());
    for mesh_index in mesh_refs {
        let document_mesh = document.meshes.get(mesh_index).ok_or_else(|| {
            ImportError::InvalidGeometry(format!(
                "node references mesh {mesh_index} but the document has {} meshes",
                document.meshes.len()
            ))
        })?;
        if document_mesh.material_index >= document.materials.len()
            && !document.materials.is_empty()
        {
            log::warn!(
                "Mesh '{}' references material {} out of {}",
                document_mesh.name,
                document_mesh.material_index,
                document.materials.len()
            );
        }
        meshes.push(build_mesh(document_mesh)?);
    }

    let materials = document
        .materials
        .into_iter()
        .map(|material| Material {
            name: material.name,
            texture_paths: material.texture_paths,
        })
        .collect();

    let animations = document
        .animations
        .into_iter()
        .map(|clip| {
            AnimationClip::new(
                clip.name,
                clip.duration_ticks,
                clip.ticks_per_second,
                clip.channels,
            )
        })
        .collect();

    let mut model = Model::new(meshes, nodes, materials, animations);
    evaluate_bind_pose(&mut model);
    Ok(model)
}

/// Flatten the node tree depth-first, parents before children
///
/// Mesh references are recorded as nodes are visited, so mesh order in the
/// built model matches traversal order.
fn flatten_node(
    node: DocumentNode,
    parent: Option<usize>,
    nodes: &mut Vec<Node>,
    mesh_refs: &mut Vec<usize>,
) {
    mesh_refs.extend(node.mesh_indices.iter().copied());
    nodes.push(Node::new(node.name, parent, node.transform));
    let index = nodes.len() - 1;
    for child in node.children {
        flatten_node(child, Some(index), nodes, mesh_refs);
    }
}

fn build_mesh(document_mesh: &DocumentMesh) -> Result<Mesh, ImportError> {
    let vertex_count = document_mesh.positions.len();
    for (attribute, len) in [
        ("normals", document_mesh.normals.len()),
        ("tex_coords", document_mesh.tex_coords.len()),
        ("tangents", document_mesh.tangents.len()),
    ] {
        if len != 0 && len != vertex_count {
            return Err(ImportError::InvalidGeometry(format!(
                "mesh '{}' has {len} {attribute} for {vertex_count} positions",
                document_mesh.name
            )));
        }
    }
    if let Some(&bad) = document_mesh
        .indices
        .iter()
        .find(|&&i| i as usize >= vertex_count)
    {
        return Err(ImportError::InvalidGeometry(format!(
            "mesh '{}' index {bad} exceeds vertex count {vertex_count}",
            document_mesh.name
        )));
    }

    let vertices = (0..vertex_count)
        .map(|i| {
            Vertex::new(
                document_mesh.positions[i],
                document_mesh.normals.get(i).copied().unwrap_or([0.0; 3]),
                document_mesh.tex_coords.get(i).copied().unwrap_or([0.0; 2]),
                document_mesh.tangents.get(i).copied().unwrap_or([0.0; 3]),
            )
        })
        .collect();

    let mut mesh = Mesh::new(
        vertices,
        document_mesh.indices.clone(),
        document_mesh.material_index,
    );
    if !document_mesh.bones.is_empty() {
        mesh.bones = build_bones(document_mesh, vertex_count);
    }
    Ok(mesh)
}

fn build_bones(document_mesh: &DocumentMesh, vertex_count: usize) -> BoneRegistry {
    let mut registry = BoneRegistry::with_vertex_count(vertex_count);
    for bone in &document_mesh.bones {
        let index = registry.register_bone(&bone.name, bone.offset_transform) as u32;
        for influence in &bone.weights {
            registry.add_influence(influence.vertex, index, influence.weight);
        }
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::import_data::{DocumentBone, VertexWeight};
    use crate::foundation::math::{Mat4, Vec3};
    use crate::scene::is_preorder;
    use approx::assert_relative_eq;

    fn triangle_mesh(name: &str) -> DocumentMesh {
        DocumentMesh {
            name: name.to_string(),
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            indices: vec![0, 1, 2],
            ..DocumentMesh::default()
        }
    }

    fn three_level_document() -> SceneDocument {
        let mut root = DocumentNode::new("root");
        let mut torso = DocumentNode::new("torso");
        torso.mesh_indices = vec![0];
        let mut arm = DocumentNode::new("arm");
        arm.mesh_indices = vec![1];
        torso.children.push(arm);
        root.children.push(torso);
        SceneDocument {
            root: Some(root),
            meshes: vec![triangle_mesh("torso_mesh"), triangle_mesh("arm_mesh")],
            ..SceneDocument::default()
        }
    }

    #[test]
    fn builds_preorder_hierarchy() {
        let model = build_model(three_level_document()).unwrap();
        assert!(is_preorder(&model.nodes));
        let names: Vec<_> = model.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["root", "torso", "arm"]);
        assert_eq!(model.nodes[2].parent_index, Some(1));
    }

    #[test]
    fn collects_meshes_in_traversal_order() {
        let mut document = three_level_document();
        // Swap the references: the arm node now points at mesh 0.
        document.root.as_mut().unwrap().children[0].mesh_indices = vec![1];
        document.root.as_mut().unwrap().children[0].children[0].mesh_indices = vec![0];
        let model = build_model(document).unwrap();
        assert_eq!(model.meshes.len(), 2);
        assert_relative_eq!(model.meshes[0].vertices[1].position[0], 1.0);
    }

    #[test]
    fn shared_mesh_reference_is_duplicated() {
        let mut document = three_level_document();
        document.root.as_mut().unwrap().children[0].children[0].mesh_indices = vec![0];
        let model = build_model(document).unwrap();
        assert_eq!(model.meshes.len(), 2);
    }

    #[test]
    fn missing_root_is_an_error() {
        let document = SceneDocument::default();
        assert!(matches!(
            build_model(document),
            Err(ImportError::MissingRoot)
        ));
    }

    #[test]
    fn dangling_mesh_reference_is_invalid() {
        let mut document = three_level_document();
        document.meshes.pop();
        assert!(matches!(
            build_model(document),
            Err(ImportError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn out_of_range_index_is_invalid() {
        let mut document = three_level_document();
        document.meshes[0].indices = vec![0, 1, 7];
        assert!(matches!(
            build_model(document),
            Err(ImportError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn mismatched_attribute_count_is_invalid() {
        let mut document = three_level_document();
        document.meshes[0].normals = vec![[0.0, 1.0, 0.0]];
        assert!(matches!(
            build_model(document),
            Err(ImportError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn skinning_data_reaches_the_registry() {
        let mut document = three_level_document();
        document.meshes[0].bones = vec![DocumentBone {
            name: "torso".to_string(),
            offset_transform: Mat4::identity(),
            weights: vec![
                VertexWeight { vertex: 0, weight: 0.7 },
                VertexWeight { vertex: 1, weight: 0.3 },
            ],
        }];
        let model = build_model(document).unwrap();
        let mesh = &model.meshes[0];
        assert!(mesh.is_rigged());
        assert_eq!(mesh.bones.bone_count(), 1);
        assert_eq!(mesh.bones.vertex_influences()[0].influence_count(), 1);
        assert_relative_eq!(mesh.bones.vertex_influences()[0].weights[0], 0.7);
    }

    #[test]
    fn bind_pose_is_evaluated_at_build_time() {
        let mut document = three_level_document();
        document.root.as_mut().unwrap().children[0].transform =
            Mat4::new_translation(&Vec3::new(0.0, 2.0, 0.0));
        let model = build_model(document).unwrap();
        let world = model.nodes[2].world_transform;
        assert_relative_eq!(world[(1, 3)], 2.0);
    }
}
