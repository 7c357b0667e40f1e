//! Per-frame animation evaluation
//!
//! Walks a model's flattened node array in index order, sampling the active
//! clip per node (or falling back to the node's bind-pose local transform),
//! composing world transforms top-down and writing skinning matrices into
//! every mesh bone registry along the way.
//!
//! Evaluation is a pure function of (node array, clip, time): evaluating the
//! same model at the same time twice produces bit-identical results. It never
//! fails: inconsistent data degrades to bind pose or identity with a logged
//! warning, so a broken asset can never halt rendering.

use crate::foundation::math::Mat4;
use crate::scene::{Mesh, Model, Node};

/// Evaluate one clip of a model at a wall-clock time in seconds.
///
/// A clip index with no corresponding clip falls back to the bind pose; this
/// covers unanimated models and stale editor state alike.
pub fn evaluate_clip(model: &mut Model, clip_index: usize, seconds: f32) {
    let Some(clip) = model.animations.get(clip_index) else {
        evaluate_bind_pose(model);
        return;
    };
    let ticks = clip.ticks_at(seconds);
    propagate(&mut model.nodes, &mut model.meshes, |node| {
        clip.channel(&node.name)
            .map_or(node.local_bind_transform, |channel| {
                channel.sample(ticks).to_matrix()
            })
    });
}

/// Recompute world transforms and skinning matrices from the bind pose alone
pub fn evaluate_bind_pose(model: &mut Model) {
    propagate(&mut model.nodes, &mut model.meshes, |node| {
        node.local_bind_transform
    });
}

/// Walk the node array in order, composing each node's world transform from
/// its parent's (already computed, by the pre-order invariant) and the local
/// transform produced by `local_of`.
fn propagate(nodes: &mut [Node], meshes: &mut [Mesh], local_of: impl Fn(&Node) -> Mat4) {
    for index in 0..nodes.len() {
        let local = local_of(&nodes[index]);
        let parent_world = match nodes[index].parent_index {
            None => Mat4::identity(),
            Some(parent) if parent < index => nodes[parent].world_transform,
            Some(parent) => {
                // Violates the pre-order invariant; must not occur for models
                // built by the hierarchy builder. Degrade instead of halting
                // the frame.
                log::warn!(
                    "node '{}' (index {index}) has out-of-order parent {parent}, using identity",
                    nodes[index].name
                );
                Mat4::identity()
            }
        };
        let world = parent_world * local;
        nodes[index].world_transform = world;

        for mesh in meshes.iter_mut() {
            if let Some(bone) = mesh.bones.bone_index(&nodes[index].name) {
                let offset = mesh.bones.bones()[bone].offset_transform;
                mesh.bones.set_final_transform(bone, world * offset);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationChannel, AnimationClip, Keyframe};
    use crate::foundation::math::{Quat, Vec3};
    use crate::scene::{Mesh, Vertex};
    use approx::assert_relative_eq;

    /// Two-node chain (root -> arm) with one rigged single-vertex mesh whose
    /// only bone follows the "arm" node.
    fn rigged_model(clips: Vec<AnimationClip>) -> Model {
        let mut mesh = Mesh::new(vec![Vertex::from_position([0.0, 0.0, 0.0])], vec![0], 0);
        mesh.bones = crate::animation::BoneRegistry::with_vertex_count(1);
        let bone = mesh
            .bones
            .register_bone("arm", Mat4::new_translation(&Vec3::new(0.0, -1.0, 0.0)));
        mesh.bones.add_influence(0, bone as u32, 1.0);

        let nodes = vec![
            Node::new("root", None, Mat4::new_translation(&Vec3::new(1.0, 0.0, 0.0))),
            Node::new("arm", Some(0), Mat4::new_translation(&Vec3::new(0.0, 1.0, 0.0))),
        ];

        Model::new(vec![mesh], nodes, Vec::new(), clips)
    }

    fn translation_clip(target: &str, x_at_ten: f32) -> AnimationClip {
        let mut channel = AnimationChannel::new(target);
        channel.position_keys = vec![
            Keyframe::new(0.0, Vec3::zeros()),
            Keyframe::new(10.0, Vec3::new(x_at_ten, 0.0, 0.0)),
        ];
        channel.rotation_keys = vec![Keyframe::new(0.0, Quat::identity())];
        channel.scale_keys = vec![Keyframe::new(0.0, Vec3::new(1.0, 1.0, 1.0))];
        // 10 ticks per second: one second spans the whole track.
        AnimationClip::new("test", 10.0, 10.0, vec![channel])
    }

    #[test]
    fn test_bind_pose_composes_parent_chain() {
        let mut model = rigged_model(Vec::new());
        evaluate_bind_pose(&mut model);

        let arm_world = model.nodes[1].world_transform;
        let origin = arm_world.transform_point(&nalgebra::Point3::origin());
        assert_relative_eq!(origin, nalgebra::Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_unanimated_node_keeps_bind_local() {
        // The clip animates only the root; "arm" must keep its bind-pose
        // local transform under the animated parent.
        let clip = translation_clip("root", 4.0);
        let mut model = rigged_model(vec![clip]);

        evaluate_clip(&mut model, 0, 0.5); // 5 ticks -> root at x = 2
        let origin = model.nodes[1]
            .world_transform
            .transform_point(&nalgebra::Point3::origin());
        assert_relative_eq!(origin, nalgebra::Point3::new(2.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_bone_without_channel_gets_bind_world_times_offset() {
        let mut model = rigged_model(Vec::new());
        evaluate_bind_pose(&mut model);

        let expected = model.nodes[1].world_transform
            * Mat4::new_translation(&Vec3::new(0.0, -1.0, 0.0));
        let actual = model.meshes[0].bones.bones()[0].final_transform;
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let clip = translation_clip("arm", 7.0);
        let mut first = rigged_model(vec![clip.clone()]);
        let mut second = rigged_model(vec![clip]);

        evaluate_clip(&mut first, 0, 0.37);
        evaluate_clip(&mut second, 0, 0.37);

        // Bit-identical, not approximately equal.
        assert_eq!(
            first.meshes[0].bones.bones()[0].final_transform,
            second.meshes[0].bones.bones()[0].final_transform
        );
        assert_eq!(
            first.nodes[1].world_transform,
            second.nodes[1].world_transform
        );
    }

    #[test]
    fn test_missing_clip_index_falls_back_to_bind_pose() {
        let mut model = rigged_model(Vec::new());
        evaluate_clip(&mut model, 3, 1.0);

        let origin = model.nodes[1]
            .world_transform
            .transform_point(&nalgebra::Point3::origin());
        assert_relative_eq!(origin, nalgebra::Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_out_of_order_parent_degrades_to_identity() {
        let mut model = rigged_model(Vec::new());
        model.nodes[1].parent_index = Some(5);

        evaluate_bind_pose(&mut model);
        // No panic; the broken node composes against identity.
        let origin = model.nodes[1]
            .world_transform
            .transform_point(&nalgebra::Point3::origin());
        assert_relative_eq!(origin, nalgebra::Point3::new(0.0, 1.0, 0.0));
    }
}
