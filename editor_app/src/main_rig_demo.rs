//! Rig demo: a procedurally built two-bone arm waving among scattered props
//!
//! Everything is generated in code; no scene file is needed. The demo logs
//! how many props survive culling each second and where the arm's bone
//! palette ends up.

use rand::Rng;
use scene_engine::animation::{AnimationChannel, AnimationClip, Keyframe};
use scene_engine::foundation::math::{Mat4, Quat, Vec3};
use scene_engine::foundation::time::Timer;
use scene_engine::prelude::*;
use scene_engine::scene::{Mesh, Node, Vertex};

const PROP_COUNT: usize = 64;
const DEMO_SECONDS: f32 = 10.0;

fn main() {
    scene_engine::foundation::logging::init();

    let mut scene = SceneManager::new();
    let arm_key = scene.insert_model(build_arm());
    scene.set_active_clip(arm_key, Some(0));

    let mut rng = rand::thread_rng();
    for _ in 0..PROP_COUNT {
        let mut prop = build_prop();
        // Scatter props in a shell around the camera; roughly half should
        // land outside the view frustum.
        prop.model_matrix = Mat4::new_translation(&Vec3::new(
            rng.gen_range(-40.0..40.0),
            rng.gen_range(-40.0..40.0),
            rng.gen_range(-60.0..60.0),
        ));
        scene.insert_model(prop);
    }

    let projection =
        nalgebra::Perspective3::new(16.0 / 9.0, std::f32::consts::FRAC_PI_4, 0.1, 200.0);
    let frustum = Frustum::from_view_projection(&projection.to_homogeneous());

    let mut backend = HeadlessBackend::default();
    let mut timer = Timer::new();
    let mut last_report = 0u32;

    while timer.total_time() < DEMO_SECONDS {
        timer.update();
        scene.update(timer.total_time(), &frustum);

        let queue = scene.frame_queue(FrameOptions::empty());
        if let Err(error) = backend.submit(&queue) {
            log::error!("Render submission failed: {error}");
            break;
        }

        let second = timer.total_time() as u32;
        if second > last_report {
            last_report = second;
            let visible = scene.models().filter(|m| m.visible).count();
            log::info!(
                "t={second}s: {visible}/{} models visible, {} draws",
                scene.model_count(),
                queue.len()
            );
            if let Some(arm) = scene.model(arm_key) {
                for (index, bone) in arm.meshes[0].bones.bones().iter().enumerate() {
                    let translation = bone.final_transform.column(3);
                    log::info!(
                        "  bone {index}: final translation ({:.2}, {:.2}, {:.2})",
                        translation[0],
                        translation[1],
                        translation[2]
                    );
                }
            }
        }

        std::thread::sleep(std::time::Duration::from_millis(16));
    }

    log::info!(
        "Rig demo done: {} frames, {} draws",
        backend.frame_count(),
        backend.draw_count()
    );
}

/// Two-bone arm: a shoulder node with a forearm child, one skinned quad strip
fn build_arm() -> Model {
    let nodes = vec![
        Node::new("shoulder", None, Mat4::identity()),
        Node::new(
            "forearm",
            Some(0),
            Mat4::new_translation(&Vec3::new(1.0, 0.0, 0.0)),
        ),
    ];

    // Strip of four vertices along +X, split between the two bones.
    let vertices = vec![
        Vertex::from_position([0.0, 0.0, 0.0]),
        Vertex::from_position([0.5, 0.2, 0.0]),
        Vertex::from_position([1.0, 0.0, 0.0]),
        Vertex::from_position([2.0, 0.0, 0.0]),
    ];
    let mut mesh = Mesh::new(vertices, vec![0, 1, 2, 1, 2, 3], 0);

    let mut bones = BoneRegistry::with_vertex_count(4);
    let shoulder = bones.register_bone("shoulder", Mat4::identity()) as u32;
    let forearm = bones.register_bone(
        "forearm",
        Mat4::new_translation(&Vec3::new(-1.0, 0.0, 0.0)),
    ) as u32;
    bones.add_influence(0, shoulder, 1.0);
    bones.add_influence(1, shoulder, 0.6);
    bones.add_influence(1, forearm, 0.4);
    bones.add_influence(2, forearm, 1.0);
    bones.add_influence(3, forearm, 1.0);
    mesh.bones = bones;

    // The forearm waves back and forth around Z over a two-second loop.
    let wave = AnimationChannel {
        target: "forearm".to_string(),
        position_keys: vec![Keyframe {
            time: 0.0,
            value: Vec3::new(1.0, 0.0, 0.0),
        }],
        rotation_keys: vec![
            Keyframe {
                time: 0.0,
                value: Quat::identity(),
            },
            Keyframe {
                time: 25.0,
                value: Quat::from_axis_angle(&Vec3::z_axis(), std::f32::consts::FRAC_PI_3),
            },
            Keyframe {
                time: 50.0,
                value: Quat::identity(),
            },
        ],
        scale_keys: vec![Keyframe {
            time: 0.0,
            value: Vec3::new(1.0, 1.0, 1.0),
        }],
    };
    let clip = AnimationClip::new("wave", 50.0, 25.0, vec![wave]);

    let mut model = Model::new(vec![mesh], nodes, vec![], vec![clip]);
    model.model_matrix = Mat4::new_translation(&Vec3::new(0.0, 0.0, -8.0));
    model
}

/// Static unit-cube prop
fn build_prop() -> Model {
    let vertices = vec![
        Vertex::from_position([-0.5, -0.5, -0.5]),
        Vertex::from_position([0.5, 0.5, 0.5]),
    ];
    let mesh = Mesh::new(vertices, vec![], 0);
    Model::new(
        vec![mesh],
        vec![Node::new("prop", None, Mat4::identity())],
        vec![],
        vec![],
    )
}
