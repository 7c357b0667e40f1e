//! Scene ownership and the per-frame update sequence
//!
//! The manager owns every model in the scene behind stable [`ModelKey`]
//! handles, drives animation and visibility once per frame, and hands the
//! renderer a [`FrameQueue`] of what survived culling. Background imports
//! are parked here until their worker finishes.

use crate::animation::{evaluate_bind_pose, evaluate_clip};
use crate::assets::ImportJob;
use crate::render::{FrameOptions, FrameQueue};
use crate::scene::{update_visibility, CullingVolume, Model};
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a model owned by the scene manager
    pub struct ModelKey;
}

/// Tunables for the per-frame scene update
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// When false, every model and mesh is marked visible each frame
    pub enable_culling: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            enable_culling: true,
        }
    }
}

/// Owner of all scene models and pending imports
#[derive(Default)]
pub struct SceneManager {
    config: SceneConfig,
    models: SlotMap<ModelKey, Model>,
    pending_imports: Vec<ImportJob>,
}

impl SceneManager {
    /// Create an empty scene with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene with explicit settings
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Add a model to the scene
    pub fn insert_model(&mut self, model: Model) -> ModelKey {
        self.models.insert(model)
    }

    /// Remove a model, returning it if the key was live
    pub fn remove_model(&mut self, key: ModelKey) -> Option<Model> {
        self.models.remove(key)
    }

    /// Borrow a model
    pub fn model(&self, key: ModelKey) -> Option<&Model> {
        self.models.get(key)
    }

    /// Mutably borrow a model
    pub fn model_mut(&mut self, key: ModelKey) -> Option<&mut Model> {
        self.models.get_mut(key)
    }

    /// Iterate over all models
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    /// Number of models currently in the scene
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Select which clip a model plays; `None` returns it to the bind pose
    pub fn set_active_clip(&mut self, key: ModelKey, clip: Option<usize>) {
        if let Some(model) = self.models.get_mut(key) {
            model.active_clip = clip;
        } else {
            log::warn!("set_active_clip on a dead model key");
        }
    }

    /// Park a background import until it completes
    pub fn queue_import(&mut self, job: ImportJob) {
        self.pending_imports.push(job);
    }

    /// Number of imports still in flight
    pub fn pending_import_count(&self) -> usize {
        self.pending_imports.len()
    }

    /// Collect finished imports into the scene
    ///
    /// Successful imports become scene models and their keys are returned;
    /// failures are logged and dropped. Jobs still running stay parked.
    pub fn poll_imports(&mut self) -> Vec<ModelKey> {
        let mut arrived = Vec::new();
        let mut still_pending = Vec::new();
        for mut job in self.pending_imports.drain(..) {
            match job.try_take() {
                Some(Ok(model)) => {
                    log::info!(
                        "Import finished: {} meshes, {} clips",
                        model.meshes.len(),
                        model.animation_count()
                    );
                    arrived.push(self.models.insert(model));
                }
                Some(Err(error)) => log::error!("Import failed: {error}"),
                None => still_pending.push(job),
            }
        }
        self.pending_imports = still_pending;
        arrived
    }

    /// Run one frame of scene work: animation first, then visibility
    ///
    /// Every model with an active clip is evaluated against `seconds`
    /// regardless of whether it ended the last frame visible, so skinning
    /// palettes are never stale when a model re-enters the frustum.
    pub fn update(&mut self, seconds: f32, volume: &dyn CullingVolume) {
        for model in self.models.values_mut() {
            match model.active_clip {
                Some(clip) => evaluate_clip(model, clip, seconds),
                None => evaluate_bind_pose(model),
            }
            if self.config.enable_culling {
                update_visibility(model, volume);
            } else {
                model.visible = true;
                for mesh in &mut model.meshes {
                    mesh.visible = true;
                }
            }
        }
    }

    /// Gather the draw calls for everything that survived culling
    pub fn frame_queue(&self, options: FrameOptions) -> FrameQueue<'_> {
        FrameQueue::gather(self.models.values(), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationChannel, AnimationClip, Keyframe};
    use crate::foundation::math::{Mat4, Quat, Vec3};
    use crate::scene::{Frustum, Mesh, Node, Vertex};
    use approx::assert_relative_eq;
    use nalgebra::Perspective3;

    fn test_frustum() -> Frustum {
        let projection = Perspective3::new(16.0 / 9.0, std::f32::consts::FRAC_PI_4, 0.1, 100.0);
        Frustum::from_view_projection(&projection.to_homogeneous())
    }

    fn unit_cube_mesh() -> Mesh {
        let corners = [
            [-0.5, -0.5, -0.5],
            [0.5, 0.5, 0.5],
        ];
        let vertices = corners.iter().map(|&p| Vertex::from_position(p)).collect();
        Mesh::new(vertices, vec![], 0)
    }

    fn animated_model() -> Model {
        let mut mesh = unit_cube_mesh();
        mesh.bones.register_bone("root", Mat4::identity());
        let channel = AnimationChannel {
            target: "root".to_string(),
            position_keys: vec![
                Keyframe { time: 0.0, value: Vec3::zeros() },
                Keyframe { time: 10.0, value: Vec3::new(10.0, 0.0, 0.0) },
            ],
            rotation_keys: vec![Keyframe { time: 0.0, value: Quat::identity() }],
            scale_keys: vec![Keyframe { time: 0.0, value: Vec3::new(1.0, 1.0, 1.0) }],
        };
        let clip = AnimationClip::new("slide", 10.0, 1.0, vec![channel]);
        let mut model = Model::new(
            vec![mesh],
            vec![Node::new("root", None, Mat4::identity())],
            vec![],
            vec![clip],
        );
        model.active_clip = Some(0);
        model
    }

    #[test]
    fn invisible_models_still_animate() {
        let mut manager = SceneManager::new();
        let mut model = animated_model();
        // Park the model far behind the camera so culling rejects it.
        model.model_matrix = Mat4::new_translation(&Vec3::new(0.0, 0.0, 500.0));
        let key = manager.insert_model(model);

        let frustum = test_frustum();
        manager.update(5.0, &frustum);

        let model = manager.model(key).unwrap();
        assert!(!model.visible);
        // Node world transform advanced to the clip midpoint anyway.
        assert_relative_eq!(model.nodes[0].world_transform[(0, 3)], 5.0);
    }

    #[test]
    fn frame_queue_skips_culled_models() {
        let mut manager = SceneManager::new();
        let mut in_view = animated_model();
        in_view.model_matrix = Mat4::new_translation(&Vec3::new(0.0, 0.0, -10.0));
        let mut behind = animated_model();
        behind.model_matrix = Mat4::new_translation(&Vec3::new(0.0, 0.0, 500.0));
        manager.insert_model(in_view);
        manager.insert_model(behind);

        let frustum = test_frustum();
        manager.update(0.0, &frustum);

        assert_eq!(manager.frame_queue(FrameOptions::empty()).len(), 1);
        assert_eq!(manager.frame_queue(FrameOptions::SKIP_CULLING).len(), 2);
    }

    #[test]
    fn disabling_culling_marks_everything_visible() {
        let mut manager = SceneManager::with_config(SceneConfig {
            enable_culling: false,
        });
        let mut model = animated_model();
        model.model_matrix = Mat4::new_translation(&Vec3::new(0.0, 0.0, 500.0));
        let key = manager.insert_model(model);

        let frustum = test_frustum();
        manager.update(0.0, &frustum);
        assert!(manager.model(key).unwrap().visible);
    }

    #[test]
    fn clearing_the_active_clip_restores_bind_pose() {
        let mut manager = SceneManager::new();
        let key = manager.insert_model(animated_model());
        let frustum = test_frustum();

        manager.update(5.0, &frustum);
        assert_relative_eq!(
            manager.model(key).unwrap().nodes[0].world_transform[(0, 3)],
            5.0
        );

        manager.set_active_clip(key, None);
        manager.update(5.0, &frustum);
        assert_relative_eq!(
            manager.model(key).unwrap().nodes[0].world_transform[(0, 3)],
            0.0
        );
    }

    #[test]
    fn poll_imports_publishes_finished_models() {
        use crate::assets::{DocumentNode, ImportJob, SceneDocument};

        let mut manager = SceneManager::new();
        let job = ImportJob::spawn(|| {
            Ok(SceneDocument {
                root: Some(DocumentNode::new("root")),
                ..SceneDocument::default()
            })
        });
        manager.queue_import(job);

        let mut keys = Vec::new();
        for _ in 0..500 {
            keys = manager.poll_imports();
            if !keys.is_empty() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        assert_eq!(keys.len(), 1);
        assert_eq!(manager.pending_import_count(), 0);
        assert!(manager.model(keys[0]).is_some());
    }
}
