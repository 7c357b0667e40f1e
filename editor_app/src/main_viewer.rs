//! Scene viewer: loads a RON scene in the background and plays it back
//!
//! Usage: `viewer [scene.ron] [config.toml]`

use scene_engine::config::{Config, EditorConfig};
use scene_engine::foundation::time::Timer;
use scene_engine::prelude::*;
use scene_engine::scene::SceneConfig;

const FRAME_BUDGET: u64 = 600;

fn main() {
    scene_engine::foundation::logging::init();

    let mut args = std::env::args().skip(1);
    let scene_path = args
        .next()
        .unwrap_or_else(|| "editor_app/assets/demo_scene.ron".to_string());
    let config = match args.next() {
        Some(path) => match EditorConfig::load_from_file(&path) {
            Ok(config) => config,
            Err(error) => {
                log::warn!("Failed to load config {path}: {error}, using defaults");
                EditorConfig::default()
            }
        },
        None => EditorConfig::default(),
    };

    log::info!("Loading scene: {scene_path}");
    let mut scene = SceneManager::with_config(SceneConfig {
        enable_culling: config.scene.enable_culling,
    });
    scene.queue_import(ImportJob::spawn_file(&scene_path));

    let projection =
        nalgebra::Perspective3::new(16.0 / 9.0, std::f32::consts::FRAC_PI_4, 0.1, 500.0);
    let frustum = Frustum::from_view_projection(&projection.to_homogeneous());

    let mut backend = HeadlessBackend::default();
    let mut timer = Timer::new();

    for _ in 0..FRAME_BUDGET {
        timer.update();

        for key in scene.poll_imports() {
            if let Some(model) = scene.model(key) {
                log::info!(
                    "Scene ready: {} nodes, {} meshes, {} clips",
                    model.nodes.len(),
                    model.meshes.len(),
                    model.animation_count()
                );
                if model.is_animated() {
                    scene.set_active_clip(key, Some(config.playback.default_clip));
                }
            }
        }

        scene.update(timer.total_time() * config.playback.speed, &frustum);
        let queue = scene.frame_queue(FrameOptions::empty());
        if let Err(error) = backend.submit(&queue) {
            log::error!("Render submission failed: {error}");
            break;
        }

        if timer.frame_count() % 120 == 0 {
            log::info!(
                "frame {}: {} draws, {} models, {:.1} ms",
                timer.frame_count(),
                queue.len(),
                scene.model_count(),
                timer.delta_time() * 1000.0
            );
        }

        std::thread::sleep(std::time::Duration::from_millis(16));
    }

    log::info!(
        "Viewer exiting after {} frames, {} draws submitted",
        backend.frame_count(),
        backend.draw_count()
    );
}
