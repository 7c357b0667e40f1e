//! Backend abstraction for the rendering pipeline
//!
//! The scene core stops at this seam: it produces visibility flags and
//! skinning palettes, a backend consumes them. Concrete GPU backends
//! (multi-pass deferred with ambient occlusion, or a plain forward path)
//! live outside this crate.

use crate::render::FrameQueue;
use thiserror::Error;

/// Rendering paths a backend can implement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    /// Single forward pass, no post-processing
    Basic,

    /// Deferred shading with screen-space ambient occlusion
    DeferredSsao,
}

/// Errors surfaced by a rendering backend
#[derive(Error, Debug)]
pub enum RenderError {
    /// The backend lost its device/context and cannot draw
    #[error("backend device lost: {0}")]
    DeviceLost(String),

    /// A submitted resource was invalid
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),
}

/// Interface every rendering backend implements
///
/// Backends receive a fully-culled [`FrameQueue`] once per frame and own all
/// GPU orchestration behind it.
pub trait RenderBackend {
    /// Which rendering path this backend implements
    fn render_path(&self) -> RenderPath;

    /// Draw one frame from the queue
    fn submit(&mut self, queue: &FrameQueue<'_>) -> Result<(), RenderError>;
}

/// Backend that draws nothing and counts what it would have drawn.
///
/// Used by tests and headless tools to exercise the full scene path without
/// a GPU.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    frames: u64,
    draws: u64,
}

impl HeadlessBackend {
    /// Create a new headless backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames submitted so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Draw calls received across all frames
    pub fn draw_count(&self) -> u64 {
        self.draws
    }
}

impl RenderBackend for HeadlessBackend {
    fn render_path(&self) -> RenderPath {
        RenderPath::Basic
    }

    fn submit(&mut self, queue: &FrameQueue<'_>) -> Result<(), RenderError> {
        self.frames += 1;
        self.draws += queue.len() as u64;
        Ok(())
    }
}
