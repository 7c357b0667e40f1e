//! Rendering interface consumed by backends
//!
//! This crate does not render; it prepares what a renderer needs. The scene
//! side produces per-object visibility flags and per-mesh skinning palettes,
//! [`FrameQueue`] packages them for one frame, and [`RenderBackend`] is the
//! seam a concrete GPU renderer plugs into.

pub mod backend;
pub mod frame;

pub use backend::{HeadlessBackend, RenderBackend, RenderError, RenderPath};
pub use frame::{DrawCall, FrameOptions, FrameQueue};
