//! Asset import: scene documents, model construction, background workers
//!
//! The import path is `RON file -> SceneDocument -> Model`. Documents are a
//! parser-agnostic interchange shape; the model builder flattens the node
//! tree and wires up skinning, and [`ImportJob`] moves the whole pipeline
//! off the frame loop.

pub mod import_data;
pub mod import_worker;
pub mod model_builder;
pub mod scene_loader;

pub use import_data::{
    DocumentBone, DocumentClip, DocumentMaterial, DocumentMesh, DocumentNode, SceneDocument,
    VertexWeight,
};
pub use import_worker::ImportJob;
pub use model_builder::build_model;
pub use scene_loader::{load_document, load_model, parse_document};

use thiserror::Error;

/// Errors surfaced by the import pipeline
#[derive(Error, Debug)]
pub enum ImportError {
    /// Scene file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scene file is not valid RON for a scene document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Document carries no node tree
    #[error("Scene document has no root node")]
    MissingRoot,

    /// Mesh data is internally inconsistent
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Import was cancelled before the model was built
    #[error("Import cancelled")]
    Cancelled,

    /// Worker thread went away without delivering a result
    #[error("Import worker terminated unexpectedly")]
    WorkerLost,
}
