//! RON scene document reader
//!
//! Scenes exported by the asset pipeline are RON renderings of
//! [`SceneDocument`]. This module only parses; model construction is the
//! job of [`crate::assets::model_builder`].

use crate::assets::import_data::SceneDocument;
use crate::assets::{model_builder, ImportError};
use crate::scene::Model;
use std::path::Path;

/// Parse a scene document from RON source text
pub fn parse_document(source: &str) -> Result<SceneDocument, ImportError> {
    ron::from_str(source).map_err(|e| ImportError::Parse(e.to_string()))
}

/// Read and parse a scene document from a file
pub fn load_document(path: impl AsRef<Path>) -> Result<SceneDocument, ImportError> {
    let path = path.as_ref();
    log::debug!("Loading scene document from {}", path.display());
    let source = std::fs::read_to_string(path)?;
    parse_document(&source)
}

/// Load a scene file and build it into a model in one step
pub fn load_model(path: impl AsRef<Path>) -> Result<Model, ImportError> {
    model_builder::build_model(load_document(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_scene() {
        let source = r#"(
            root: Some((
                name: "root",
                mesh_indices: [0],
            )),
            meshes: [(
                name: "tri",
                positions: [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)],
                indices: [0, 1, 2],
            )],
            materials: [(name: "flat")],
        )"#;
        let document = parse_document(source).unwrap();
        assert_eq!(document.meshes.len(), 1);
        assert_eq!(document.materials[0].name, "flat");

        let model = model_builder::build_model(document).unwrap();
        assert_eq!(model.meshes.len(), 1);
        assert!(model.bounds.is_initialized());
    }

    #[test]
    fn syntax_error_reports_parse_failure() {
        let result = parse_document("(root: Some((name: )))");
        assert!(matches!(result, Err(ImportError::Parse(_))));
    }

    #[test]
    fn document_round_trips_through_ron() {
        let source = r#"(
            root: Some((name: "root")),
        )"#;
        let document = parse_document(source).unwrap();
        let serialized = ron::to_string(&document).unwrap();
        let reparsed = parse_document(&serialized).unwrap();
        assert_eq!(reparsed.root.unwrap().name, "root");
    }
}
