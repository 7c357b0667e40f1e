//! Flat, parent-indexed node hierarchy
//!
//! Imported node trees are flattened into a contiguous array in pre-order:
//! every node's parent sits at a strictly smaller index and the root has no
//! parent. Walking the array front to back therefore always visits parents
//! before children, which is what the animation evaluator relies on. Integer
//! parent links also avoid the ownership cycles a pointer-linked tree would
//! create around mutable animation state.

use crate::foundation::math::Mat4;

/// One node of a model's flattened hierarchy
#[derive(Debug, Clone)]
pub struct Node {
    /// Node name from the import; not required to be unique
    pub name: String,

    /// Index of the parent node, `None` for the root.
    /// Invariant: always strictly less than this node's own index.
    pub parent_index: Option<usize>,

    /// Local rest-state transform from the import
    pub local_bind_transform: Mat4,

    /// World transform, recomputed by every animation evaluation
    pub world_transform: Mat4,
}

impl Node {
    /// Create a node in bind pose with an identity world transform
    pub fn new(name: impl Into<String>, parent_index: Option<usize>, local_bind: Mat4) -> Self {
        Self {
            name: name.into(),
            parent_index,
            local_bind_transform: local_bind,
            world_transform: Mat4::identity(),
        }
    }
}

/// Check the pre-order invariant over a flattened node array.
///
/// Returns `true` when every parent index is either absent (root) or strictly
/// smaller than its node's own index.
pub fn is_preorder(nodes: &[Node]) -> bool {
    nodes
        .iter()
        .enumerate()
        .all(|(index, node)| node.parent_index.map_or(true, |parent| parent < index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preorder_check() {
        let good = vec![
            Node::new("root", None, Mat4::identity()),
            Node::new("child", Some(0), Mat4::identity()),
            Node::new("grandchild", Some(1), Mat4::identity()),
        ];
        assert!(is_preorder(&good));

        let bad = vec![
            Node::new("root", None, Mat4::identity()),
            Node::new("child", Some(2), Mat4::identity()),
            Node::new("other", Some(0), Mat4::identity()),
        ];
        assert!(!is_preorder(&bad));
    }
}
