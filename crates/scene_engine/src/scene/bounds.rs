//! Axis-aligned bounding boxes
//!
//! Boxes are stored as homogeneous points (w = 1) so the two extremes can be
//! pushed through a model matrix directly, which is how the frustum culler
//! consumes them. An explicit `initialized` flag distinguishes "empty" from a
//! degenerate box at the origin.

use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Axis-aligned bounding box with homogeneous extremes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner, w = 1
    pub min_point: Vec4,

    /// Maximum corner, w = 1
    pub max_point: Vec4,

    initialized: bool,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// Create an empty, uninitialized box
    pub fn empty() -> Self {
        Self {
            min_point: Vec4::new(0.0, 0.0, 0.0, 1.0),
            max_point: Vec4::new(0.0, 0.0, 0.0, 1.0),
            initialized: false,
        }
    }

    /// Create a box from explicit corners
    pub fn from_corners(min: Vec3, max: Vec3) -> Self {
        Self {
            min_point: Vec4::new(min.x, min.y, min.z, 1.0),
            max_point: Vec4::new(max.x, max.y, max.z, 1.0),
            initialized: true,
        }
    }

    /// Whether this box has absorbed at least one point or box
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Expand the box to contain a point.
    ///
    /// The first point initializes both corners; later points widen them
    /// per-axis. The result is invariant to point order.
    pub fn expand_point(&mut self, point: Vec3) {
        if !self.initialized {
            *self = Self::from_corners(point, point);
            return;
        }
        self.min_point = Vec4::new(
            self.min_point.x.min(point.x),
            self.min_point.y.min(point.y),
            self.min_point.z.min(point.z),
            1.0,
        );
        self.max_point = Vec4::new(
            self.max_point.x.max(point.x),
            self.max_point.y.max(point.y),
            self.max_point.z.max(point.z),
            1.0,
        );
    }

    /// Fold another box into this one (union).
    ///
    /// Commutative and associative; an uninitialized operand is a no-op.
    pub fn merge(&mut self, other: &BoundingBox) {
        if !other.initialized {
            return;
        }
        if !self.initialized {
            *self = *other;
            return;
        }
        self.min_point = Vec4::new(
            self.min_point.x.min(other.min_point.x),
            self.min_point.y.min(other.min_point.y),
            self.min_point.z.min(other.min_point.z),
            1.0,
        );
        self.max_point = Vec4::new(
            self.max_point.x.max(other.max_point.x),
            self.max_point.y.max(other.max_point.y),
            self.max_point.z.max(other.max_point.z),
            1.0,
        );
    }

    /// Both extremes pushed through a transform.
    ///
    /// Under rotation the results are corners of the transformed box, not
    /// its new min/max; consumers re-derive those per axis.
    pub fn transformed_extremes(&self, matrix: &Mat4) -> (Vec4, Vec4) {
        (matrix * self.min_point, matrix * self.max_point)
    }
}
