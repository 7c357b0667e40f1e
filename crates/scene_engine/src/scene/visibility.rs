//! View-frustum culling
//!
//! The culler transforms each bounding box's two homogeneous extremes by the
//! owning object's world matrix and hands them to a [`CullingVolume`] — the
//! camera-side predicate deciding inside/outside. Model-level and mesh-level
//! boxes are tested independently every frame; culling only writes visibility
//! flags and never feeds back into animation (invisible models still animate).

use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::scene::Model;

/// Plane defined by normal and distance from origin
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Normal vector (normalized)
    pub normal: Vec3,

    /// Distance from origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a new plane from a normal and a distance
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self {
            normal: normal.normalize(),
            distance,
        }
    }

    /// Signed distance from the plane to a point; positive is inside
    pub fn distance_to_point(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Camera-side visibility predicate consumed by the culler.
///
/// Takes the two transformed box extremes as homogeneous points (w = 1, in
/// any per-axis order, since a rotation may swap corners) and reports whether
/// any part of the box may be visible.
pub trait CullingVolume {
    /// True if the box spanned by the two points is at least partly inside
    fn contains_bounds(&self, a: &Vec4, b: &Vec4) -> bool;
}

/// Camera frustum as six inward-facing planes
#[derive(Debug, Clone)]
pub struct Frustum {
    /// Left, right, bottom, top, near, far
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract frustum planes from a combined view-projection matrix.
    ///
    /// Gribb & Hartmann, "Fast Extraction of Viewing Frustum Planes from the
    /// World-View-Projection Matrix". Assumes OpenGL-style clip space
    /// (z in [-1, 1]), which is what nalgebra's `Perspective3` produces.
    pub fn from_view_projection(view_projection: &Mat4) -> Self {
        let m = view_projection;
        let rows: [nalgebra::RowVector4<f32>; 4] = [
            m.row(0).into_owned(),
            m.row(1).into_owned(),
            m.row(2).into_owned(),
            m.row(3).into_owned(),
        ];

        let planes = [
            Self::extract_plane(rows[3] + rows[0]), // left
            Self::extract_plane(rows[3] - rows[0]), // right
            Self::extract_plane(rows[3] + rows[1]), // bottom
            Self::extract_plane(rows[3] - rows[1]), // top
            Self::extract_plane(rows[3] + rows[2]), // near
            Self::extract_plane(rows[3] - rows[2]), // far
        ];
        Self { planes }
    }

    fn extract_plane(row: nalgebra::RowVector4<f32>) -> Plane {
        let normal = Vec3::new(row[0], row[1], row[2]);
        let length = normal.norm();
        if length <= f32::EPSILON {
            // Degenerate row; a plane that rejects nothing.
            return Plane {
                normal: Vec3::new(0.0, 0.0, 1.0),
                distance: f32::MAX,
            };
        }
        Plane {
            normal: normal / length,
            distance: row[3] / length,
        }
    }
}

impl CullingVolume for Frustum {
    fn contains_bounds(&self, a: &Vec4, b: &Vec4) -> bool {
        // A transformed "min"/"max" pair may be swapped per axis.
        let min = Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z));
        let max = Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z));

        for plane in &self.planes {
            // The box corner furthest along the plane normal; if even that
            // corner is outside, the whole box is.
            let far_corner = Vec3::new(
                if plane.normal.x >= 0.0 { max.x } else { min.x },
                if plane.normal.y >= 0.0 { max.y } else { min.y },
                if plane.normal.z >= 0.0 { max.z } else { min.z },
            );
            if plane.distance_to_point(&far_corner) < 0.0 {
                return false;
            }
        }
        // Inside or straddling: conservative inclusion.
        true
    }
}

/// Update a model's visibility flags against a culling volume.
///
/// The model-level box is transformed by the model matrix, each mesh-level
/// box by the mesh offset composed with the model matrix; every level is
/// tested independently. Uninitialized boxes (empty meshes, mesh-less
/// models) are never culled.
pub fn update_visibility(model: &mut Model, volume: &dyn CullingVolume) {
    model.visible = if model.bounds.is_initialized() {
        let (min, max) = model.bounds.transformed_extremes(&model.model_matrix);
        volume.contains_bounds(&min, &max)
    } else {
        true
    };

    let model_matrix = model.model_matrix;
    for mesh in &mut model.meshes {
        mesh.visible = if mesh.bounds.is_initialized() {
            let world = mesh.local_matrix * model_matrix;
            let (min, max) = mesh.bounds.transformed_extremes(&world);
            volume.contains_bounds(&min, &max)
        } else {
            true
        };
    }
}
