//! Math utilities and types
//!
//! Provides fundamental math types for 3D scene and animation work.

pub use nalgebra::{
    Matrix3, Matrix4,
    Quaternion,
    Unit, UnitQuaternion,
    Vector3, Vector4,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Transform representing translation, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Translation in 3D space
    pub translation: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform from its three components
    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Create a transform with only a translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Decompose a TRS matrix back into its components.
    ///
    /// Assumes the matrix was built from translation, rotation and positive
    /// scale; shear and negative scale are not recovered.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let translation = Vec3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]);

        let scale = Vec3::new(
            matrix.fixed_view::<3, 1>(0, 0).norm(),
            matrix.fixed_view::<3, 1>(0, 1).norm(),
            matrix.fixed_view::<3, 1>(0, 2).norm(),
        );

        let mut rotation_matrix: Matrix3<f32> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        for (column, factor) in scale.iter().enumerate() {
            if *factor > f32::EPSILON {
                let unscaled = rotation_matrix.column(column) / *factor;
                rotation_matrix.set_column(column, &unscaled);
            }
        }
        let rotation = Quat::from_matrix(&rotation_matrix);

        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Convert to a transformation matrix (translation, then rotation, then scale)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.translation)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_transform_is_identity_matrix() {
        let t = Transform::identity();
        assert_relative_eq!(t.to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_transform_composition_order() {
        // Scale is applied before rotation, rotation before translation.
        let t = Transform::new(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_axis_angle(&Vector3::z_axis(), std::f32::consts::FRAC_PI_2),
            Vec3::new(2.0, 2.0, 2.0),
        );
        let p = t.to_matrix().transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        // (1,0,0) scaled to (2,0,0), rotated to (0,2,0), translated to (1,2,0)
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_from_matrix_recovers_trs_components() {
        let original = Transform::new(
            Vec3::new(3.0, -1.0, 2.0),
            Quat::from_axis_angle(&Vector3::y_axis(), 0.7),
            Vec3::new(2.0, 0.5, 1.5),
        );
        let recovered = Transform::from_matrix(&original.to_matrix());

        assert_relative_eq!(recovered.translation, original.translation, epsilon = 1e-5);
        assert_relative_eq!(recovered.scale, original.scale, epsilon = 1e-5);
        assert_relative_eq!(
            recovered.rotation.angle_to(&original.rotation),
            0.0,
            epsilon = 1e-4
        );
    }
}
