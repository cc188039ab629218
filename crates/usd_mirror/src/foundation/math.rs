//! Math utilities and types
//!
//! Provides the math types shared by snapshots, poses and USD transforms.
//! Snapshot data is single precision; simulation state and USD matrices are
//! double precision.

pub use nalgebra::{
    Vector3,
    Matrix3, Matrix4, Rotation3,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Double precision 3D vector (simulation state)
pub type Vec3d = Vector3<f64>;

/// Double precision 3x3 matrix (simulation state)
pub type Mat3d = Matrix3<f64>;

/// Double precision 4x4 matrix (USD `matrix4d`)
pub type Mat4d = Matrix4<f64>;

/// Transform representing position, rotation, and scale
///
/// The rotation is a column-vector rotation matrix: `world = R * local`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation matrix
    pub rotation: Mat3,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Mat3::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Mat3) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Replace the scale factors
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a column-vector transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        let mut matrix = Mat4::identity();
        let linear = self.rotation * Mat3::from_diagonal(&self.scale);
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(&linear);
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.position);
        matrix
    }

    /// Convert to a USD `matrix4d`
    ///
    /// USD multiplies row vectors on the left, so its matrix is the transpose
    /// of the column-vector form, with the translation in the last row.
    pub fn to_usd_matrix(&self) -> Mat4d {
        self.to_matrix().transpose().map(f64::from)
    }
}

/// Build a rotation whose local -Z axis points along `forward` and whose
/// local +Y axis is as close as possible to `up_hint`.
///
/// This is the orientation convention USD uses for cameras and lights.
/// When `up_hint` is parallel to `forward` a fallback hint is used.
pub fn look_rotation(forward: &Vec3, up_hint: &Vec3) -> Mat3 {
    let forward = forward
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(|| Vec3::new(0.0, 0.0, -1.0));

    let mut right = forward.cross(up_hint);
    if right.norm_squared() < 1e-12 {
        let fallback = if forward.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
        right = forward.cross(&fallback);
    }
    let right = right.normalize();
    let up = right.cross(&forward);

    Mat3::from_columns(&[right, up, -forward])
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_identity_usd_matrix() {
        let matrix = Transform::identity().to_usd_matrix();
        assert_relative_eq!(matrix, Mat4d::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_usd_matrix_places_translation_in_last_row() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let matrix = transform.to_usd_matrix();

        assert_relative_eq!(matrix[(3, 0)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(matrix[(3, 1)], 2.0, epsilon = 1e-6);
        assert_relative_eq!(matrix[(3, 2)], 3.0, epsilon = 1e-6);
        assert_relative_eq!(matrix[(3, 3)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(matrix[(0, 3)], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_usd_matrix_rows_are_scaled_axes() {
        // 90 degrees about Z: local X maps to world Y
        let rotation = Mat3::new(
            0.0, -1.0, 0.0,
            1.0, 0.0, 0.0,
            0.0, 0.0, 1.0,
        );
        let transform = Transform::from_position_rotation(Vec3::zeros(), rotation)
            .with_scale(Vec3::new(2.0, 3.0, 4.0));
        let matrix = transform.to_usd_matrix();

        // Row 0 is the image of local X, scaled by 2
        assert_relative_eq!(matrix[(0, 0)], 0.0, epsilon = 1e-6);
        assert_relative_eq!(matrix[(0, 1)], 2.0, epsilon = 1e-6);
        // Row 1 is the image of local Y, scaled by 3
        assert_relative_eq!(matrix[(1, 0)], -3.0, epsilon = 1e-6);
        assert_relative_eq!(matrix[(1, 1)], 0.0, epsilon = 1e-6);
        // Row 2 is local Z, scaled by 4
        assert_relative_eq!(matrix[(2, 2)], 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_look_rotation_points_negative_z_forward() {
        let forward = Vec3::new(1.0, 0.0, 0.0);
        let rotation = look_rotation(&forward, &Vec3::z());

        assert_relative_eq!(rotation * Vec3::new(0.0, 0.0, -1.0), forward, epsilon = EPSILON);
        assert_relative_eq!(rotation * Vec3::y(), Vec3::z(), epsilon = EPSILON);
        assert_relative_eq!(rotation.determinant(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_look_rotation_handles_parallel_up() {
        let forward = Vec3::new(0.0, 0.0, -1.0);
        let rotation = look_rotation(&forward, &Vec3::z());

        assert_relative_eq!(rotation * Vec3::new(0.0, 0.0, -1.0), forward, epsilon = EPSILON);
        assert_relative_eq!(rotation.determinant(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_degree_conversion() {
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI, epsilon = EPSILON);
    }
}
