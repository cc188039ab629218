//! Camera descriptor

use crate::foundation::math::Vec3;

/// Viewing camera of a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct CameraDescriptor {
    /// Eye position
    pub position: Vec3,
    /// Viewing direction
    pub forward: Vec3,
    /// Up direction
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fovy: f32,
    /// Near clip distance
    pub znear: f32,
    /// Far clip distance
    pub zfar: f32,
    /// Viewport width divided by height
    pub aspect: f32,
}

impl Default for CameraDescriptor {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -3.0, 1.5),
            forward: Vec3::new(0.0, 1.0, -0.5).normalize(),
            up: Vec3::z(),
            fovy: 45.0,
            znear: 0.01,
            zfar: 50.0,
            aspect: 1.0,
        }
    }
}
