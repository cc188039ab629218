//! Light descriptors

use crate::foundation::math::Vec3;

/// Pose and emission of one light in a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct LightDescriptor {
    /// World position
    pub pos: Vec3,
    /// World direction the light points to
    pub dir: Vec3,
    /// Directional light (parallel rays)
    pub directional: bool,
    /// Diffuse color
    pub diffuse: [f32; 3],
    /// Ambient color
    pub ambient: [f32; 3],
    /// Specular color
    pub specular: [f32; 3],
    /// Constant, linear and quadratic attenuation
    pub attenuation: [f32; 3],
    /// Spot cutoff angle in degrees
    pub cutoff: f32,
    /// Spot exponent
    pub exponent: f32,
    /// Intensity multiplier
    pub intensity: f32,
    /// Whether the light casts shadows
    pub cast_shadow: bool,
}

impl Default for LightDescriptor {
    fn default() -> Self {
        Self {
            pos: Vec3::zeros(),
            dir: Vec3::new(0.0, 0.0, -1.0),
            directional: false,
            diffuse: [0.7, 0.7, 0.7],
            ambient: [0.0, 0.0, 0.0],
            specular: [0.3, 0.3, 0.3],
            attenuation: [1.0, 0.0, 0.0],
            cutoff: 45.0,
            exponent: 10.0,
            intensity: 1.0,
            cast_shadow: true,
        }
    }
}
