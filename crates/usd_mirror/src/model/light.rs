//! Static light and camera definitions

use serde::{Serialize, Deserialize};

/// Static definition of one light in a [`Model`](super::Model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightDef {
    /// Optional human-readable name
    pub name: Option<String>,
    /// Directional light (parallel rays) instead of a spot light
    pub directional: bool,
    /// Initial world position
    pub pos: [f32; 3],
    /// Initial world direction
    pub dir: [f32; 3],
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

impl Default for LightDef {
    fn default() -> Self {
        Self {
            name: None,
            directional: false,
            pos: [0.0, 0.0, 3.0],
            dir: [0.0, 0.0, -1.0],
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

/// Default free camera of a [`Model`](super::Model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDef {
    /// Eye position
    pub position: [f32; 3],
    /// Point the camera looks at
    pub lookat: [f32; 3],
    /// Up hint
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fovy: f32,
    /// Near clip distance
    pub znear: f32,
    /// Far clip distance
    pub zfar: f32,
}

impl Default for CameraDef {
    fn default() -> Self {
        Self {
            position: [0.0, -3.0, 1.5],
            lookat: [0.0, 0.0, 0.0],
            up: [0.0, 0.0, 1.0],
            fovy: 45.0,
            znear: 0.01,
            zfar: 50.0,
        }
    }
}
