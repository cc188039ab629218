//! Camera node

use crate::foundation::math::{look_rotation, utils, Transform};
use crate::scene::CameraDescriptor;
use crate::usd::{geom, PrimKey, SdfPath, Stage, UsdError, Value};

/// Vertical film aperture, in tenths of a scene unit
pub const VERTICAL_APERTURE: f32 = 20.955;

/// `Camera` prim following the snapshot camera
#[derive(Debug, Clone)]
pub struct CameraNode {
    prim: PrimKey,
}

impl CameraNode {
    pub(crate) fn define(stage: &mut Stage, path: &SdfPath) -> Result<Self, UsdError> {
        let key = stage.define_prim(path, "Camera")?;
        let prim = stage.expect_prim_mut(key)?;
        prim.set_attribute("projection", Value::token("perspective"))?;
        prim.set_attribute("verticalAperture", Value::Float(VERTICAL_APERTURE))?;
        Ok(Self { prim: key })
    }

    /// Prim owned by this node
    pub fn prim(&self) -> PrimKey {
        self.prim
    }

    /// Refresh pose, lens and clipping range from `camera`
    pub fn refresh(&self, stage: &mut Stage, camera: &CameraDescriptor) -> Result<(), UsdError> {
        let prim = stage.expect_prim_mut(self.prim)?;

        let rotation = look_rotation(&camera.forward, &camera.up);
        let transform = Transform::from_position_rotation(camera.position, rotation);
        geom::set_transform(prim, transform.to_usd_matrix())?;

        prim.set_attribute("focalLength", Value::Float(focal_length(camera.fovy)))?;
        prim.set_attribute("horizontalAperture", Value::Float(VERTICAL_APERTURE * camera.aspect))?;
        prim.set_attribute("clippingRange", Value::Float2([camera.znear, camera.zfar]))
    }
}

/// Focal length giving a vertical field of view of `fovy` degrees
pub fn focal_length(fovy: f32) -> f32 {
    VERTICAL_APERTURE / (2.0 * (utils::deg_to_rad(fovy) / 2.0).tan())
}
