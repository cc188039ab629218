//! Light nodes
//!
//! Every light is mirrored as a point-like `SphereLight` shaped into a cone.
//! Directional lights get a 180 degree cone instead of a different prim type.

use crate::foundation::math::{look_rotation, Transform, Vec3};
use crate::scene::LightDescriptor;
use crate::usd::{geom, Prim, PrimKey, SdfPath, Stage, UsdError, Value};

/// Cone angle used for directional lights
pub const DIRECTIONAL_CONE_ANGLE: f32 = 180.0;

/// `SphereLight` prim following one snapshot light
#[derive(Debug, Clone)]
pub struct LightNode {
    prim: PrimKey,
}

impl LightNode {
    pub(crate) fn define(stage: &mut Stage, path: &SdfPath) -> Result<Self, UsdError> {
        let key = stage.define_prim(path, "SphereLight")?;
        stage.expect_prim_mut(key)?.set_attribute("treatAsPoint", Value::Bool(true))?;
        Ok(Self { prim: key })
    }

    /// Prim owned by this node
    pub fn prim(&self) -> PrimKey {
        self.prim
    }

    /// Refresh the light prim on `stage` from `light`
    pub fn refresh(&self, stage: &mut Stage, light: &LightDescriptor) -> Result<(), UsdError> {
        refresh_light(stage.expect_prim_mut(self.prim)?, light)
    }
}

fn refresh_light(prim: &mut Prim, light: &LightDescriptor) -> Result<(), UsdError> {
    let rotation = look_rotation(&light.dir, &Vec3::z());
    let transform = Transform::from_position_rotation(light.pos, rotation);
    geom::set_transform(prim, transform.to_usd_matrix())?;

    let cone_angle = if light.directional {
        DIRECTIONAL_CONE_ANGLE
    } else {
        light.cutoff
    };

    prim.set_attribute("inputs:intensity", Value::Float(light.intensity))?;
    prim.set_attribute("inputs:color", Value::Color3f(light.diffuse))?;
    prim.set_attribute("inputs:shaping:cone:angle", Value::Float(cone_angle))?;
    prim.set_attribute("inputs:shaping:focus", Value::Float(light.exponent))?;
    prim.set_attribute("inputs:shadow:enable", Value::Bool(light.cast_shadow))
}
