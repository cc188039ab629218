//! Parametric geometry nodes
//!
//! Sizes follow the simulator convention of half-extents: a capsule or
//! cylinder stores its radius and half-height, a box and a plane their
//! half-extents.

use super::geom_node::RefreshFromGeom;
use crate::foundation::math::Vec3;
use crate::scene::GeomDescriptor;
use crate::usd::{Attribute, Prim, PrimKey, SdfPath, Stage, UsdError, Value};

/// Axis token for capsules, cylinders and planes
const AXIS_Z: &str = "Z";

fn define_with_axis(stage: &mut Stage, path: &SdfPath, type_name: &str) -> Result<PrimKey, UsdError> {
    let key = stage.define_prim(path, type_name)?;
    stage
        .expect_prim_mut(key)?
        .create_attribute("axis", Attribute::new(Value::token(AXIS_Z)).uniform())?;
    Ok(key)
}

/// `Sphere` prim, radius from `size[0]`
#[derive(Debug, Clone)]
pub struct SphereNode {
    prim: PrimKey,
}

impl SphereNode {
    pub(crate) fn define(stage: &mut Stage, path: &SdfPath) -> Result<Self, UsdError> {
        Ok(Self { prim: stage.define_prim(path, "Sphere")? })
    }
}

impl RefreshFromGeom for SphereNode {
    fn prim(&self) -> PrimKey {
        self.prim
    }

    fn refresh_shape(&self, prim: &mut Prim, geom: &GeomDescriptor) -> Result<(), UsdError> {
        prim.set_attribute("radius", Value::Double(f64::from(geom.size[0])))
    }
}

/// Unit `Sphere` prim scaled by the three radii
#[derive(Debug, Clone)]
pub struct EllipsoidNode {
    prim: PrimKey,
}

impl EllipsoidNode {
    pub(crate) fn define(stage: &mut Stage, path: &SdfPath) -> Result<Self, UsdError> {
        let prim = stage.define_prim(path, "Sphere")?;
        stage.expect_prim_mut(prim)?.set_attribute("radius", Value::Double(1.0))?;
        Ok(Self { prim })
    }
}

impl RefreshFromGeom for EllipsoidNode {
    fn prim(&self) -> PrimKey {
        self.prim
    }

    fn scale(&self, geom: &GeomDescriptor) -> Vec3 {
        geom.size
    }
}

/// `Cube` of edge 2 scaled by the half-extents
#[derive(Debug, Clone)]
pub struct BoxNode {
    prim: PrimKey,
}

impl BoxNode {
    pub(crate) fn define(stage: &mut Stage, path: &SdfPath) -> Result<Self, UsdError> {
        let prim = stage.define_prim(path, "Cube")?;
        stage.expect_prim_mut(prim)?.set_attribute("size", Value::Double(2.0))?;
        Ok(Self { prim })
    }
}

impl RefreshFromGeom for BoxNode {
    fn prim(&self) -> PrimKey {
        self.prim
    }

    fn scale(&self, geom: &GeomDescriptor) -> Vec3 {
        geom.size
    }
}

/// `Capsule` along Z; `height` is the length of the cylindrical part
#[derive(Debug, Clone)]
pub struct CapsuleNode {
    prim: PrimKey,
}

impl CapsuleNode {
    pub(crate) fn define(stage: &mut Stage, path: &SdfPath) -> Result<Self, UsdError> {
        Ok(Self { prim: define_with_axis(stage, path, "Capsule")? })
    }
}

impl RefreshFromGeom for CapsuleNode {
    fn prim(&self) -> PrimKey {
        self.prim
    }

    fn refresh_shape(&self, prim: &mut Prim, geom: &GeomDescriptor) -> Result<(), UsdError> {
        set_radius_height(prim, geom)
    }
}

/// `Cylinder` along Z
#[derive(Debug, Clone)]
pub struct CylinderNode {
    prim: PrimKey,
}

impl CylinderNode {
    pub(crate) fn define(stage: &mut Stage, path: &SdfPath) -> Result<Self, UsdError> {
        Ok(Self { prim: define_with_axis(stage, path, "Cylinder")? })
    }
}

impl RefreshFromGeom for CylinderNode {
    fn prim(&self) -> PrimKey {
        self.prim
    }

    fn refresh_shape(&self, prim: &mut Prim, geom: &GeomDescriptor) -> Result<(), UsdError> {
        set_radius_height(prim, geom)
    }
}

/// `Plane` with normal along Z
#[derive(Debug, Clone)]
pub struct PlaneNode {
    prim: PrimKey,
}

impl PlaneNode {
    pub(crate) fn define(stage: &mut Stage, path: &SdfPath) -> Result<Self, UsdError> {
        Ok(Self { prim: define_with_axis(stage, path, "Plane")? })
    }
}

impl RefreshFromGeom for PlaneNode {
    fn prim(&self) -> PrimKey {
        self.prim
    }

    fn refresh_shape(&self, prim: &mut Prim, geom: &GeomDescriptor) -> Result<(), UsdError> {
        prim.set_attribute("width", Value::Double(2.0 * f64::from(geom.size[0])))?;
        prim.set_attribute("length", Value::Double(2.0 * f64::from(geom.size[1])))
    }
}

fn set_radius_height(prim: &mut Prim, geom: &GeomDescriptor) -> Result<(), UsdError> {
    prim.set_attribute("radius", Value::Double(f64::from(geom.size[0])))?;
    prim.set_attribute("height", Value::Double(2.0 * f64::from(geom.size[1])))
}
