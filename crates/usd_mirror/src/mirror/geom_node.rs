//! Geometry nodes
//!
//! Every snapshot geometry gets exactly one [`GeomSlot`], decided on the first
//! update and kept for the lifetime of the mirror. Slots that own a prim hold
//! a [`GeomNode`], one variant per supported primitive kind.

use std::fmt;

use super::material::MaterialLibrary;
use super::mesh_node::MeshNode;
use super::primitive::{BoxNode, CapsuleNode, CylinderNode, EllipsoidNode, PlaneNode, SphereNode};
use super::MirrorError;
use crate::foundation::math::Vec3;
use crate::model::Model;
use crate::scene::{GeomDescriptor, GeomType};
use crate::usd::{geom, Prim, PrimKey, SdfPath, Stage, UsdError};

/// Per-kind refresh of a geometry prim from its snapshot descriptor
pub trait RefreshFromGeom {
    /// Prim owned by this node
    fn prim(&self) -> PrimKey;

    /// Scale applied on top of the descriptor pose
    fn scale(&self, _geom: &GeomDescriptor) -> Vec3 {
        Vec3::repeat(1.0)
    }

    /// Author the kind-specific size attributes
    fn refresh_shape(&self, _prim: &mut Prim, _geom: &GeomDescriptor) -> Result<(), UsdError> {
        Ok(())
    }

    /// Author transform, shape, color, opacity and visibility
    fn refresh(&self, prim: &mut Prim, geom: &GeomDescriptor) -> Result<(), UsdError> {
        let transform = geom.pose().with_scale(self.scale(geom));
        geom::set_transform(prim, transform.to_usd_matrix())?;
        self.refresh_shape(prim, geom)?;
        geom::set_display_color(prim, geom.color())?;
        geom::set_display_opacity(prim, geom.opacity())?;
        geom::set_visible(prim, geom.is_visible())
    }
}

/// A geometry prim of a supported kind
#[derive(Debug, Clone)]
pub enum GeomNode {
    /// `Sphere` prim
    Sphere(SphereNode),
    /// Unit `Sphere` prim scaled by the radii
    Ellipsoid(EllipsoidNode),
    /// `Cube` prim scaled by the half-extents
    Box(BoxNode),
    /// `Capsule` prim
    Capsule(CapsuleNode),
    /// `Cylinder` prim
    Cylinder(CylinderNode),
    /// `Plane` prim
    Plane(PlaneNode),
    /// `Mesh` prim bound to one model mesh
    Mesh(MeshNode),
}

impl GeomNode {
    fn as_refresh(&self) -> &dyn RefreshFromGeom {
        match self {
            GeomNode::Sphere(node) => node,
            GeomNode::Ellipsoid(node) => node,
            GeomNode::Box(node) => node,
            GeomNode::Capsule(node) => node,
            GeomNode::Cylinder(node) => node,
            GeomNode::Plane(node) => node,
            GeomNode::Mesh(node) => node,
        }
    }

    /// Prim owned by this node
    pub fn prim(&self) -> PrimKey {
        self.as_refresh().prim()
    }

    /// Geometry kind mirrored by this node
    pub fn geom_type(&self) -> GeomType {
        match self {
            GeomNode::Sphere(_) => GeomType::Sphere,
            GeomNode::Ellipsoid(_) => GeomType::Ellipsoid,
            GeomNode::Box(_) => GeomType::Box,
            GeomNode::Capsule(_) => GeomType::Capsule,
            GeomNode::Cylinder(_) => GeomType::Cylinder,
            GeomNode::Plane(_) => GeomType::Plane,
            GeomNode::Mesh(_) => GeomType::Mesh,
        }
    }

    /// Refresh the node's prim on `stage` from `geom`
    pub fn refresh(&self, stage: &mut Stage, geom: &GeomDescriptor) -> Result<(), UsdError> {
        let node = self.as_refresh();
        node.refresh(stage.expect_prim_mut(node.prim())?, geom)
    }
}

/// What the mirror keeps for one snapshot geometry
#[derive(Debug, Clone)]
pub enum GeomSlot {
    /// Decorative geometry, never mirrored
    Decorative,
    /// Geometry kind without a stage representation
    Unsupported(GeomType),
    /// Mirrored geometry
    Node(GeomNode),
}

impl GeomSlot {
    /// Decide the slot for geometry `index` and define its prim when it gets one
    pub(crate) fn allocate(
        index: usize,
        geom: &GeomDescriptor,
        model: &Model,
        stage: &mut Stage,
        parent: &SdfPath,
        materials: &MaterialLibrary,
    ) -> Result<Self, MirrorError> {
        if geom.is_decorative() {
            log::debug!("Skipping decorative geom {}", index);
            return Ok(GeomSlot::Decorative);
        }
        let path = parent.append_child(&format!("{}_{}", geom.geom_type.name(), index))?;
        let node = match geom.geom_type {
            GeomType::Sphere => GeomNode::Sphere(SphereNode::define(stage, &path)?),
            GeomType::Ellipsoid => GeomNode::Ellipsoid(EllipsoidNode::define(stage, &path)?),
            GeomType::Box => GeomNode::Box(BoxNode::define(stage, &path)?),
            GeomType::Capsule => GeomNode::Capsule(CapsuleNode::define(stage, &path)?),
            GeomType::Cylinder => GeomNode::Cylinder(CylinderNode::define(stage, &path)?),
            GeomType::Plane => GeomNode::Plane(PlaneNode::define(stage, &path)?),
            GeomType::Mesh => {
                let dataid = geom.dataid.ok_or(MirrorError::MissingMesh { geom: index, dataid: None })?;
                let mesh = model.mesh(dataid).ok_or(MirrorError::MissingMesh {
                    geom: index,
                    dataid: Some(dataid),
                })?;
                GeomNode::Mesh(MeshNode::define(stage, &path, dataid, &mesh)?)
            }
            GeomType::HeightField => {
                log::warn!("Geom {} is a height field, which is not mirrored", index);
                return Ok(GeomSlot::Unsupported(geom.geom_type));
            }
        };

        if let Some(texid) = geom.texid {
            let prim = stage.expect_prim_mut(node.prim())?;
            if !materials.bind(prim, texid)? {
                return Err(MirrorError::MissingTexture { geom: index, texid });
            }
        }

        log::debug!("Allocated {} for geom {}", path, index);
        Ok(GeomSlot::Node(node))
    }

    /// Node of this slot, if it owns a prim
    pub fn node(&self) -> Option<&GeomNode> {
        match self {
            GeomSlot::Node(node) => Some(node),
            GeomSlot::Decorative | GeomSlot::Unsupported(_) => None,
        }
    }

    /// Prim of this slot, if it owns one
    pub fn prim(&self) -> Option<PrimKey> {
        self.node().map(GeomNode::prim)
    }
}

impl fmt::Display for GeomSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeomSlot::Decorative => f.write_str("decorative"),
            GeomSlot::Unsupported(kind) => write!(f, "unsupported {}", kind.name()),
            GeomSlot::Node(node) => f.write_str(node.geom_type().name()),
        }
    }
}
