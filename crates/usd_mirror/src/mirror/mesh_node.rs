//! Triangle mesh nodes

use super::geom_node::RefreshFromGeom;
use crate::model::MeshView;
use crate::usd::{Attribute, PrimKey, SdfPath, Stage, UsdError, Value};

/// Texture coordinate primvar
pub const ST_PRIMVAR: &str = "primvars:st";

/// `Mesh` prim bound to one model mesh
///
/// Topology, points and texture coordinates are static and authored once at
/// definition. Refreshes only touch the pose and display attributes.
#[derive(Debug, Clone)]
pub struct MeshNode {
    prim: PrimKey,
    dataid: usize,
}

impl MeshNode {
    pub(crate) fn define(
        stage: &mut Stage,
        path: &SdfPath,
        dataid: usize,
        mesh: &MeshView<'_>,
    ) -> Result<Self, UsdError> {
        let key = stage.define_prim(path, "Mesh")?;
        let prim = stage.expect_prim_mut(key)?;

        prim.set_attribute("points", Value::Point3fArray(mesh.vertices.to_vec()))?;
        prim.set_attribute("faceVertexIndices", Value::IntArray(mesh.face_vertex_indices()))?;
        prim.set_attribute("faceVertexCounts", Value::IntArray(vec![3; mesh.faces.len()]))?;
        prim.create_attribute(
            "subdivisionScheme",
            Attribute::new(Value::token("none")).uniform(),
        )?;
        if let Some(st) = mesh.face_varying_texcoords() {
            prim.create_attribute(
                ST_PRIMVAR,
                Attribute::new(Value::TexCoord2fArray(st)).with_interpolation("faceVarying"),
            )?;
        }

        log::debug!(
            "Mesh {} uses model mesh {} ({} vertices, {} faces)",
            path,
            dataid,
            mesh.vertices.len(),
            mesh.faces.len()
        );
        Ok(Self { prim: key, dataid })
    }

    /// Model mesh slot this node mirrors
    pub fn dataid(&self) -> usize {
        self.dataid
    }
}

impl RefreshFromGeom for MeshNode {
    fn prim(&self) -> PrimKey {
        self.prim
    }
}
