//! Static geometry definitions

use serde::{Serialize, Deserialize};

/// Primitive kind of a geometry
///
/// The order follows the simulator's geometry type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeomType {
    /// Infinite or finite plane, size holds the half-extents in X and Y
    Plane,
    /// Height field terrain
    HeightField,
    /// Sphere, size[0] is the radius
    Sphere,
    /// Capsule along local Z, size[0] radius, size[1] half-length of the cylinder part
    Capsule,
    /// Ellipsoid, size holds the three radii
    Ellipsoid,
    /// Cylinder along local Z, size[0] radius, size[1] half-height
    Cylinder,
    /// Box, size holds the half-extents
    Box,
    /// Triangle mesh referenced by a mesh data id
    Mesh,
}

impl GeomType {
    /// Lowercase name used for prim names
    pub fn name(&self) -> &'static str {
        match self {
            GeomType::Plane => "plane",
            GeomType::HeightField => "hfield",
            GeomType::Sphere => "sphere",
            GeomType::Capsule => "capsule",
            GeomType::Ellipsoid => "ellipsoid",
            GeomType::Cylinder => "cylinder",
            GeomType::Box => "box",
            GeomType::Mesh => "mesh",
        }
    }
}

/// Whether a geometry takes part in the simulated scene or only decorates it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GeomCategory {
    /// Real scene object
    #[default]
    Physical,
    /// Visual aid (frames, contact markers, ...) that is never mirrored
    Decorative,
}

fn default_rgba() -> [f32; 4] {
    [0.5, 0.5, 0.5, 1.0]
}

/// Static definition of one geometry in a [`Model`](super::Model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeomDef {
    /// Optional human-readable name
    #[serde(default)]
    pub name: Option<String>,

    /// Primitive kind
    pub geom_type: GeomType,

    /// Physical or decorative
    #[serde(default)]
    pub category: GeomCategory,

    /// Kind-specific size parameters
    #[serde(default)]
    pub size: [f32; 3],

    /// Initial world position
    #[serde(default)]
    pub pos: [f32; 3],

    /// Base color with alpha
    #[serde(default = "default_rgba")]
    pub rgba: [f32; 4],

    /// Texture slot applied to this geometry
    #[serde(default)]
    pub texid: Option<usize>,

    /// Mesh slot for [`GeomType::Mesh`] geometries
    #[serde(default)]
    pub dataid: Option<usize>,
}

impl GeomDef {
    /// Create a physical geometry of the given kind and size
    pub fn new(geom_type: GeomType, size: [f32; 3]) -> Self {
        Self {
            name: None,
            geom_type,
            category: GeomCategory::Physical,
            size,
            pos: [0.0; 3],
            rgba: default_rgba(),
            texid: None,
            dataid: None,
        }
    }

    /// Create a mesh geometry bound to mesh slot `dataid`
    pub fn mesh(dataid: usize) -> Self {
        Self {
            dataid: Some(dataid),
            ..Self::new(GeomType::Mesh, [1.0, 1.0, 1.0])
        }
    }

    /// Mark the geometry as decorative
    pub fn decorative(mut self) -> Self {
        self.category = GeomCategory::Decorative;
        self
    }

    /// Set the base color
    pub fn with_rgba(mut self, rgba: [f32; 4]) -> Self {
        self.rgba = rgba;
        self
    }

    /// Apply a texture slot
    pub fn with_texture(mut self, texid: usize) -> Self {
        self.texid = Some(texid);
        self
    }

    /// Set the initial world position
    pub fn at(mut self, pos: [f32; 3]) -> Self {
        self.pos = pos;
        self
    }

    /// Set the name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
