//! Geometry descriptors

use crate::foundation::math::{Mat3, Transform, Vec3};
use crate::model::{GeomCategory, GeomType};

/// Pose and appearance of one geometry in a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct GeomDescriptor {
    /// Primitive kind
    pub geom_type: GeomType,
    /// Physical or decorative
    pub category: GeomCategory,
    /// Model geometry this descriptor was produced from, if any
    pub objid: Option<usize>,
    /// Mesh slot for mesh geometries
    pub dataid: Option<usize>,
    /// Texture slot, if textured
    pub texid: Option<usize>,
    /// World position
    pub pos: Vec3,
    /// World orientation
    pub mat: Mat3,
    /// Kind-specific size parameters
    pub size: Vec3,
    /// Color with alpha
    pub rgba: [f32; 4],
}

impl GeomDescriptor {
    /// Create a physical descriptor at the origin
    pub fn new(geom_type: GeomType, size: Vec3) -> Self {
        Self {
            geom_type,
            category: GeomCategory::Physical,
            objid: None,
            dataid: None,
            texid: None,
            pos: Vec3::zeros(),
            mat: Mat3::identity(),
            size,
            rgba: [0.5, 0.5, 0.5, 1.0],
        }
    }

    /// Whether this descriptor is a visual aid that is never mirrored
    pub fn is_decorative(&self) -> bool {
        self.category == GeomCategory::Decorative
    }

    /// Whether the geometry should be drawn
    pub fn is_visible(&self) -> bool {
        self.rgba[3] > 0.0
    }

    /// RGB part of the color
    pub fn color(&self) -> [f32; 3] {
        [self.rgba[0], self.rgba[1], self.rgba[2]]
    }

    /// Opacity part of the color
    pub fn opacity(&self) -> f32 {
        self.rgba[3]
    }

    /// World pose without scale
    pub fn pose(&self) -> Transform {
        Transform::from_position_rotation(self.pos, self.mat)
    }
}
