//! Scene snapshots
//!
//! A [`Scene`] is what a renderer produces for one instant of the simulation:
//! an ordered list of geometry descriptors, an ordered list of light
//! descriptors and the camera. Descriptor `i` always refers to the same
//! logical object for as long as the model does not change.

mod camera;
mod geom;
mod light;

pub use camera::CameraDescriptor;
pub use geom::GeomDescriptor;
pub use light::LightDescriptor;
pub use crate::model::{GeomCategory, GeomType};

/// Snapshot of the visible scene at one instant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Geometries in index order
    pub geoms: Vec<GeomDescriptor>,
    /// Lights in index order
    pub lights: Vec<LightDescriptor>,
    /// Viewing camera
    pub camera: CameraDescriptor,
}

impl Scene {
    /// Number of geometry descriptors
    pub fn geom_count(&self) -> usize {
        self.geoms.len()
    }

    /// Number of light descriptors
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Geometries that would be mirrored (non-decorative)
    pub fn physical_geoms(&self) -> impl Iterator<Item = (usize, &GeomDescriptor)> {
        self.geoms.iter().enumerate().filter(|(_, geom)| !geom.is_decorative())
    }
}
