//! Kinematic simulation state

use crate::foundation::math::{Mat3d, Vec3d};
use crate::model::Model;

/// Camera placement overriding the model default
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPose {
    /// Eye position
    pub position: Vec3d,
    /// Point the camera looks at
    pub lookat: Vec3d,
    /// Up hint
    pub up: Vec3d,
}

/// World poses of every geometry and light at one instant
///
/// Arrays are parallel to the model's `geoms` and `lights`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimState {
    /// Simulation time in seconds
    pub time: f64,
    /// Geometry world positions
    pub geom_xpos: Vec<Vec3d>,
    /// Geometry world orientations
    pub geom_xmat: Vec<Mat3d>,
    /// Light world positions
    pub light_xpos: Vec<Vec3d>,
    /// Light world directions
    pub light_xdir: Vec<Vec3d>,
    /// Camera placement, the model default when `None`
    pub camera: Option<CameraPose>,
}

impl SimState {
    /// Create a state at time zero with the initial poses of the model
    pub fn new(model: &Model) -> Self {
        Self {
            time: 0.0,
            geom_xpos: model.geoms.iter().map(|geom| to_f64(geom.pos)).collect(),
            geom_xmat: vec![Mat3d::identity(); model.geom_count()],
            light_xpos: model.lights.iter().map(|light| to_f64(light.pos)).collect(),
            light_xdir: model.lights.iter().map(|light| to_f64(light.dir)).collect(),
            camera: None,
        }
    }

    /// Set the world pose of geometry `index`
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn set_geom_pose(&mut self, index: usize, position: Vec3d, rotation: Mat3d) {
        self.geom_xpos[index] = position;
        self.geom_xmat[index] = rotation;
    }

    /// Set the world position and direction of light `index`
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn set_light_pose(&mut self, index: usize, position: Vec3d, direction: Vec3d) {
        self.light_xpos[index] = position;
        self.light_xdir[index] = direction;
    }

    /// Override the camera placement
    pub fn set_camera(&mut self, position: Vec3d, lookat: Vec3d, up: Vec3d) {
        self.camera = Some(CameraPose { position, lookat, up });
    }
}

fn to_f64(v: [f32; 3]) -> Vec3d {
    Vec3d::new(f64::from(v[0]), f64::from(v[1]), f64::from(v[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_models::example_model;
    use crate::model::{GeomDef, GeomType};

    #[test]
    fn test_initial_poses_come_from_model() {
        let mut model = example_model();
        model.geoms.push(GeomDef::new(GeomType::Sphere, [0.1, 0.0, 0.0]).at([1.0, 2.0, 0.5]));

        let state = SimState::new(&model);
        assert_eq!(state.geom_xpos.len(), 4);
        assert_eq!(state.geom_xpos[3], Vec3d::new(1.0, 2.0, 0.5));
        assert_eq!(state.light_xpos[0], Vec3d::new(0.0, 0.0, 3.0));
        assert_eq!(state.light_xdir[0], Vec3d::new(0.0, 0.0, -1.0));
        assert!(state.camera.is_none());
    }
}
