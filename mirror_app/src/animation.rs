//! Scripted kinematic motion for the demo scene
//!
//! Physical geometries bob up and down and spin about the world Z axis, each
//! with its own phase. Planes stay put. Lights circle above the origin.

use usd_mirror::foundation::math::{Rotation3, Vec3d, Vector3};
use usd_mirror::model::{GeomCategory, GeomType, Model};
use usd_mirror::render::SimState;

/// Height of the bobbing motion
const BOB_AMPLITUDE: f64 = 0.15;
/// Bobbing frequency in Hz
const BOB_FREQUENCY: f64 = 0.5;
/// Spin rate in radians per second
const SPIN_RATE: f64 = 0.8;
/// Radius of the light orbit
const LIGHT_ORBIT: f64 = 1.5;

/// Drives a [`SimState`] through time from the model's initial poses
pub struct Animation {
    initial: SimState,
}

impl Animation {
    /// Start an animation at the model's initial poses
    pub fn new(model: &Model) -> Self {
        Self {
            initial: SimState::new(model),
        }
    }

    /// State of the scene at `time` seconds
    pub fn state_at(&self, model: &Model, time: f64) -> SimState {
        let mut state = self.initial.clone();
        state.time = time;

        for (index, geom) in model.geoms.iter().enumerate() {
            if geom.category == GeomCategory::Decorative || geom.geom_type == GeomType::Plane {
                continue;
            }
            let phase = index as f64;
            let lift = BOB_AMPLITUDE * (std::f64::consts::TAU * BOB_FREQUENCY * time + phase).sin();
            let spin = Rotation3::from_axis_angle(&Vector3::z_axis(), SPIN_RATE * time + phase);

            let position = self.initial.geom_xpos[index] + Vec3d::new(0.0, 0.0, lift);
            state.set_geom_pose(index, position, spin.into_inner() * self.initial.geom_xmat[index]);
        }

        for index in 0..model.lights.len() {
            let angle = SPIN_RATE * time + index as f64;
            let height = self.initial.light_xpos[index].z;
            let position = Vec3d::new(LIGHT_ORBIT * angle.cos(), LIGHT_ORBIT * angle.sin(), height);
            let direction = (-position).normalize();
            state.set_light_pose(index, position, direction);
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usd_mirror::model::{GeomDef, LightDef};

    fn model() -> Model {
        Model {
            geoms: vec![
                GeomDef::new(GeomType::Plane, [2.0, 2.0, 0.1]),
                GeomDef::new(GeomType::Sphere, [0.1, 0.0, 0.0]).at([0.0, 0.0, 0.5]),
                GeomDef::new(GeomType::Box, [0.1, 0.1, 0.1]).decorative(),
            ],
            lights: vec![LightDef::default()],
            ..Default::default()
        }
    }

    #[test]
    fn test_planes_and_decorations_stay_put() {
        let model = model();
        let animation = Animation::new(&model);
        let start = animation.state_at(&model, 0.0);
        let later = animation.state_at(&model, 1.3);

        assert_eq!(later.geom_xpos[0], start.geom_xpos[0]);
        assert_eq!(later.geom_xpos[2], start.geom_xpos[2]);
        assert_ne!(later.geom_xpos[1], start.geom_xpos[1]);
        assert!((later.time - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_lights_point_at_origin() {
        let model = model();
        let state = Animation::new(&model).state_at(&model, 0.7);

        let toward_origin = (-state.light_xpos[0]).normalize();
        assert!((state.light_xdir[0] - toward_origin).norm() < 1e-9);
        assert!((state.light_xpos[0].z - 3.0).abs() < 1e-9);
    }
}
