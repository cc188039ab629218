//! Snapshot renderer for kinematic states

use std::sync::Arc;

use super::{RenderError, SceneRenderer, SimState};
use crate::foundation::math::{Vec3, Vec3d};
use crate::model::Model;
use crate::scene::{CameraDescriptor, GeomDescriptor, LightDescriptor, Scene};

/// Builds snapshots by combining the model's static definitions with the
/// world poses carried by a [`SimState`]
#[derive(Debug)]
pub struct KinematicRenderer {
    model: Arc<Model>,
    width: u32,
    height: u32,
    scene: Scene,
}

impl KinematicRenderer {
    /// Create a renderer for `model` with a `width` x `height` viewport
    pub fn new(model: Arc<Model>, width: u32, height: u32) -> Result<Self, RenderError> {
        model.validate()?;
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidViewport { width, height });
        }

        Ok(Self {
            model,
            width,
            height,
            scene: Scene::default(),
        })
    }

    /// Model this renderer draws
    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    fn check_state(&self, state: &SimState) -> Result<(), RenderError> {
        let geoms = self.model.geom_count();
        let lights = self.model.light_count();

        check_len("geom position", geoms, state.geom_xpos.len())?;
        check_len("geom orientation", geoms, state.geom_xmat.len())?;
        check_len("light position", lights, state.light_xpos.len())?;
        check_len("light direction", lights, state.light_xdir.len())
    }

    fn build_camera(&self, state: &SimState) -> CameraDescriptor {
        let defaults = &self.model.camera;
        let (position, lookat, up) = match &state.camera {
            Some(pose) => (to_f32(&pose.position), to_f32(&pose.lookat), to_f32(&pose.up)),
            None => (
                Vec3::from(defaults.position),
                Vec3::from(defaults.lookat),
                Vec3::from(defaults.up),
            ),
        };

        CameraDescriptor {
            position,
            forward: (lookat - position).try_normalize(f32::EPSILON).unwrap_or_else(Vec3::y),
            up,
            fovy: defaults.fovy,
            znear: defaults.znear,
            zfar: defaults.zfar,
            aspect: self.width as f32 / self.height as f32,
        }
    }
}

impl SceneRenderer for KinematicRenderer {
    type State = SimState;

    fn update_scene(&mut self, state: &SimState) -> Result<(), RenderError> {
        self.check_state(state)?;

        let geoms = self
            .model
            .geoms
            .iter()
            .enumerate()
            .map(|(index, def)| GeomDescriptor {
                geom_type: def.geom_type,
                category: def.category,
                objid: Some(index),
                dataid: def.dataid,
                texid: def.texid,
                pos: to_f32(&state.geom_xpos[index]),
                mat: state.geom_xmat[index].map(|v| v as f32),
                size: Vec3::from(def.size),
                rgba: def.rgba,
            })
            .collect();

        let lights = self
            .model
            .lights
            .iter()
            .enumerate()
            .map(|(index, def)| LightDescriptor {
                pos: to_f32(&state.light_xpos[index]),
                dir: to_f32(&state.light_xdir[index]),
                directional: def.directional,
                diffuse: def.diffuse,
                ambient: def.ambient,
                specular: def.specular,
                attenuation: def.attenuation,
                cutoff: def.cutoff,
                exponent: def.exponent,
                intensity: def.intensity,
                cast_shadow: def.cast_shadow,
            })
            .collect();

        self.scene = Scene {
            geoms,
            lights,
            camera: self.build_camera(state),
        };

        log::trace!("Rendered snapshot at t={:.4}", state.time);
        Ok(())
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn to_f32(v: &Vec3d) -> Vec3 {
    v.map(|c| c as f32)
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), RenderError> {
    if expected == actual {
        Ok(())
    } else {
        Err(RenderError::StateMismatch { what, expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat3d;
    use crate::model::test_models::example_model;
    use crate::model::{GeomCategory, GeomType};
    use approx::assert_relative_eq;

    fn renderer() -> KinematicRenderer {
        KinematicRenderer::new(Arc::new(example_model()), 640, 480).unwrap()
    }

    #[test]
    fn test_snapshot_follows_model_order() {
        let mut renderer = renderer();
        let model = renderer.model().clone();
        let mut state = SimState::new(&model);
        state.set_geom_pose(2, Vec3d::new(1.0, 2.0, 3.0), Mat3d::identity());

        renderer.update_scene(&state).unwrap();
        let scene = renderer.scene();

        assert_eq!(scene.geom_count(), 3);
        assert_eq!(scene.light_count(), 1);
        assert_eq!(scene.geoms[0].category, GeomCategory::Decorative);
        assert_eq!(scene.geoms[1].geom_type, GeomType::Mesh);
        assert_eq!(scene.geoms[1].dataid, Some(0));
        assert_eq!(scene.geoms[2].texid, Some(1));
        assert_relative_eq!(scene.geoms[2].pos, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(scene.physical_geoms().count(), 2);
    }

    #[test]
    fn test_camera_uses_viewport_aspect() {
        let mut renderer = renderer();
        let state = SimState::new(renderer.model());
        renderer.update_scene(&state).unwrap();

        let camera = &renderer.scene().camera;
        assert_relative_eq!(camera.aspect, 640.0 / 480.0);
        assert_relative_eq!(camera.forward.norm(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_camera_override() {
        let mut renderer = renderer();
        let mut state = SimState::new(renderer.model());
        state.set_camera(Vec3d::new(0.0, 0.0, 5.0), Vec3d::zeros(), Vec3d::y());
        renderer.update_scene(&state).unwrap();

        let camera = &renderer.scene().camera;
        assert_relative_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(camera.forward, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_mismatched_state_is_rejected() {
        let mut renderer = renderer();
        let mut state = SimState::new(renderer.model());
        state.geom_xpos.pop();

        assert!(matches!(
            renderer.update_scene(&state),
            Err(RenderError::StateMismatch { what: "geom position", expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_zero_viewport_is_rejected() {
        let result = KinematicRenderer::new(Arc::new(example_model()), 0, 480);
        assert!(matches!(result, Err(RenderError::InvalidViewport { width: 0, height: 480 })));
    }
}
