//! Scene mirror
//!
//! [`SceneMirror`] keeps a USD stage in step with a simulation. Each call to
//! [`SceneMirror::update`] asks the renderer for a fresh snapshot and copies
//! it onto the stage:
//!
//! - The first update extracts the model textures, defines one material per
//!   texture and allocates one prim per non-decorative geometry, one per light
//!   and optionally one camera. Node count is fixed from then on.
//! - Every update, including the first, refreshes the transform, size, color,
//!   opacity and visibility of those prims from the snapshot.
//!
//! The stage can be saved or serialized at any point.
//!
//! # Stage layout
//!
//! ```text
//! /World                       Xform (default prim, Z up)
//!     /Looks/texture_<i>       Material per texture
//!     /Geoms/<kind>_<index>    one prim per mirrored geometry
//!     /Lights/light_<i>        SphereLight per light
//!     /Camera                  Camera
//! ```

mod camera_node;
mod geom_node;
mod light_node;
mod material;
mod mesh_node;
mod primitive;


pub use camera_node::CameraNode;
pub use geom_node::{GeomNode, GeomSlot, RefreshFromGeom};
pub use light_node::LightNode;
pub use material::MaterialLibrary;
pub use mesh_node::MeshNode;
pub use primitive::{BoxNode, CapsuleNode, CylinderNode, EllipsoidNode, PlaneNode, SphereNode};

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::assets::{extract_textures, AssetError, TextureAsset};
use crate::config::MirrorConfig;
use crate::model::{Model, ModelError};
use crate::render::{KinematicRenderer, RenderError, SceneRenderer};
use crate::scene::Scene;
use crate::usd::{Prim, SdfPath, Stage, UpAxis, UsdError};

/// Name of the root prim
pub const WORLD: &str = "World";

/// Scene mirror errors
#[derive(Error, Debug)]
pub enum MirrorError {
    /// The model is malformed
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// The renderer rejected the state
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Texture extraction failed
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Stage authoring or saving failed
    #[error("Stage error: {0}")]
    Stage(#[from] UsdError),

    /// The snapshot no longer matches the nodes allocated on the first update
    #[error("Snapshot has {actual} {kind}, the mirror was initialized with {expected}")]
    TopologyChanged {
        /// `"geoms"` or `"lights"`
        kind: &'static str,
        /// Count captured at initialization
        expected: usize,
        /// Count in the current snapshot
        actual: usize,
    },

    /// A geometry references a texture without a material
    #[error("Geom {geom} references missing texture {texid}")]
    MissingTexture {
        /// Geometry index
        geom: usize,
        /// Texture slot
        texid: usize,
    },

    /// A mesh geometry references no mesh or a missing one
    #[error("Mesh geom {geom} references missing mesh {dataid:?}")]
    MissingMesh {
        /// Geometry index
        geom: usize,
        /// Mesh slot, if any
        dataid: Option<usize>,
    },
}

/// Nodes allocated on the first update
#[derive(Debug)]
struct SceneNodes {
    textures: Vec<TextureAsset>,
    materials: MaterialLibrary,
    geoms: Vec<GeomSlot>,
    lights: Vec<LightNode>,
    camera: Option<CameraNode>,
}

impl SceneNodes {
    fn allocate(model: &Model, scene: &Scene, stage: &mut Stage, config: &MirrorConfig) -> Result<Self, MirrorError> {
        let world = SdfPath::absolute_root().append_child(WORLD)?;

        let textures = extract_textures(model, &config.texture_dir)?;
        let looks = world.append_child("Looks")?;
        stage.define_prim(&looks, "Scope")?;
        let materials = MaterialLibrary::define(stage, &looks, &textures)?;

        let geom_scope = world.append_child("Geoms")?;
        stage.define_prim(&geom_scope, "Scope")?;
        let geoms = scene
            .geoms
            .iter()
            .enumerate()
            .map(|(index, geom)| GeomSlot::allocate(index, geom, model, stage, &geom_scope, &materials))
            .collect::<Result<Vec<_>, _>>()?;

        let light_scope = world.append_child("Lights")?;
        stage.define_prim(&light_scope, "Scope")?;
        let lights = (0..scene.light_count())
            .map(|index| LightNode::define(stage, &light_scope.append_child(&format!("light_{index}"))?))
            .collect::<Result<Vec<_>, _>>()?;

        let camera = if config.mirror_camera {
            Some(CameraNode::define(stage, &world.append_child("Camera")?)?)
        } else {
            None
        };

        let nodes = Self { textures, materials, geoms, lights, camera };
        log::info!(
            "Initialized mirror: {} of {} geoms, {} lights, {} textures",
            nodes.geom_node_count(),
            nodes.geoms.len(),
            nodes.lights.len(),
            nodes.textures.len()
        );
        Ok(nodes)
    }

    fn geom_node_count(&self) -> usize {
        self.geoms.iter().filter(|slot| slot.node().is_some()).count()
    }

    fn check_topology(&self, scene: &Scene) -> Result<(), MirrorError> {
        if scene.geom_count() != self.geoms.len() {
            return Err(MirrorError::TopologyChanged {
                kind: "geoms",
                expected: self.geoms.len(),
                actual: scene.geom_count(),
            });
        }
        if scene.light_count() != self.lights.len() {
            return Err(MirrorError::TopologyChanged {
                kind: "lights",
                expected: self.lights.len(),
                actual: scene.light_count(),
            });
        }
        Ok(())
    }

    fn refresh(&self, scene: &Scene, stage: &mut Stage) -> Result<(), UsdError> {
        for (slot, geom) in self.geoms.iter().zip(&scene.geoms) {
            if let Some(node) = slot.node() {
                node.refresh(stage, geom)?;
            }
        }
        for (node, light) in self.lights.iter().zip(&scene.lights) {
            node.refresh(stage, light)?;
        }
        if let Some(camera) = &self.camera {
            camera.refresh(stage, &scene.camera)?;
        }
        Ok(())
    }
}

/// Whether the first update has allocated the nodes yet
#[derive(Debug)]
enum Lifecycle {
    Uninitialized,
    Initialized(SceneNodes),
}

impl Lifecycle {
    /// Run `init` on the first call, then hand out the nodes
    fn get_or_try_init(
        &mut self,
        init: impl FnOnce() -> Result<SceneNodes, MirrorError>,
    ) -> Result<&mut SceneNodes, MirrorError> {
        if let Lifecycle::Uninitialized = self {
            *self = Lifecycle::Initialized(init()?);
        }
        match self {
            Lifecycle::Initialized(nodes) => Ok(nodes),
            Lifecycle::Uninitialized => unreachable!("lifecycle initialized above"),
        }
    }

    fn nodes(&self) -> Option<&SceneNodes> {
        match self {
            Lifecycle::Initialized(nodes) => Some(nodes),
            Lifecycle::Uninitialized => None,
        }
    }
}

/// Mirrors renderer snapshots onto a USD stage
pub struct SceneMirror<R: SceneRenderer = KinematicRenderer> {
    model: Arc<Model>,
    renderer: R,
    stage: Stage,
    config: MirrorConfig,
    lifecycle: Lifecycle,
    frames: u64,
}

impl SceneMirror<KinematicRenderer> {
    /// Create a mirror with a [`KinematicRenderer`] sized from `config`
    ///
    /// Creates a new stage at `config.output_path`; an unwritable path fails
    /// here.
    pub fn new(model: Arc<Model>, config: MirrorConfig) -> Result<Self, MirrorError> {
        let renderer = KinematicRenderer::new(Arc::clone(&model), config.width, config.height)
            .map_err(|err| match err {
                RenderError::InvalidModel(err) => MirrorError::Model(err),
                other => MirrorError::Render(other),
            })?;
        Self::with_renderer(model, renderer, config)
    }
}

impl<R: SceneRenderer> SceneMirror<R> {
    /// Create a mirror around an existing renderer
    pub fn with_renderer(model: Arc<Model>, renderer: R, config: MirrorConfig) -> Result<Self, MirrorError> {
        model.validate()?;

        let mut stage = Stage::create_new(&config.output_path)?;
        stage.set_up_axis(UpAxis::Z);
        stage.define_prim(&SdfPath::absolute_root().append_child(WORLD)?, "Xform")?;
        stage.set_default_prim(WORLD)?;
        stage.save()?;

        let (width, height) = renderer.viewport();
        log::info!("Created USD stage at {:?} for a {}x{} viewport", config.output_path, width, height);
        Ok(Self {
            model,
            renderer,
            stage,
            config,
            lifecycle: Lifecycle::Uninitialized,
            frames: 0,
        })
    }

    /// Mirror the snapshot the renderer produces for `state`
    ///
    /// The first call allocates every node on a staged copy of the stage, which
    /// replaces the stage only once allocation succeeds. Later calls fail with
    /// [`MirrorError::TopologyChanged`], leaving the stage untouched, when the
    /// snapshot's geometry or light count differs from the first one.
    pub fn update(&mut self, state: &R::State) -> Result<(), MirrorError> {
        self.renderer.update_scene(state)?;
        let scene = self.renderer.scene();

        let (model, config, stage) = (&self.model, &self.config, &mut self.stage);
        let nodes = self
            .lifecycle
            .get_or_try_init(|| {
                let mut staged = stage.clone();
                let nodes = SceneNodes::allocate(model, scene, &mut staged, config)?;
                *stage = staged;
                Ok(nodes)
            })?;

        nodes.check_topology(scene)?;
        nodes.refresh(scene, stage)?;

        self.frames += 1;
        log::trace!("Mirrored frame {}", self.frames);
        Ok(())
    }

    /// Overwrite `config.output_path` with the current stage
    pub fn save(&self) -> Result<(), MirrorError> {
        self.stage.save()?;
        log::info!("Saved USD stage after {} frames to {:?}", self.frames, self.config.output_path);
        Ok(())
    }

    /// Current stage as `.usda` text
    pub fn serialize(&self) -> String {
        self.stage.export_to_string()
    }

    /// Last snapshot produced by the renderer
    pub fn scene(&self) -> &Scene {
        self.renderer.scene()
    }

    /// Stage being authored
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Model being mirrored
    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Renderer producing the snapshots
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mirror settings
    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    /// Whether the first update has run
    pub fn is_initialized(&self) -> bool {
        self.lifecycle.nodes().is_some()
    }

    /// Number of successful updates
    pub fn frames_mirrored(&self) -> u64 {
        self.frames
    }

    /// Absolute paths of the extracted textures, in slot order
    pub fn texture_paths(&self) -> Vec<&Path> {
        self.lifecycle
            .nodes()
            .map(|nodes| nodes.textures.iter().map(|texture| texture.path.as_path()).collect())
            .unwrap_or_default()
    }

    /// Shared texture materials
    pub fn materials(&self) -> Option<&MaterialLibrary> {
        self.lifecycle.nodes().map(|nodes| &nodes.materials)
    }

    /// Number of geometries that own a prim
    pub fn geom_node_count(&self) -> usize {
        self.lifecycle.nodes().map_or(0, SceneNodes::geom_node_count)
    }

    /// Number of light prims
    pub fn light_node_count(&self) -> usize {
        self.lifecycle.nodes().map_or(0, |nodes| nodes.lights.len())
    }

    /// Slot of geometry `index`
    pub fn geom_slot(&self, index: usize) -> Option<&GeomSlot> {
        self.lifecycle.nodes()?.geoms.get(index)
    }

    /// Prim of geometry `index`, if it has one
    pub fn geom_prim(&self, index: usize) -> Option<&Prim> {
        self.stage.prim(self.geom_slot(index)?.prim()?)
    }

    /// Prim of light `index`
    pub fn light_prim(&self, index: usize) -> Option<&Prim> {
        let node = self.lifecycle.nodes()?.lights.get(index)?;
        self.stage.prim(node.prim())
    }

    /// Camera prim, when camera mirroring is enabled
    pub fn camera_prim(&self) -> Option<&Prim> {
        let node = self.lifecycle.nodes()?.camera.as_ref()?;
        self.stage.prim(node.prim())
    }

    /// One line per allocated node
    pub fn node_summaries(&self) -> Vec<String> {
        let Some(nodes) = self.lifecycle.nodes() else {
            return Vec::new();
        };

        let prim_path = |key| self.stage.prim(key).map_or_else(String::new, |prim| prim.path().to_string());
        let mut lines: Vec<String> = nodes
            .geoms
            .iter()
            .enumerate()
            .map(|(index, slot)| match slot.prim() {
                Some(key) => format!("geom {index}: {slot} at {}", prim_path(key)),
                None => format!("geom {index}: {slot}"),
            })
            .collect();
        lines.extend(
            nodes
                .lights
                .iter()
                .enumerate()
                .map(|(index, node)| format!("light {index}: at {}", prim_path(node.prim()))),
        );
        if let Some(camera) = &nodes.camera {
            lines.push(format!("camera: at {}", prim_path(camera.prim())));
        }
        lines
    }
}
