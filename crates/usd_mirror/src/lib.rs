//! # USD Mirror
//!
//! Mirrors the scene of a running physics simulation into a USD stage, one
//! frame at a time.
//!
//! ## Features
//!
//! - **Lazy allocation**: prims are created on the first update and reused
//!   for every later frame
//! - **Texture export**: packed model textures are written out as PNG files
//!   and bound through shared preview materials
//! - **Pluggable renderers**: any [`SceneRenderer`](render::SceneRenderer)
//!   can feed snapshots to the mirror
//! - **Plain text output**: stages are saved as `.usda`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use usd_mirror::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = Arc::new(Model::load("scene.ron")?);
//!     let mut mirror = SceneMirror::new(Arc::clone(&model), MirrorConfig::default())?;
//!
//!     let mut state = SimState::new(&model);
//!     for frame in 0..100 {
//!         state.time = f64::from(frame) * 0.01;
//!         mirror.update(&state)?;
//!     }
//!
//!     mirror.save()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod model;
pub mod scene;
pub mod render;
pub mod assets;
pub mod usd;
pub mod mirror;

pub use mirror::{MirrorError, SceneMirror};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        SceneMirror, MirrorError,
        config::{Config, MirrorConfig},
        foundation::math::{Mat3d, Vec3, Vec3d, Transform},
        model::{Model, GeomDef, GeomType, LightDef},
        render::{KinematicRenderer, SceneRenderer, SimState},
        scene::Scene,
        usd::{Stage, SdfPath, Value},
    };
}
