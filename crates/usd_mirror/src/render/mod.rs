//! Renderer seam
//!
//! The mirror never reads simulation state directly. It hands the state to a
//! [`SceneRenderer`], which turns it into a [`Scene`] snapshot of ordered
//! geometry and light descriptors. [`KinematicRenderer`] is the built-in
//! implementation for states that carry world poses directly.

mod kinematic;
mod state;

pub use kinematic::KinematicRenderer;
pub use state::{CameraPose, SimState};

use thiserror::Error;

use crate::model::ModelError;
use crate::scene::Scene;

/// Produces scene snapshots from simulation states
pub trait SceneRenderer {
    /// Simulation state consumed by [`update_scene`](Self::update_scene)
    type State;

    /// Rebuild the snapshot from `state`
    fn update_scene(&mut self, state: &Self::State) -> Result<(), RenderError>;

    /// Snapshot produced by the last [`update_scene`](Self::update_scene) call
    fn scene(&self) -> &Scene;

    /// Viewport size as (width, height)
    fn viewport(&self) -> (u32, u32);
}

/// Renderer errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// The model handed to the renderer is malformed
    #[error("Invalid model: {0}")]
    InvalidModel(#[from] ModelError),

    /// The viewport has a zero dimension
    #[error("Invalid viewport {width}x{height}")]
    InvalidViewport {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// The state does not match the model topology
    #[error("State has {actual} {what} entries, model has {expected}")]
    StateMismatch {
        /// Kind of entry that disagrees
        what: &'static str,
        /// Count in the model
        expected: usize,
        /// Count in the state
        actual: usize,
    },
}
