//! Scene mirror configuration

use serde::{Serialize, Deserialize};
use std::path::PathBuf;

use super::Config;

/// Settings for a [`SceneMirror`](crate::mirror::SceneMirror)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Path of the `.usda` layer the stage is saved to
    pub output_path: PathBuf,

    /// Directory the extracted `<index>.png` texture files are written to
    pub texture_dir: PathBuf,

    /// Viewport width handed to the renderer
    pub width: u32,

    /// Viewport height handed to the renderer
    pub height: u32,

    /// Author a `Camera` prim that follows the snapshot camera
    pub mirror_camera: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("usd_stage.usda"),
            texture_dir: PathBuf::from("."),
            width: 480,
            height: 480,
            mirror_camera: true,
        }
    }
}

impl Config for MirrorConfig {}

impl MirrorConfig {
    /// Create a configuration writing the stage and textures under `dir`
    pub fn in_directory(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            output_path: dir.join("usd_stage.usda"),
            texture_dir: dir,
            ..Default::default()
        }
    }

    /// Set the renderer viewport size
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
