//! Asset export
//!
//! Writes the model's packed textures out as standalone image files that the
//! USD materials reference by path.

pub mod texture_export;

pub use texture_export::{extract_textures, texture_file_name, texture_image, TextureAsset};

use thiserror::Error;

/// Asset export errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Texture slot does not exist in the model
    #[error("Texture not found: {0}")]
    NotFound(usize),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Image encoding failed
    #[error("Failed to encode image {path}: {source}")]
    Encode {
        /// Destination file
        path: String,
        /// Encoder error
        #[source]
        source: image::ImageError,
    },

    /// IO error during asset export
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
