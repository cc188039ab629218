//! Minimal scene description stage
//!
//! An in-memory stage of typed prims with attributes and relationships,
//! saved as `.usda` text. Only the subset needed to describe rendered
//! geometry, lights, a camera and preview materials is supported.

mod path;
mod prim;
mod stage;
mod value;
mod writer;

pub mod geom;

pub use path::SdfPath;
pub use prim::{Attribute, Prim, Variability};
pub use stage::{PrimIter, Stage};
pub use value::Value;

use thiserror::Error;

slotmap::new_key_type! {
    /// Handle to a prim stored on a [`Stage`]
    pub struct PrimKey;
}

/// Stage up axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpAxis {
    /// Y up
    #[default]
    Y,
    /// Z up
    Z,
}

impl UpAxis {
    /// Metadata token
    pub fn token(self) -> &'static str {
        match self {
            UpAxis::Y => "Y",
            UpAxis::Z => "Z",
        }
    }
}

/// Stage errors
#[derive(Debug, Error)]
pub enum UsdError {
    /// Malformed path or prim name
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Malformed property name
    #[error("Invalid property name: {0}")]
    InvalidPropertyName(String),

    /// Prim defined before its parent
    #[error("Parent prim of {0} is not defined")]
    MissingParent(String),

    /// Root or property path where a prim path is required
    #[error("Not a prim path: {0}")]
    NotAPrimPath(String),

    /// No prim with this path or key
    #[error("Unknown prim: {0}")]
    UnknownPrim(String),

    /// Value of the wrong type for an attribute
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Declared type
        expected: String,
        /// Type of the rejected value
        actual: String,
    },

    /// [`UsdError::TypeMismatch`] on a named attribute
    #[error("Attribute {attribute} has type {expected}, got {actual}")]
    AttributeTypeMismatch {
        /// Attribute path
        attribute: String,
        /// Declared type
        expected: String,
        /// Type of the rejected value
        actual: String,
    },

    /// Saving an in-memory stage
    #[error("Stage has no backing file")]
    NoBackingFile,

    /// Writing the layer failed
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Layer file
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}
