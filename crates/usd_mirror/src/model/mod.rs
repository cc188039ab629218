//! Simulation model
//!
//! The model is the immutable, static half of a simulated scene: texture and
//! mesh data packed into flat buffers, geometry and light definitions, and a
//! default camera. It is shared read-only between the renderer and the
//! mirror through an `Arc`.
//!
//! Models load from `.ron` or `.toml` files through the [`Config`] trait and
//! must pass [`Model::validate`] before a renderer accepts them.

mod geom;
mod light;
mod mesh;
mod texture;

pub use geom::{GeomDef, GeomType, GeomCategory};
pub use light::{LightDef, CameraDef};
pub use mesh::{MeshSlot, MeshRanges, MeshView};
pub use texture::{TextureSlot, RGB_CHANNELS};

use serde::{Serialize, Deserialize};
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use mesh::running_ranges;

/// Static description of a simulated scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Model {
    /// Texture dimensions, in slot order
    pub textures: Vec<TextureSlot>,
    /// All texture texels, packed slot after slot, rows bottom-to-top
    pub tex_rgb: Vec<u8>,
    /// Mesh element counts, in slot order
    pub meshes: Vec<MeshSlot>,
    /// All mesh vertices, packed mesh after mesh
    pub mesh_vert: Vec<[f32; 3]>,
    /// All mesh triangles, indices local to their mesh
    pub mesh_face: Vec<[u32; 3]>,
    /// All mesh texture coordinates
    pub mesh_texcoord: Vec<[f32; 2]>,
    /// Per-face texture coordinate indices, parallel to `mesh_face`
    pub mesh_facetexcoord: Vec<[u32; 3]>,
    /// Geometry definitions
    pub geoms: Vec<GeomDef>,
    /// Light definitions
    pub lights: Vec<LightDef>,
    /// Default camera
    pub camera: CameraDef,
}

impl Config for Model {}

impl Model {
    /// Load a model from a `.ron` or `.toml` file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let model = Self::load_from_file(path)?;
        model.validate()?;

        log::info!(
            "Loaded model {:?}: {} textures, {} meshes, {} geoms, {} lights",
            path,
            model.texture_count(),
            model.mesh_count(),
            model.geom_count(),
            model.light_count()
        );
        Ok(model)
    }

    /// Number of texture slots
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of mesh slots
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Number of geometries
    pub fn geom_count(&self) -> usize {
        self.geoms.len()
    }

    /// Number of lights
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Byte ranges of every texture inside `tex_rgb`
    pub fn texture_ranges(&self) -> Vec<Range<usize>> {
        running_ranges(self.textures.iter().map(TextureSlot::byte_len))
    }

    /// Packed texels of texture `texid`
    pub fn texture_bytes(&self, texid: usize) -> Option<&[u8]> {
        let range = self.texture_ranges().into_iter().nth(texid)?;
        self.tex_rgb.get(range)
    }

    /// Buffer ranges of every mesh
    pub fn mesh_ranges(&self) -> Vec<MeshRanges> {
        let vertices = running_ranges(self.meshes.iter().map(|mesh| mesh.vertnum));
        let faces = running_ranges(self.meshes.iter().map(|mesh| mesh.facenum));
        let texcoords = running_ranges(self.meshes.iter().map(|mesh| mesh.texcoordnum));

        vertices
            .into_iter()
            .zip(faces)
            .zip(texcoords)
            .map(|((vertices, faces), texcoords)| MeshRanges { vertices, faces, texcoords })
            .collect()
    }

    /// Borrow mesh `dataid`
    pub fn mesh(&self, dataid: usize) -> Option<MeshView<'_>> {
        let ranges = self.mesh_ranges().into_iter().nth(dataid)?;
        let has_texcoords = !ranges.texcoords.is_empty();

        Some(MeshView {
            vertices: self.mesh_vert.get(ranges.vertices)?,
            faces: self.mesh_face.get(ranges.faces.clone())?,
            texcoords: self.mesh_texcoord.get(ranges.texcoords)?,
            face_texcoords: if has_texcoords {
                Some(self.mesh_facetexcoord.get(ranges.faces)?)
            } else {
                None
            },
        })
    }

    /// Check that buffers match the declared counts and every reference is in range
    pub fn validate(&self) -> Result<(), ModelError> {
        self.validate_textures()?;
        self.validate_meshes()?;
        self.validate_geoms()
    }

    fn validate_textures(&self) -> Result<(), ModelError> {
        for (texid, slot) in self.textures.iter().enumerate() {
            if slot.width == 0 || slot.height == 0 {
                return Err(ModelError::EmptyTexture { texid });
            }
        }

        let expected: usize = self.textures.iter().map(TextureSlot::byte_len).sum();
        check_buffer("tex_rgb", expected, self.tex_rgb.len())
    }

    fn validate_meshes(&self) -> Result<(), ModelError> {
        let vertnum: usize = self.meshes.iter().map(|mesh| mesh.vertnum).sum();
        let facenum: usize = self.meshes.iter().map(|mesh| mesh.facenum).sum();
        let texcoordnum: usize = self.meshes.iter().map(|mesh| mesh.texcoordnum).sum();

        check_buffer("mesh_vert", vertnum, self.mesh_vert.len())?;
        check_buffer("mesh_face", facenum, self.mesh_face.len())?;
        check_buffer("mesh_texcoord", texcoordnum, self.mesh_texcoord.len())?;
        if self.meshes.iter().any(|mesh| mesh.texcoordnum > 0) {
            check_buffer("mesh_facetexcoord", self.mesh_face.len(), self.mesh_facetexcoord.len())?;
        }

        for (dataid, (slot, ranges)) in self.meshes.iter().zip(self.mesh_ranges()).enumerate() {
            for face in &self.mesh_face[ranges.faces.clone()] {
                if let Some(&index) = face.iter().find(|&&index| index as usize >= slot.vertnum) {
                    return Err(ModelError::IndexOutOfRange {
                        what: "vertex",
                        dataid,
                        index: index as usize,
                        count: slot.vertnum,
                    });
                }
            }

            if slot.texcoordnum > 0 {
                for face in &self.mesh_facetexcoord[ranges.faces] {
                    if let Some(&index) = face.iter().find(|&&index| index as usize >= slot.texcoordnum) {
                        return Err(ModelError::IndexOutOfRange {
                            what: "texcoord",
                            dataid,
                            index: index as usize,
                            count: slot.texcoordnum,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    fn validate_geoms(&self) -> Result<(), ModelError> {
        for (index, geom) in self.geoms.iter().enumerate() {
            if let Some(texid) = geom.texid {
                if texid >= self.texture_count() {
                    return Err(ModelError::UnknownTexture { geom: index, texid, count: self.texture_count() });
                }
            }

            if geom.geom_type == GeomType::Mesh {
                match geom.dataid {
                    Some(dataid) if dataid < self.mesh_count() => {}
                    Some(dataid) => {
                        return Err(ModelError::UnknownMesh { geom: index, dataid, count: self.mesh_count() });
                    }
                    None => return Err(ModelError::MissingMeshData { geom: index }),
                }
            }
        }

        Ok(())
    }
}

fn check_buffer(buffer: &'static str, expected: usize, actual: usize) -> Result<(), ModelError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ModelError::BufferSize { buffer, expected, actual })
    }
}

/// Model loading and validation errors
#[derive(Error, Debug)]
pub enum ModelError {
    /// The model file could not be read or parsed
    #[error("Failed to load model: {0}")]
    Load(#[from] ConfigError),

    /// A packed buffer does not match the declared counts
    #[error("Buffer {buffer} has {actual} elements, expected {expected}")]
    BufferSize {
        /// Buffer name
        buffer: &'static str,
        /// Size implied by the slot counts
        expected: usize,
        /// Actual size
        actual: usize,
    },

    /// A texture slot has a zero dimension
    #[error("Texture {texid} has zero width or height")]
    EmptyTexture {
        /// Texture slot
        texid: usize,
    },

    /// A mesh face references a missing element
    #[error("Mesh {dataid} references {what} {index}, but it only has {count}")]
    IndexOutOfRange {
        /// Kind of element referenced
        what: &'static str,
        /// Mesh slot
        dataid: usize,
        /// Offending index
        index: usize,
        /// Number of elements in the mesh
        count: usize,
    },

    /// A geometry references a texture slot that does not exist
    #[error("Geom {geom} references texture {texid}, but the model has {count} textures")]
    UnknownTexture {
        /// Geometry index
        geom: usize,
        /// Texture slot
        texid: usize,
        /// Number of texture slots
        count: usize,
    },

    /// A mesh geometry references a mesh slot that does not exist
    #[error("Geom {geom} references mesh {dataid}, but the model has {count} meshes")]
    UnknownMesh {
        /// Geometry index
        geom: usize,
        /// Mesh slot
        dataid: usize,
        /// Number of mesh slots
        count: usize,
    },

    /// A mesh geometry has no mesh slot
    #[error("Mesh geom {geom} has no mesh data id")]
    MissingMeshData {
        /// Geometry index
        geom: usize,
    },
}

#[cfg(test)]
pub(crate) mod test_models {
    //! Small models shared by tests across the crate

    use super::*;

    /// A unit tetrahedron with per-face texture coordinates
    pub fn tetrahedron_model() -> Model {
        Model {
            meshes: vec![MeshSlot { vertnum: 4, facenum: 4, texcoordnum: 3 }],
            mesh_vert: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
            ],
            mesh_face: vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
            mesh_texcoord: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            mesh_facetexcoord: vec![[0, 1, 2], [0, 1, 2], [0, 1, 2], [0, 1, 2]],
            ..Default::default()
        }
    }

    /// The example scene: two textures (4x4 and 2x2), a decorative geom,
    /// a textured mesh, a textured sphere and one light
    pub fn example_model() -> Model {
        let textures = vec![TextureSlot::new(4, 4), TextureSlot::new(2, 2)];
        let total: usize = textures.iter().map(TextureSlot::byte_len).sum();
        let tex_rgb = (0..total).map(|i| (i * 7 % 256) as u8).collect();

        Model {
            textures,
            tex_rgb,
            geoms: vec![
                GeomDef::new(GeomType::Box, [0.05, 0.05, 0.05]).decorative(),
                GeomDef::mesh(0).with_texture(0).named("tetra"),
                GeomDef::new(GeomType::Sphere, [0.1, 0.0, 0.0])
                    .with_rgba([1.0, 0.0, 0.0, 1.0])
                    .with_texture(1),
            ],
            lights: vec![LightDef::default()],
            ..tetrahedron_model()
        }
    }
}
