//! Packed mesh slots and per-mesh views

use serde::{Serialize, Deserialize};
use std::ops::Range;

/// Element counts of one mesh stored in the model's packed mesh buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshSlot {
    /// Number of vertices
    pub vertnum: usize,
    /// Number of triangles
    pub facenum: usize,
    /// Number of texture coordinates
    #[serde(default)]
    pub texcoordnum: usize,
}

/// Ranges of one mesh inside the packed buffers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshRanges {
    /// Range into `mesh_vert`
    pub vertices: Range<usize>,
    /// Range into `mesh_face` and `mesh_facetexcoord`
    pub faces: Range<usize>,
    /// Range into `mesh_texcoord`
    pub texcoords: Range<usize>,
}

/// Borrowed view of one mesh
#[derive(Debug, Clone, Copy)]
pub struct MeshView<'a> {
    /// Vertex positions in the mesh frame
    pub vertices: &'a [[f32; 3]],
    /// Triangles, indices local to this mesh
    pub faces: &'a [[u32; 3]],
    /// Texture coordinates
    pub texcoords: &'a [[f32; 2]],
    /// Per-face texture coordinate indices, present when the mesh has texcoords
    pub face_texcoords: Option<&'a [[u32; 3]]>,
}

impl MeshView<'_> {
    /// Flattened triangle vertex indices
    pub fn face_vertex_indices(&self) -> Vec<i32> {
        self.faces
            .iter()
            .flat_map(|face| face.iter().map(|&index| index as i32))
            .collect()
    }

    /// Texture coordinates expanded per face corner
    ///
    /// `None` when the mesh has no texcoords or a face indexes past them.
    pub fn face_varying_texcoords(&self) -> Option<Vec<[f32; 2]>> {
        self.face_texcoords?
            .iter()
            .flat_map(|face| face.iter())
            .map(|&index| self.texcoords.get(index as usize).copied())
            .collect()
    }
}

/// Running-sum ranges for a sequence of counts
pub(crate) fn running_ranges(counts: impl Iterator<Item = usize>) -> Vec<Range<usize>> {
    let mut start = 0;
    counts
        .map(|count| {
            let range = start..start + count;
            start += count;
            range
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_ranges() {
        let ranges = running_ranges([3, 0, 2].into_iter());
        assert_eq!(ranges, vec![0..3, 3..3, 3..5]);
    }

    #[test]
    fn test_face_varying_texcoords() {
        let vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let faces = [[0, 1, 2]];
        let texcoords = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let face_texcoords = [[2, 1, 0]];
        let view = MeshView {
            vertices: &vertices,
            faces: &faces,
            texcoords: &texcoords,
            face_texcoords: Some(&face_texcoords),
        };

        assert_eq!(view.face_vertex_indices(), vec![0, 1, 2]);
        assert_eq!(
            view.face_varying_texcoords().unwrap(),
            vec![[0.0, 1.0], [1.0, 0.0], [0.0, 0.0]]
        );
    }

    #[test]
    fn test_out_of_range_texcoord_index_gives_none() {
        let vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let faces = [[0, 1, 2]];
        let texcoords = [[0.0, 0.0], [1.0, 0.0]];
        let face_texcoords = [[0, 1, 2]];
        let view = MeshView {
            vertices: &vertices,
            faces: &faces,
            texcoords: &texcoords,
            face_texcoords: Some(&face_texcoords),
        };

        assert_eq!(view.face_varying_texcoords(), None);
    }
}
