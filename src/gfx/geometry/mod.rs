//! # Procedural Geometry Generation
//!
//! Generates the primitive shapes the demo scene is built from, so no model
//! files are needed.
//!
//! ## Supported Primitives
//!
//! - **Box**: axis-aligned box with per-face normals and UVs
//! - **Plane**: flat plane in the XY plane facing +Z
//! - **Sphere**: UV sphere with configurable resolution
//!
//! ## Usage
//!
//! ```rust
//! use shadowbox::gfx::geometry::{generate_box, generate_plane, generate_sphere};
//!
//! let cube = generate_box(2.0, 2.0, 2.0);
//! let floor = generate_plane(30.0, 30.0, 1, 1);
//! let globe = generate_sphere(4.0, 50, 50);
//! assert_eq!(cube.triangle_count(), 12);
//! # let _ = (floor, globe);
//! ```

pub mod primitives;

use std::collections::BTreeSet;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v), v = 0 at the top of the image
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves the attribute streams into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coords: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }

    /// Line-list indices covering every triangle edge once
    pub fn wireframe_indices(&self) -> Vec<u32> {
        wireframe_indices(&self.indices)
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts triangle-list indices into line-list indices, one line per
/// unique undirected edge
pub fn wireframe_indices(triangles: &[u32]) -> Vec<u32> {
    let mut edges = BTreeSet::new();
    for triangle in triangles.chunks_exact(3) {
        for (a, b) in [
            (triangle[0], triangle[1]),
            (triangle[1], triangle[2]),
            (triangle[2], triangle[0]),
        ] {
            edges.insert((a.min(b), a.max(b)));
        }
    }

    edges.into_iter().flat_map(|(a, b)| [a, b]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_edges_are_emitted_once() {
        // two triangles sharing the 0-2 diagonal
        let lines = wireframe_indices(&[0, 1, 2, 2, 3, 0]);
        assert_eq!(lines.len(), 5 * 2);
        assert_eq!(lines, vec![0, 1, 0, 2, 0, 3, 1, 2, 2, 3]);
    }

    #[test]
    fn trailing_partial_triangle_is_ignored() {
        assert_eq!(wireframe_indices(&[0, 1, 2, 7]).len(), 6);
    }

    #[test]
    fn box_wireframe_has_face_diagonals() {
        // 6 faces * (4 border edges + 1 diagonal); faces do not share vertices
        let cube = generate_box(1.0, 1.0, 1.0);
        assert_eq!(cube.wireframe_indices().len(), 6 * 5 * 2);
    }

    #[test]
    fn vertices_carry_all_attributes() {
        let plane = generate_plane(2.0, 2.0, 1, 1);
        let vertices = plane.to_vertices();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[0].position, [-1.0, 1.0, 0.0]);
        assert_eq!(vertices[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(vertices[0].tex_coords, [0.0, 0.0]);
    }
}
