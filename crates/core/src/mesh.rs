//! CPU-side mesh data: positions, optional indices, and how to draw them.
//!
//! Meshes are hard-coded, uploaded once, and never modified. Every vertex is
//! a bare position; the layout is described by [`VertexLayout::POSITION`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How a single vertex attribute is laid out in a vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    /// Shader attribute location.
    pub location: u32,
    /// Number of f32 components per vertex.
    pub components: i32,
    /// Bytes between consecutive vertices.
    pub stride: i32,
    /// Byte offset of the first component.
    pub offset: i32,
}

impl VertexLayout {
    /// Tightly packed `vec3` position at location 0.
    pub const POSITION: VertexLayout = VertexLayout {
        location: 0,
        components: 3,
        stride: std::mem::size_of::<Vec3>() as i32,
        offset: 0,
    };
}

/// The draw call a mesh needs, with the number of vertices it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    /// Non-indexed triangles, `count` vertices.
    Arrays { count: i32 },
    /// Indexed triangles with `u32` indices, `count` indices.
    Elements { count: i32 },
}

impl DrawCall {
    /// Number of vertices emitted by the draw call.
    pub fn vertex_count(&self) -> i32 {
        match self {
            DrawCall::Arrays { count } | DrawCall::Elements { count } => *count,
        }
    }
}

/// Which of the built-in meshes to draw each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshKind {
    #[default]
    Rectangle,
    Triangle,
}

impl MeshKind {
    /// Lowercase name, as used in config files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            MeshKind::Rectangle => "rectangle",
            MeshKind::Triangle => "triangle",
        }
    }

    /// Builds the mesh data for this kind.
    pub fn mesh(&self) -> MeshData {
        match self {
            MeshKind::Rectangle => MeshData::rectangle(),
            MeshKind::Triangle => MeshData::triangle(),
        }
    }
}

/// Vertex positions plus optional triangle indices.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    positions: Vec<Vec3>,
    indices: Option<Vec<u32>>,
}

impl MeshData {
    /// A single triangle drawn without an index buffer.
    pub fn triangle() -> Self {
        Self {
            positions: vec![
                Vec3::new(-0.5, -0.5, 0.0), // left
                Vec3::new(0.5, -0.5, 0.0),  // right
                Vec3::new(0.0, 0.5, 0.0),   // top
            ],
            indices: None,
        }
    }

    /// An axis-aligned rectangle built from two indexed triangles sharing
    /// the diagonal between vertices 1 and 3.
    pub fn rectangle() -> Self {
        Self {
            positions: vec![
                Vec3::new(0.5, 0.5, 0.0),   // top right
                Vec3::new(0.5, -0.5, 0.0),  // bottom right
                Vec3::new(-0.5, -0.5, 0.0), // bottom left
                Vec3::new(-0.5, 0.5, 0.0),  // top left
            ],
            indices: Some(vec![0, 1, 3, 1, 2, 3]),
        }
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Triangle indices, if the mesh is indexed.
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Positions as a tightly packed byte slice for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Indices as a byte slice for upload, if the mesh is indexed.
    pub fn index_bytes(&self) -> Option<&[u8]> {
        self.indices.as_deref().map(bytemuck::cast_slice)
    }

    /// Groups the index list into triangles.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        match &self.indices {
            Some(indices) => indices
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect(),
            None => (0..self.positions.len() as u32 / 3)
                .map(|t| [t * 3, t * 3 + 1, t * 3 + 2])
                .collect(),
        }
    }

    /// The draw call that renders the whole mesh.
    pub fn draw_call(&self) -> DrawCall {
        match &self.indices {
            Some(indices) => DrawCall::Elements {
                count: indices.len() as i32,
            },
            None => DrawCall::Arrays {
                count: self.positions.len() as i32,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_layout_is_three_tightly_packed_floats() {
        let layout = VertexLayout::POSITION;
        assert_eq!(layout.location, 0);
        assert_eq!(layout.components, 3);
        assert_eq!(layout.stride, 12);
        assert_eq!(layout.offset, 0);
    }

    #[test]
    fn rectangle_has_four_vertices_and_six_indices() {
        let rect = MeshData::rectangle();
        assert_eq!(rect.positions().len(), 4);
        assert_eq!(rect.indices().unwrap(), &[0, 1, 3, 1, 2, 3]);
    }

    #[test]
    fn rectangle_draws_six_indexed_vertices() {
        let rect = MeshData::rectangle();
        assert_eq!(rect.draw_call(), DrawCall::Elements { count: 6 });
        assert_eq!(rect.draw_call().vertex_count(), 6);
    }

    #[test]
    fn rectangle_is_two_triangles_sharing_a_diagonal() {
        let rect = MeshData::rectangle();
        assert_eq!(rect.triangles(), vec![[0, 1, 3], [1, 2, 3]]);
    }

    #[test]
    fn rectangle_corners_span_half_unit_square() {
        let rect = MeshData::rectangle();
        for p in rect.positions() {
            assert_eq!(p.x.abs(), 0.5, "x out of place: {p}");
            assert_eq!(p.y.abs(), 0.5, "y out of place: {p}");
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn triangle_draws_three_vertices_without_indices() {
        let tri = MeshData::triangle();
        assert!(tri.indices().is_none());
        assert!(tri.index_bytes().is_none());
        assert_eq!(tri.draw_call(), DrawCall::Arrays { count: 3 });
        assert_eq!(tri.triangles(), vec![[0, 1, 2]]);
    }

    #[test]
    fn vertex_bytes_match_stride_times_vertex_count() {
        let rect = MeshData::rectangle();
        assert_eq!(
            rect.vertex_bytes().len(),
            rect.positions().len() * VertexLayout::POSITION.stride as usize
        );
        let tri = MeshData::triangle();
        assert_eq!(tri.vertex_bytes().len(), 36);
    }

    #[test]
    fn vertex_bytes_start_with_first_position() {
        let rect = MeshData::rectangle();
        let first: [f32; 3] = bytemuck::pod_read_unaligned(&rect.vertex_bytes()[..12]);
        assert_eq!(first, [0.5, 0.5, 0.0]);
    }

    #[test]
    fn index_bytes_are_four_bytes_per_index() {
        let rect = MeshData::rectangle();
        assert_eq!(rect.index_bytes().unwrap().len(), 6 * 4);
    }

    #[test]
    fn every_index_refers_to_an_existing_vertex() {
        for mesh in [MeshData::rectangle(), MeshData::triangle()] {
            let vertex_count = mesh.positions().len() as u32;
            for i in mesh.triangles().into_iter().flatten() {
                assert!(i < vertex_count, "index {i} >= {vertex_count}");
            }
        }
    }

    #[test]
    fn mesh_kind_defaults_to_rectangle() {
        assert_eq!(MeshKind::default(), MeshKind::Rectangle);
        assert_eq!(MeshKind::default().mesh(), MeshData::rectangle());
    }

    #[test]
    fn mesh_kind_serializes_lowercase() {
        let json = serde_json::to_string(&MeshKind::Triangle).unwrap();
        assert_eq!(json, "\"triangle\"");
        let back: MeshKind = serde_json::from_str("\"rectangle\"").unwrap();
        assert_eq!(back, MeshKind::Rectangle);
        assert_eq!(MeshKind::Triangle.name(), "triangle");
    }
}
