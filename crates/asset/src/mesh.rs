//! CPU-side vertex buffer produced by loaders.

use bytemuck::{Pod, Zeroable};

/// One triangle corner: position + normal, object space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Floats per vertex in the flat buffer.
    pub const FLOATS: usize = 6;
    /// Byte stride between consecutive vertices.
    pub const STRIDE: usize = std::mem::size_of::<MeshVertex>();
    pub const POSITION_OFFSET: usize = 0;
    pub const NORMAL_OFFSET: usize = 3 * std::mem::size_of::<f32>();

    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Flat, non-indexed triangle list: `px py pz nx ny nz` per corner,
/// corners grouped in triples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexBuffer {
    data: Vec<f32>,
}

impl VertexBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from whole triangles.
    pub fn from_triangles(triangles: &[[MeshVertex; 3]]) -> Self {
        let mut buffer = Self::new();
        for tri in triangles {
            buffer.push_triangle(*tri);
        }
        buffer
    }

    pub(crate) fn push_triangle(&mut self, corners: [MeshVertex; 3]) {
        self.data
            .extend_from_slice(bytemuck::cast_slice::<MeshVertex, f32>(&corners));
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.data
    }

    /// Raw bytes, ready for a GPU vertex buffer upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.data.len() / MeshVertex::FLOATS
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Typed view over the flat data (no copy).
    pub fn vertices(&self) -> &[MeshVertex] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn triangles(&self) -> impl Iterator<Item = [MeshVertex; 3]> + '_ {
        self.vertices()
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
    }
}

impl From<VertexBuffer> for Vec<f32> {
    fn from(buffer: VertexBuffer) -> Self {
        buffer.into_inner()
    }
}
