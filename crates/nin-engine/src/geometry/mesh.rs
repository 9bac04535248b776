use crate::coords::{PixelRect, Viewport};
use crate::paint::Color;

use super::quad::{write_quad, QUAD_VERTEX_COUNT};
use super::Vertex;

/// Quads stored in one mesh.
pub const QUADS_PER_MESH: usize = 2;

/// Vertices stored in one mesh.
pub const MESH_VERTEX_COUNT: usize = QUADS_PER_MESH * QUAD_VERTEX_COUNT;

/// CPU-side vertex data for one mesh: two quads, drawn as two 4-vertex strips.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: [Vertex; MESH_VERTEX_COUNT],
}

impl MeshData {
    /// Builds a mesh from two pixel rectangles sharing one color.
    pub fn from_rects(rects: [PixelRect; QUADS_PER_MESH], viewport: Viewport, color: Color) -> Self {
        let mut vertices = [Vertex::default(); MESH_VERTEX_COUNT];
        for (i, rect) in rects.into_iter().enumerate() {
            write_quad(rect, viewport, color, &mut vertices, i * QUAD_VERTEX_COUNT);
        }
        Self { vertices }
    }

    /// Vertex ranges of the individual strips, in draw order.
    pub fn strips() -> impl Iterator<Item = core::ops::Range<u32>> {
        (0..QUADS_PER_MESH as u32).map(|i| {
            let first = i * QUAD_VERTEX_COUNT as u32;
            first..first + QUAD_VERTEX_COUNT as u32
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_rects_fill_eight_vertices() {
        let vp = Viewport::new(800.0, 600.0);
        let a = PixelRect::new(20.0, 20.0, 250.0, 500.0);
        let b = PixelRect::new(50.0, 50.0, 280.0, 530.0);
        let mesh = MeshData::from_rects([a, b], vp, Color::GREEN);

        let mut first = [Vertex::default(); 4];
        write_quad(a, vp, Color::GREEN, &mut first, 0);
        let mut second = [Vertex::default(); 4];
        write_quad(b, vp, Color::GREEN, &mut second, 0);

        assert_eq!(mesh.vertices[..4], first);
        assert_eq!(mesh.vertices[4..], second);
        assert_eq!(mesh.as_bytes().len(), 8 * 24);
    }

    #[test]
    fn strips_cover_mesh_in_two_halves() {
        let strips: Vec<_> = MeshData::strips().collect();
        assert_eq!(strips, vec![0..4, 4..8]);
    }
}
