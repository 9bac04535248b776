//! Outlined-shape groups.
//!
//! A group pairs an outer mesh with an inner (inset) mesh. The inner mesh only
//! ever reaches the stencil buffer; the outer mesh is colored wherever the inner
//! mesh did not write, which leaves a border ring.

use anyhow::Result;

use crate::coords::{PixelRect, Viewport};
use crate::geometry::{MeshData, QUADS_PER_MESH};
use crate::paint::Color;

use super::mesh::GpuMesh;

/// Which of a group's meshes a draw uses.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MeshRole {
    Outer,
    Inner,
}

/// Border parameters applied to every rectangle of a group.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OutlineStyle {
    /// Inset of the left/right edges, in pixels.
    pub side_thickness: f32,
    /// Inset of the top/bottom edges, in pixels.
    pub top_thickness: f32,
    /// Color of the visible border.
    pub border: Color,
    /// Vertex color of the inset mesh. Never reaches the color target.
    pub inset: Color,
}

impl OutlineStyle {
    pub fn uniform(thickness: f32, border: Color) -> Self {
        Self {
            side_thickness: thickness,
            top_thickness: thickness,
            border,
            inset: Color::RED,
        }
    }
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self::uniform(5.0, Color::GREEN)
    }
}

/// CPU-side meshes of one outlined-shape group.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OutlineShape {
    pub outer: MeshData,
    pub inner: MeshData,
}

impl OutlineShape {
    /// Builds outer and inset meshes for `rects`.
    ///
    /// The inset rectangles must stay inside their outer rectangles for a clean
    /// outline; this is not checked beyond a debug log.
    pub fn from_rects(
        rects: [PixelRect; QUADS_PER_MESH],
        style: OutlineStyle,
        viewport: Viewport,
    ) -> Self {
        let insets = rects.map(|r| r.inset_xy(style.side_thickness, style.top_thickness));

        for (outer, inner) in rects.iter().zip(&insets) {
            if inner.is_degenerate() || !outer.contains_rect(*inner) {
                log::debug!("outline inset {inner:?} is not inside {outer:?}");
            }
        }

        Self {
            outer: MeshData::from_rects(rects, viewport, style.border),
            inner: MeshData::from_rects(insets, viewport, style.inset),
        }
    }

    #[inline]
    pub fn mesh(&self, role: MeshRole) -> &MeshData {
        match role {
            MeshRole::Outer => &self.outer,
            MeshRole::Inner => &self.inner,
        }
    }
}

/// GPU buffers of one outlined-shape group.
pub struct OutlineGroup {
    outer: GpuMesh,
    inner: GpuMesh,
}

impl OutlineGroup {
    pub fn upload(device: &wgpu::Device, shape: &OutlineShape) -> Result<Self> {
        Ok(Self {
            outer: GpuMesh::upload(device, "nin outline outer vbo", &shape.outer)?,
            inner: GpuMesh::upload(device, "nin outline inner vbo", &shape.inner)?,
        })
    }

    #[inline]
    pub fn mesh(&self, role: MeshRole) -> &GpuMesh {
        match role {
            MeshRole::Outer => &self.outer,
            MeshRole::Inner => &self.inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::write_quad;
    use crate::geometry::Vertex;

    #[test]
    fn inner_mesh_uses_inset_rects() {
        let vp = Viewport::new(800.0, 600.0);
        let rects = [
            PixelRect::new(20.0, 20.0, 250.0, 500.0),
            PixelRect::new(50.0, 50.0, 280.0, 530.0),
        ];
        let shape = OutlineShape::from_rects(rects, OutlineStyle::default(), vp);

        let mut expected = [Vertex::default(); 4];
        write_quad(PixelRect::new(25.0, 25.0, 245.0, 495.0), vp, Color::RED, &mut expected, 0);
        assert_eq!(shape.inner.vertices[..4], expected);

        write_quad(PixelRect::new(55.0, 55.0, 275.0, 525.0), vp, Color::RED, &mut expected, 0);
        assert_eq!(shape.inner.vertices[4..], expected);

        assert!(shape.outer.vertices.iter().all(|v| v.color == Color::GREEN.to_array()));
    }

    #[test]
    fn mesh_role_selects_mesh() {
        let vp = Viewport::new(100.0, 100.0);
        let r = PixelRect::new(10.0, 10.0, 90.0, 90.0);
        let shape = OutlineShape::from_rects([r, r], OutlineStyle::default(), vp);
        assert_eq!(shape.mesh(MeshRole::Outer), &shape.outer);
        assert_eq!(shape.mesh(MeshRole::Inner), &shape.inner);
    }
}
