use bytemuck::{Pod, Zeroable};

use crate::paint::Color;

/// Vertex record consumed by the outline shaders.
///
/// Position is already in NDC; color is RGB. Tightly packed, 24 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // color
    ];

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, color: Color) -> Self {
        Self {
            position: [x, y, z],
            color: color.to_array(),
        }
    }

    /// Input layout: one buffer slot, per-vertex stepping.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_tightly_packed() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);

        let attrs = layout.attributes;
        assert_eq!(attrs.len(), 2);
        assert_eq!((attrs[0].shader_location, attrs[0].offset), (0, 0));
        assert_eq!((attrs[1].shader_location, attrs[1].offset), (1, 12));
        assert_eq!(attrs[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attrs[1].format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn casts_to_bytes_without_padding() {
        let v = [Vertex::new(1.0, 2.0, 3.0, Color::GREEN); 2];
        assert_eq!(bytemuck::cast_slice::<Vertex, u8>(&v).len(), 48);
    }
}
