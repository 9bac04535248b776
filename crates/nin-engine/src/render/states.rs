//! Fixed, frame-invariant pipeline state for the outline technique.
//!
//! Two depth/stencil variants exist:
//! - `default`: stencil always passes and increments (clamped) on pass.
//! - `discard`: stencil passes only where the buffer equals the reference, no writes.
//!
//! Back faces use `Never` in both variants while culling stays disabled, so only
//! front-facing fragments interact with the stencil buffer.

use crate::geometry::Vertex;

/// Combined 24-bit depth / 8-bit stencil format. Depth is cleared but not tested.
pub const DEPTH_STENCIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// Full 8-bit stencil mask.
pub const STENCIL_MASK: u32 = 0xFF;

/// Stencil pass variants used by the two-pass outline protocol.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StencilPass {
    /// Writes the mask footprint into the stencil buffer; no color output.
    Mask,
    /// Colors only where the stencil buffer equals the reference.
    Visible,
}

impl StencilPass {
    /// Whether the pixel shader runs (and color is written) in this pass.
    #[inline]
    pub fn writes_color(self) -> bool {
        matches!(self, StencilPass::Visible)
    }

    pub fn depth_stencil_state(self) -> wgpu::DepthStencilState {
        match self {
            StencilPass::Mask => default_depth_stencil(),
            StencilPass::Visible => discard_depth_stencil(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StencilPass::Mask => "nin outline mask",
            StencilPass::Visible => "nin outline visible",
        }
    }
}

/// Rasterizer state: triangle strips, solid fill, no culling.
///
/// Clockwise winding is front-facing, matching the geometry builder's corner order.
pub fn primitive_state() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleStrip,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Cw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

/// Back faces never pass and never modify the stencil buffer.
fn back_face() -> wgpu::StencilFaceState {
    wgpu::StencilFaceState {
        compare: wgpu::CompareFunction::Never,
        fail_op: wgpu::StencilOperation::Keep,
        depth_fail_op: wgpu::StencilOperation::Keep,
        pass_op: wgpu::StencilOperation::Keep,
    }
}

fn depth_stencil(front: wgpu::StencilFaceState) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_STENCIL_FORMAT,
        depth_write_enabled: false,
        depth_compare: wgpu::CompareFunction::Always,
        stencil: wgpu::StencilState {
            front,
            back: back_face(),
            read_mask: STENCIL_MASK,
            write_mask: STENCIL_MASK,
        },
        bias: wgpu::DepthBiasState::default(),
    }
}

/// "default": always pass, increment-and-clamp on pass.
pub fn default_depth_stencil() -> wgpu::DepthStencilState {
    depth_stencil(wgpu::StencilFaceState {
        compare: wgpu::CompareFunction::Always,
        fail_op: wgpu::StencilOperation::Keep,
        depth_fail_op: wgpu::StencilOperation::Keep,
        pass_op: wgpu::StencilOperation::IncrementClamp,
    })
}

/// "discard": pass only where stencil equals the bound reference; value is preserved.
pub fn discard_depth_stencil() -> wgpu::DepthStencilState {
    depth_stencil(wgpu::StencilFaceState {
        compare: wgpu::CompareFunction::Equal,
        fail_op: wgpu::StencilOperation::Keep,
        depth_fail_op: wgpu::StencilOperation::Keep,
        pass_op: wgpu::StencilOperation::Keep,
    })
}

/// Builds one of the two outline pipelines.
///
/// The mask pipeline has no fragment stage: with no color targets bound, the pass
/// only touches the stencil plane.
pub(crate) fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    vertex: &wgpu::ShaderModule,
    pixel: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    pass: StencilPass,
) -> wgpu::RenderPipeline {
    let color_targets = [Some(wgpu::ColorTargetState {
        format: surface_format,
        blend: None,
        write_mask: wgpu::ColorWrites::ALL,
    })];

    let fragment = pass.writes_color().then(|| wgpu::FragmentState {
        module: pixel,
        entry_point: Some(super::shaders::PIXEL_ENTRY),
        compilation_options: Default::default(),
        targets: &color_targets,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(pass.label()),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module: vertex,
            entry_point: Some(super::shaders::VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },

        fragment,
        primitive: primitive_state(),
        depth_stencil: Some(pass.depth_stencil_state()),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
