use anyhow::Result;
use winit::dpi::PhysicalSize;

use crate::render::DEPTH_STENCIL_FORMAT;

use super::scope::with_error_scope;

/// Depth-stencil texture matching the surface size.
pub struct DepthStencilTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthStencilTarget {
    pub fn new(device: &wgpu::Device, size: PhysicalSize<u32>) -> Result<Self> {
        with_error_scope(device, "depth-stencil target", || {
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("nin depth-stencil"),
                size: wgpu::Extent3d {
                    width: size.width.max(1),
                    height: size.height.max(1),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_STENCIL_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

            Self { texture, view }
        })
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        let s = self.texture.size();
        PhysicalSize::new(s.width, s.height)
    }
}
