use anyhow::{ensure, Context, Result};

use crate::device::with_error_scope;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::outline::{OutlineGroup, OutlineShape};
use super::plan::{FramePlan, PassCommand, PassKind, PassSegment};
use super::shaders::ShaderSet;
use super::states::{create_pipeline, StencilPass};

/// Two-pass stencil outline renderer.
///
/// Every GPU resource is created once in [`OutlineRenderer::new`] and never
/// modified afterwards; each frame replays the same [`FramePlan`].
pub struct OutlineRenderer {
    mask_pipeline: wgpu::RenderPipeline,
    visible_pipeline: wgpu::RenderPipeline,
    groups: Vec<OutlineGroup>,

    plan: FramePlan,
    segments: Vec<PassSegment>,
}

impl OutlineRenderer {
    /// Builds both pipelines from `shaders` and uploads one group per shape.
    pub fn new(
        ctx: &RenderCtx<'_>,
        shaders: &ShaderSet,
        shapes: &[OutlineShape],
        clear: Color,
    ) -> Result<Self> {
        ensure!(
            ctx.viewport.is_valid(),
            "invalid viewport {}x{}",
            ctx.viewport.width,
            ctx.viewport.height
        );

        let device = ctx.device;
        let (mask_pipeline, visible_pipeline) = with_error_scope(device, "outline pipelines", || {
            let vertex = shaders.vertex.create_module(device);
            let pixel = shaders.pixel.create_module(device);

            // No bind groups: vertices arrive in clip space and the pixel shader
            // only forwards the interpolated color.
            let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("nin outline pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

            let pipeline = |pass| {
                create_pipeline(device, &layout, &vertex, &pixel, ctx.surface_format, pass)
            };
            (pipeline(StencilPass::Mask), pipeline(StencilPass::Visible))
        })
        .with_context(|| {
            format!(
                "failed to build outline pipelines from {} and {}",
                shaders.vertex.path.display(),
                shaders.pixel.path.display()
            )
        })?;

        let groups = shapes
            .iter()
            .map(|shape| OutlineGroup::upload(device, shape))
            .collect::<Result<Vec<_>>>()?;

        let plan = FramePlan::outline(clear, groups.len());
        let segments = plan.segments();

        log::info!(
            "outline renderer ready: {} group(s), {} draw(s) per frame, format {:?}",
            groups.len(),
            plan.draw_count(),
            ctx.surface_format
        );

        Ok(Self {
            mask_pipeline,
            visible_pipeline,
            groups,
            plan,
            segments,
        })
    }

    #[inline]
    pub fn plan(&self) -> &FramePlan {
        &self.plan
    }

    #[inline]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn pipeline(&self, pass: StencilPass) -> &wgpu::RenderPipeline {
        match pass {
            StencilPass::Mask => &self.mask_pipeline,
            StencilPass::Visible => &self.visible_pipeline,
        }
    }

    /// Records the whole frame into `target`.
    pub fn render(&self, target: &mut RenderTarget<'_>) {
        for segment in &self.segments {
            self.encode_segment(target, segment);
        }
    }

    fn encode_segment(&self, target: &mut RenderTarget<'_>, segment: &PassSegment) {
        let label = match segment.kind {
            PassKind::Clear => "nin clear pass",
            PassKind::Stencil(pass) => pass.label(),
        };

        let color = [Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: segment.color_load.map(Color::to_wgpu).into_wgpu(),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })];
        // Mask passes bind no color target to match their fragment-less pipeline.
        let color_attachments: &[Option<wgpu::RenderPassColorAttachment<'_>>] =
            if segment.has_color() { &color } else { &[] };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments,
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_stencil_view,
                depth_ops: Some(wgpu::Operations {
                    load: segment.depth_load.into_wgpu(),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: Some(wgpu::Operations {
                    load: segment.stencil_load.into_wgpu(),
                    store: wgpu::StoreOp::Store,
                }),
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let PassKind::Stencil(pass) = segment.kind else { return };

        rpass.set_pipeline(self.pipeline(pass));
        rpass.set_stencil_reference(segment.stencil_reference);

        let mut bound = false;
        for command in &segment.commands {
            match command {
                PassCommand::BindMesh { group, role } => {
                    bound = match self.groups.get(*group) {
                        Some(g) => {
                            rpass.set_vertex_buffer(0, g.mesh(*role).buffer().slice(..));
                            true
                        }
                        None => {
                            log::warn!("outline group {group} does not exist");
                            false
                        }
                    };
                }
                PassCommand::Draw { vertices } => {
                    if bound {
                        rpass.draw(vertices.clone(), 0..1);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::coords::{PixelRect, Viewport};
    use crate::device::test_device;
    use crate::render::outline::OutlineStyle;
    use crate::render::shaders::{PIXEL_SHADER_FILE, VERTEX_SHADER_FILE};

    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8Unorm;

    fn shipped_shaders() -> ShaderSet {
        ShaderSet::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders")).unwrap()
    }

    fn shapes(vp: Viewport) -> Vec<OutlineShape> {
        let rects = [
            PixelRect::new(20.0, 20.0, 250.0, 500.0),
            PixelRect::new(50.0, 50.0, 280.0, 530.0),
        ];
        vec![OutlineShape::from_rects(rects, OutlineStyle::default(), vp)]
    }

    #[test]
    fn shipped_shaders_build_a_renderer() {
        let (device, _queue) = test_device();
        let vp = Viewport::new(800.0, 600.0);
        let ctx = RenderCtx::new(&device, FORMAT, vp);

        let renderer = OutlineRenderer::new(&ctx, &shipped_shaders(), &shapes(vp), Color::BLACK)
            .unwrap();
        assert_eq!(renderer.group_count(), 1);
        assert_eq!(renderer.plan().draw_count(), 4);
    }

    #[test]
    fn mismatched_stage_interface_fails_init() {
        // Each file is valid on its own, but location 3 is never written by the
        // vertex stage, so only pipeline creation can reject the pair.
        let dir = tempfile::tempdir().unwrap();
        let vertex = Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders").join(VERTEX_SHADER_FILE);
        fs::copy(vertex, dir.path().join(VERTEX_SHADER_FILE)).unwrap();
        fs::write(
            dir.path().join(PIXEL_SHADER_FILE),
            "@fragment\nfn fs_main(@location(3) c: vec3<f32>) -> @location(0) vec4<f32> {\n    return vec4<f32>(c, 1.0);\n}\n",
        )
        .unwrap();
        let shaders = ShaderSet::load(dir.path()).unwrap();

        let (device, _queue) = test_device();
        let vp = Viewport::new(800.0, 600.0);
        let ctx = RenderCtx::new(&device, FORMAT, vp);

        let err = OutlineRenderer::new(&ctx, &shaders, &shapes(vp), Color::BLACK)
            .err()
            .expect("pipeline creation must fail");
        let msg = format!("{err:#}");
        assert!(msg.contains("failed to build outline pipelines"), "{msg}");
        assert!(msg.contains(PIXEL_SHADER_FILE), "{msg}");
    }

    #[test]
    fn invalid_viewport_is_rejected_before_gpu_work() {
        let (device, _queue) = test_device();
        let ctx = RenderCtx::new(&device, FORMAT, Viewport::new(0.0, 600.0));

        let err = OutlineRenderer::new(&ctx, &shipped_shaders(), &[], Color::BLACK)
            .err()
            .expect("zero-width viewport");
        assert!(err.to_string().contains("invalid viewport"));
    }
}
