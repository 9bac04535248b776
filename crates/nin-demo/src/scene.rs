use anyhow::{Context, Result};

use nin_engine::coords::Viewport;
use nin_engine::core::{App, AppControl, FrameCtx, InitCtx};
use nin_engine::render::{
    resolve_shader_dir, OutlineRenderer, OutlineShape, RenderCtx, ShaderSet,
};

use crate::config::DemoConfig;

/// The sample scene: one outlined group made of two overlapping rectangles.
pub struct OutlineDemo {
    renderer: OutlineRenderer,
}

/// CPU meshes of the scene for `viewport`.
pub fn demo_shapes(config: &DemoConfig, viewport: Viewport) -> Vec<OutlineShape> {
    vec![OutlineShape::from_rects(config.rects, config.style, viewport)]
}

impl OutlineDemo {
    /// App factory for the runtime. Any failure aborts startup.
    pub fn new(ctx: &InitCtx<'_, '_>, config: &DemoConfig) -> Result<Self> {
        Self::build(&ctx.render_ctx(), config)
    }

    /// Loads the shaders and builds every GPU resource for `rctx`.
    pub fn build(rctx: &RenderCtx<'_>, config: &DemoConfig) -> Result<Self> {
        let dir = resolve_shader_dir(config.shader_dir.as_deref())?;
        log::info!("shader directory: {}", dir.display());
        let shaders = ShaderSet::load(&dir)?;

        let shapes = demo_shapes(config, rctx.viewport);
        let renderer = OutlineRenderer::new(rctx, &shaders, &shapes, config.clear)
            .context("failed to build outline renderer")?;

        Ok(Self { renderer })
    }
}

impl App for OutlineDemo {
    fn render(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let renderer = &self.renderer;
        ctx.render(|_, target| renderer.render(target))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::*;
    use nin_engine::core::Driver;
    use nin_engine::device::{request_device, GpuInit};
    use nin_engine::paint::Color;
    use nin_engine::render::shaders::VERTEX_SHADER_FILE;
    use nin_engine::render::{FramePlan, ReferenceTarget};

    fn noop_device() -> wgpu::Device {
        let init = GpuInit {
            backends: wgpu::Backends::NOOP,
            ..GpuInit::default()
        };
        let instance = init.create_instance();
        let (_adapter, device, _queue) =
            pollster::block_on(request_device(&instance, None, &init)).unwrap();
        device
    }

    fn shipped_shader_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../nin-engine/shaders")
    }

    fn render_ctx(device: &wgpu::Device) -> RenderCtx<'_> {
        RenderCtx::new(device, wgpu::TextureFormat::Bgra8Unorm, Viewport::new(800.0, 600.0))
    }

    fn rendered() -> ReferenceTarget {
        let config = DemoConfig::default();
        let mut target = ReferenceTarget::new(config.surface.width, config.surface.height);
        let shapes = demo_shapes(&config, target.viewport());
        target.execute(&FramePlan::outline(config.clear, shapes.len()), &shapes);
        target
    }

    fn green(c: Color) -> bool {
        c.r.abs() < 1e-4 && (c.g - 1.0).abs() < 1e-4 && c.b.abs() < 1e-4
    }

    #[test]
    fn scene_shows_only_the_border() {
        let t = rendered();

        // Left border of the first rectangle.
        assert!(green(t.color_at(22, 100)));
        // Inside the first inset: masked.
        assert_eq!(t.color_at(30, 30), Color::BLACK);
        assert_eq!(t.stencil_at(30, 30), 1);
        // Inside both insets.
        assert_eq!(t.stencil_at(100, 100), 2);
        assert_eq!(t.color_at(100, 100), Color::BLACK);
        // Right border of the second rectangle.
        assert!(green(t.color_at(277, 300)));
        assert_eq!(t.stencil_at(265, 300), 1);
        // Background.
        assert_eq!(t.color_at(400, 300), Color::BLACK);
        assert_eq!(t.stencil_at(400, 300), 0);
    }

    #[test]
    fn demo_builds_from_shipped_shaders() {
        let device = noop_device();
        let config = DemoConfig {
            shader_dir: Some(shipped_shader_dir()),
            ..DemoConfig::default()
        };
        let rctx = render_ctx(&device);

        let mut driver = Driver::new();
        assert!(driver.start(|| OutlineDemo::build(&rctx, &config)));
        assert_eq!(driver.tick(|demo| demo.renderer.group_count()), Some(1));
    }

    #[test]
    fn missing_pixel_shader_keeps_the_loop_from_starting() {
        let dir = tempfile::tempdir().unwrap();
        fs::copy(
            shipped_shader_dir().join(VERTEX_SHADER_FILE),
            dir.path().join(VERTEX_SHADER_FILE),
        )
        .unwrap();

        let device = noop_device();
        let config = DemoConfig {
            shader_dir: Some(dir.path().to_path_buf()),
            ..DemoConfig::default()
        };
        let rctx = render_ctx(&device);

        let mut driver: Driver<OutlineDemo> = Driver::new();
        assert!(!driver.start(|| OutlineDemo::build(&rctx, &config)));

        let mut rendered = false;
        assert!(driver.tick(|_| rendered = true).is_none());
        assert!(!rendered);
        assert_eq!(driver.frames(), 0);

        let err = driver.into_result().unwrap_err();
        assert!(format!("{err:#}").contains("pixel shader"), "{err:#}");
    }
}
