use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;

use super::app::AppControl;

/// Context handed to the app factory once the window and GPU exist.
pub struct InitCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a Gpu<'w>,
}

impl<'a, 'w> InitCtx<'a, 'w> {
    pub fn new(window: &'a Window, gpu: &'a Gpu<'w>) -> Self {
        Self { window, gpu }
    }

    /// Resource-creation context covering the full surface.
    pub fn render_ctx(&self) -> RenderCtx<'_> {
        RenderCtx::new(
            self.gpu.device(),
            self.gpu.surface_format(),
            self.gpu.viewport(),
        )
    }
}

/// Per-frame context passed to `core::App::render`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub time: FrameTime,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    pub fn new(window: &'a Window, gpu: &'a mut Gpu<'w>, time: FrameTime) -> Self {
        Self { window, gpu, time }
    }

    /// Acquires a frame, calls `draw` with a ready [`RenderCtx`] and
    /// [`RenderTarget`], then submits and presents.
    ///
    /// Attachments are not cleared here; `draw` owns every load op. A surface
    /// error skips the frame, or returns `Exit` when it is fatal.
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        {
            let rctx = RenderCtx::new(
                self.gpu.device(),
                self.gpu.surface_format(),
                self.gpu.viewport(),
            );
            let mut target = RenderTarget::new(
                &mut frame.encoder,
                &frame.view,
                self.gpu.depth_stencil_view(),
            );
            draw(&rctx, &mut target);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
