use anyhow::{Context, Result};
use ouroboros::self_referencing;
use raw_window_handle::{HasWindowHandle, RawWindowHandle};

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, Driver, FrameCtx, InitCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::feed_window_event;
use crate::input::InputState;
use crate::time::{FrameClock, FrameStats};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Window class name; only meaningful on Windows.
    pub class_name: String,
    /// Client-area size in physical pixels.
    pub initial_size: PhysicalSize<u32>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "ninEngine".to_string(),
            class_name: "WindowClass1".to_string(),
            initial_size: PhysicalSize::new(800, 600),
            resizable: false,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes the GPU, builds the app with `build` and
    /// pumps events until the window closes.
    ///
    /// Returns the first initialization error, if any. No frame is rendered
    /// when initialization fails.
    pub fn run<A, F>(config: RuntimeConfig, gpu_init: GpuInit, build: F) -> Result<()>
    where
        A: App + 'static,
        F: FnOnce(&InitCtx<'_, '_>) -> Result<A> + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, build);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.driver.into_result()
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A, F> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    build: Option<F>,

    driver: Driver<A>,
    entry: Option<WindowEntry>,

    input: InputState,
    clock: FrameClock,
    stats: FrameStats,
}

impl<A, F> AppState<A, F>
where
    A: App + 'static,
    F: FnOnce(&InitCtx<'_, '_>) -> Result<A> + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, build: F) -> Self {
        Self {
            config,
            gpu_init,
            build: Some(build),
            driver: Driver::new(),
            entry: None,
            input: InputState::default(),
            clock: FrameClock::default(),
            stats: FrameStats::default(),
        }
    }

    /// Waits for the GPU, then drops the app before the window and device.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(entry) = &self.entry {
            entry.with_gpu(|gpu| gpu.wait_idle());
        }
        if let Some(app) = self.driver.finish() {
            drop(app);
            log::info!("shut down after {} frame(s)", self.driver.frames());
        }
        self.entry = None;
        event_loop.exit();
    }
}

fn create_window_entry(
    event_loop: &ActiveEventLoop,
    config: &RuntimeConfig,
    gpu_init: GpuInit,
) -> Result<WindowEntry> {
    let attrs = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(config.initial_size)
        .with_resizable(config.resizable);

    #[cfg(target_os = "windows")]
    let attrs = {
        use winit::platform::windows::WindowAttributesExtWindows;
        attrs.with_class_name(config.class_name.clone())
    };
    #[cfg(not(target_os = "windows"))]
    log::debug!("window class `{}` ignored on this platform", config.class_name);

    let window = event_loop
        .create_window(attrs)
        .context("failed to create window")?;

    log::info!(
        "window `{}` created: {}x{} ({})",
        config.title,
        window.inner_size().width,
        window.inner_size().height,
        handle_kind(&window)
    );

    WindowEntryTryBuilder {
        window,
        gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
    }
    .try_build()
    .context("GPU initialization failed")
}

fn handle_kind(window: &Window) -> &'static str {
    match window.window_handle().map(|h| h.as_raw()) {
        Ok(RawWindowHandle::Win32(_)) => "win32",
        Ok(RawWindowHandle::Xlib(_)) => "xlib",
        Ok(RawWindowHandle::Xcb(_)) => "xcb",
        Ok(RawWindowHandle::Wayland(_)) => "wayland",
        Ok(RawWindowHandle::AppKit(_)) => "appkit",
        Ok(_) => "other",
        Err(_) => "unavailable",
    }
}

impl<A, F> ApplicationHandler for AppState<A, F>
where
    A: App + 'static,
    F: FnOnce(&InitCtx<'_, '_>) -> Result<A> + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(build) = self.build.take() else {
            return;
        };

        let (config, gpu_init) = (&self.config, self.gpu_init.clone());
        let mut created: Option<WindowEntry> = None;

        let running = self.driver.start(|| {
            let entry = create_window_entry(event_loop, config, gpu_init)?;
            let app = entry.with(|f| build(&InitCtx::new(f.window, f.gpu)))?;
            created = Some(entry);
            Ok(app)
        });

        if !running {
            event_loop.exit();
            return;
        }

        self.entry = created;
        self.clock.reset();
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Continuous redraw: render as fast as presentation allows.
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        feed_window_event(&mut self.input, &event);

        match &event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.shutdown(event_loop),

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::RedrawRequested => {
                // Split borrows to avoid `self` capture inside `ouroboros` closures.
                let Some(entry) = self.entry.as_mut() else {
                    return;
                };
                let (input, clock, stats) = (&mut self.input, &mut self.clock, &mut self.stats);

                let control = self.driver.tick(|app| {
                    let time = clock.tick();

                    let mut control = app.update(input, time);
                    if control == AppControl::Continue {
                        control = entry.with_mut(|f| {
                            let mut ctx = FrameCtx::new(f.window, f.gpu, time);
                            app.render(&mut ctx)
                        });
                    }

                    stats.record_and_log(time.now);
                    control
                });

                if control == Some(AppControl::Exit) {
                    self.shutdown(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            self.shutdown(event_loop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_harness_window() {
        let c = RuntimeConfig::default();
        assert_eq!(c.title, "ninEngine");
        assert_eq!(c.class_name, "WindowClass1");
        assert_eq!(c.initial_size, PhysicalSize::new(800, 600));
    }
}
