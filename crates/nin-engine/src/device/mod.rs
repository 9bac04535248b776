//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) and its depth-stencil target
//! - acquiring frames and providing encoders/views for rendering
//! - turning wgpu validation failures into `Result`s

mod context;
mod depth;
mod error;
mod frame;
mod init;
mod scope;
mod surface;

pub use context::{request_adapter, request_device, Gpu};
pub use depth::DepthStencilTarget;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
pub use scope::with_error_scope;

/// Windowless device on the noop backend, for tests that only need validation.
#[cfg(test)]
pub(crate) fn test_device() -> (wgpu::Device, wgpu::Queue) {
    let init = GpuInit {
        backends: wgpu::Backends::NOOP,
        ..GpuInit::default()
    };
    let instance = init.create_instance();
    let (_adapter, device, queue) =
        pollster::block_on(request_device(&instance, None, &init)).expect("noop device");
    (device, queue)
}
