//! GPU rendering subsystem.
//!
//! The only technique is a two-pass stencil outline: an inset mesh is drawn into
//! the stencil buffer with color disabled, then the outer mesh is colored where
//! the stencil buffer is still zero.
//!
//! Convention:
//! - CPU geometry is built in pixels (top-left origin, +Y down) and converted to
//!   NDC once, at build time. Shaders receive clip-space positions.
//! - A frame is recorded as a [`FramePlan`] first; the wgpu executor
//!   ([`OutlineRenderer`]) and the software executor ([`ReferenceTarget`]) both
//!   replay it.

mod ctx;
mod mesh;
pub mod outline;
pub mod plan;
pub mod reference;
mod renderer;
pub mod shaders;
pub mod states;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::GpuMesh;
pub use outline::{MeshRole, OutlineGroup, OutlineShape, OutlineStyle};
pub use plan::{FrameOp, FramePlan};
pub use reference::ReferenceTarget;
pub use renderer::OutlineRenderer;
pub use shaders::{resolve_shader_dir, ShaderSet};
pub use states::{StencilPass, DEPTH_STENCIL_FORMAT};
