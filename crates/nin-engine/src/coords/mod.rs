//! Coordinate and geometry types shared by the geometry builder and renderers.
//!
//! Canonical CPU space:
//! - Physical pixels of the render surface
//! - Origin top-left
//! - +X right, +Y down
//!
//! Conversion to NDC (+Y up) happens once on the CPU when meshes are built;
//! shaders receive positions that are already in clip space.

mod rect;
mod vec2;
mod viewport;

pub use rect::PixelRect;
pub use vec2::Vec2;
pub use viewport::Viewport;
