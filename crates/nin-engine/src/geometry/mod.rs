//! Geometry builder.
//!
//! Converts pixel-space rectangles into NDC vertex records ready for upload.
//! Everything here is pure CPU code; GPU buffers live in `render::mesh`.

mod mesh;
mod quad;
mod vertex;

pub use mesh::{MeshData, MESH_VERTEX_COUNT, QUADS_PER_MESH};
pub use quad::{write_quad, QUAD_VERTEX_COUNT};
pub use vertex::Vertex;
