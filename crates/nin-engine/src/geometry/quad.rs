use crate::coords::{PixelRect, Vec2, Viewport};
use crate::paint::Color;

use super::Vertex;

/// Vertices written per quad.
pub const QUAD_VERTEX_COUNT: usize = 4;

/// Writes the four corners of `rect` into `out[start..start + 4]`.
///
/// Order is triangle-strip compatible: (x0, y0), (x1, y0), (x0, y1), (x1, y1).
/// With the default corner order this winds clockwise in NDC, which the
/// pipelines treat as front-facing.
///
/// Panics if `out` is shorter than `start + 4`.
pub fn write_quad(
    rect: PixelRect,
    viewport: Viewport,
    color: Color,
    out: &mut [Vertex],
    start: usize,
) {
    debug_assert!(viewport.is_valid(), "write_quad: invalid viewport {viewport:?}");
    debug_assert!(
        out.len() >= start + QUAD_VERTEX_COUNT,
        "write_quad: output holds {} vertices, need {}",
        out.len(),
        start + QUAD_VERTEX_COUNT
    );

    let p0 = viewport.to_ndc(Vec2::new(rect.x0, rect.y0));
    let p1 = viewport.to_ndc(Vec2::new(rect.x1, rect.y1));

    let quad = &mut out[start..start + QUAD_VERTEX_COUNT];
    quad[0] = Vertex::new(p0.x, p0.y, 0.0, color);
    quad[1] = Vertex::new(p1.x, p0.y, 0.0, color);
    quad[2] = Vertex::new(p0.x, p1.y, 0.0, color);
    quad[3] = Vertex::new(p1.x, p1.y, 0.0, color);
}
