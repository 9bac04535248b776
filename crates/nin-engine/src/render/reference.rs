//! CPU reference executor for frame plans.
//!
//! Runs a [`FramePlan`] against software color/depth/stencil planes using the
//! exact pipeline state objects the GPU pipelines are built from. Used to check
//! the outline technique pixel by pixel without a GPU.
//!
//! Rasterization follows the usual GPU rules: vertices snap to 1/256 pixel,
//! samples sit at pixel centers, and shared edges are resolved with the top-left
//! rule so adjacent triangles never touch the same pixel twice.

use crate::coords::{Vec2, Viewport};
use crate::geometry::Vertex;
use crate::paint::Color;

use super::outline::OutlineShape;
use super::plan::{FrameOp, FramePlan};
use super::states::{primitive_state, StencilPass};

const SUBPIXEL: f64 = 256.0;

/// Counters collected while executing a plan.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ReferenceStats {
    pub draws: usize,
    /// Fragments that passed the stencil test.
    pub fragments: usize,
    /// Fragments that reached the color plane.
    pub color_writes: usize,
}

/// Software render target: one color, depth and stencil value per pixel.
#[derive(Debug, Clone)]
pub struct ReferenceTarget {
    width: u32,
    height: u32,
    color: Vec<Color>,
    depth: Vec<f32>,
    stencil: Vec<u8>,
}

#[derive(Debug, Copy, Clone)]
struct ScreenVertex {
    x: f64,
    y: f64,
    z: f32,
    color: [f32; 3],
}

impl ReferenceTarget {
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            color: vec![Color::BLACK; len],
            depth: vec![1.0; len],
            stencil: vec![0; len],
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::from_physical(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize) * (self.width as usize) + x as usize
    }

    pub fn color_at(&self, x: u32, y: u32) -> Color {
        self.color[self.index(x, y)]
    }

    pub fn stencil_at(&self, x: u32, y: u32) -> u8 {
        self.stencil[self.index(x, y)]
    }

    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        self.depth[self.index(x, y)]
    }

    /// Executes `plan`; `BindMesh { group, .. }` refers to `shapes[group]`.
    pub fn execute(&mut self, plan: &FramePlan, shapes: &[OutlineShape]) -> ReferenceStats {
        let mut stats = ReferenceStats::default();
        let mut pass: Option<(StencilPass, u32)> = None;
        let mut mesh: Option<&[Vertex]> = None;

        for op in plan.ops() {
            match op {
                FrameOp::ClearTargets {
                    color,
                    depth,
                    stencil,
                } => {
                    self.color.fill(*color);
                    self.depth.fill(*depth);
                    self.stencil.fill(*stencil as u8);
                }

                FrameOp::ClearStencil { value } => self.stencil.fill(*value as u8),

                FrameOp::BeginPass {
                    pass: p,
                    stencil_reference,
                } => {
                    pass = Some((*p, *stencil_reference));
                    mesh = None;
                }

                FrameOp::BindMesh { group, role } => {
                    mesh = shapes.get(*group).map(|s| s.mesh(*role).vertices.as_slice());
                }

                FrameOp::Draw { vertices } => {
                    let (Some((p, reference)), Some(mesh)) = (pass, mesh) else {
                        continue;
                    };
                    let Some(strip) = mesh.get(vertices.start as usize..vertices.end as usize)
                    else {
                        continue;
                    };
                    stats.draws += 1;
                    self.draw_strip(strip, p, reference, &mut stats);
                }
            }
        }

        stats
    }

    fn draw_strip(
        &mut self,
        strip: &[Vertex],
        pass: StencilPass,
        reference: u32,
        stats: &mut ReferenceStats,
    ) {
        for i in 0..strip.len().saturating_sub(2) {
            // Odd triangles swap their first two vertices to keep strip winding.
            let tri = if i % 2 == 0 {
                [strip[i], strip[i + 1], strip[i + 2]]
            } else {
                [strip[i + 1], strip[i], strip[i + 2]]
            };
            self.draw_triangle(tri, pass, reference, stats);
        }
    }

    fn draw_triangle(
        &mut self,
        tri: [Vertex; 3],
        pass: StencilPass,
        reference: u32,
        stats: &mut ReferenceStats,
    ) {
        let prim = primitive_state();
        let ds = pass.depth_stencil_state();

        let [a, b, c] = tri.map(|v| v.position);
        let ndc_cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
        if ndc_cross == 0.0 {
            return;
        }

        let front = match prim.front_face {
            wgpu::FrontFace::Cw => ndc_cross < 0.0,
            wgpu::FrontFace::Ccw => ndc_cross > 0.0,
        };
        match prim.cull_mode {
            Some(wgpu::Face::Front) if front => return,
            Some(wgpu::Face::Back) if !front => return,
            _ => {}
        }
        let face = if front { ds.stencil.front } else { ds.stencil.back };

        let [mut v0, mut v1, mut v2] = tri.map(|v| self.to_screen(v));
        let mut area = edge(v0, v1, v2);
        if area < 0.0 {
            std::mem::swap(&mut v1, &mut v2);
            area = -area;
        }
        if area == 0.0 {
            return;
        }

        let min_x = v0.x.min(v1.x).min(v2.x).floor().max(0.0) as u32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor().max(0.0) as u32;
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as u32).min(self.width);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as u32).min(self.height);

        let read_mask = ds.stencil.read_mask;
        let write_mask = ds.stencil.write_mask;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let p = (x as f64 + 0.5, y as f64 + 0.5);
                let w0 = edge_at(v1, v2, p);
                let w1 = edge_at(v2, v0, p);
                let w2 = edge_at(v0, v1, p);

                if !(covers(w0, v1, v2) && covers(w1, v2, v0) && covers(w2, v0, v1)) {
                    continue;
                }

                let (l0, l1, l2) = ((w0 / area) as f32, (w1 / area) as f32, (w2 / area) as f32);
                let z = l0 * v0.z + l1 * v1.z + l2 * v2.z;

                let idx = self.index(x, y);
                let current = self.stencil[idx] as u32;

                let stencil_pass = compare(face.compare, reference & read_mask, current & read_mask);
                if !stencil_pass {
                    self.write_stencil(idx, face.fail_op, reference, write_mask);
                    continue;
                }

                if !compare(ds.depth_compare, z, self.depth[idx]) {
                    self.write_stencil(idx, face.depth_fail_op, reference, write_mask);
                    continue;
                }

                self.write_stencil(idx, face.pass_op, reference, write_mask);
                stats.fragments += 1;

                if ds.depth_write_enabled {
                    self.depth[idx] = z;
                }

                if pass.writes_color() {
                    let mut rgb = [0.0f32; 3];
                    for (ch, out) in rgb.iter_mut().enumerate() {
                        *out = l0 * v0.color[ch] + l1 * v1.color[ch] + l2 * v2.color[ch];
                    }
                    self.color[idx] = Color::from(rgb);
                    stats.color_writes += 1;
                }
            }
        }
    }

    fn write_stencil(&mut self, idx: usize, op: wgpu::StencilOperation, reference: u32, mask: u32) {
        let old = self.stencil[idx] as u32;
        let new = apply_stencil_op(op, old, reference);
        self.stencil[idx] = ((new & mask) | (old & !mask)) as u8;
    }

    fn to_screen(&self, v: Vertex) -> ScreenVertex {
        let vp = self.viewport();
        // Framebuffer space: the inverse NDC transform without the half-pixel shift.
        let px = vp.to_pixel(Vec2::new(v.position[0], v.position[1])) - Vec2::new(0.5, 0.5);
        ScreenVertex {
            x: snap(px.x as f64),
            y: snap(px.y as f64),
            z: v.position[2],
            color: v.color,
        }
    }
}

#[inline]
fn snap(v: f64) -> f64 {
    (v * SUBPIXEL).round() / SUBPIXEL
}

#[inline]
fn edge(a: ScreenVertex, b: ScreenVertex, c: ScreenVertex) -> f64 {
    edge_at(a, b, (c.x, c.y))
}

#[inline]
fn edge_at(a: ScreenVertex, b: ScreenVertex, p: (f64, f64)) -> f64 {
    (b.x - a.x) * (p.1 - a.y) - (b.y - a.y) * (p.0 - a.x)
}

/// Top-left rule for the edge `from -> to` of a positively oriented triangle.
#[inline]
fn covers(w: f64, from: ScreenVertex, to: ScreenVertex) -> bool {
    if w != 0.0 {
        return w > 0.0;
    }
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    (dy == 0.0 && dx > 0.0) || dy < 0.0
}

/// `reference OP current`, per the stencil/depth comparison convention.
fn compare<T: PartialOrd>(func: wgpu::CompareFunction, reference: T, current: T) -> bool {
    match func {
        wgpu::CompareFunction::Never => false,
        wgpu::CompareFunction::Less => reference < current,
        wgpu::CompareFunction::Equal => reference == current,
        wgpu::CompareFunction::LessEqual => reference <= current,
        wgpu::CompareFunction::Greater => reference > current,
        wgpu::CompareFunction::NotEqual => reference != current,
        wgpu::CompareFunction::GreaterEqual => reference >= current,
        wgpu::CompareFunction::Always => true,
    }
}

fn apply_stencil_op(op: wgpu::StencilOperation, value: u32, reference: u32) -> u32 {
    const MAX: u32 = 0xFF;
    match op {
        wgpu::StencilOperation::Keep => value,
        wgpu::StencilOperation::Zero => 0,
        wgpu::StencilOperation::Replace => reference & MAX,
        wgpu::StencilOperation::Invert => !value & MAX,
        wgpu::StencilOperation::IncrementClamp => (value + 1).min(MAX),
        wgpu::StencilOperation::DecrementClamp => value.saturating_sub(1),
        wgpu::StencilOperation::IncrementWrap => (value + 1) & MAX,
        wgpu::StencilOperation::DecrementWrap => value.wrapping_sub(1) & MAX,
    }
}
