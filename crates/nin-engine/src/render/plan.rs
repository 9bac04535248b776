//! Frame recording for the two-pass stencil outline.
//!
//! A frame is first recorded as an ordered list of [`FrameOp`]s. The list is the
//! single source of truth for the state sequence; the GPU executor and the CPU
//! reference executor both consume it.
//!
//! Per frame:
//! 1. clear color, depth and stencil
//! 2. per group: clear stencil, mask pass over the inner mesh, visible pass over
//!    the outer mesh

use core::ops::Range;

use crate::geometry::MeshData;
use crate::paint::Color;

use super::outline::MeshRole;
use super::states::StencilPass;

pub const DEPTH_CLEAR: f32 = 1.0;
pub const STENCIL_CLEAR: u32 = 0;

/// Reference value bound for both passes. The visible pass colors where the
/// stencil buffer still equals it.
pub const STENCIL_REFERENCE: u32 = 0;

#[derive(Debug, Clone, PartialEq)]
pub enum FrameOp {
    ClearTargets { color: Color, depth: f32, stencil: u32 },
    /// Clears only the stencil plane; depth is left untouched.
    ClearStencil { value: u32 },
    /// Binds the pipeline for `pass` and the stencil reference.
    BeginPass { pass: StencilPass, stencil_reference: u32 },
    BindMesh { group: usize, role: MeshRole },
    /// Draws one triangle strip from the bound mesh.
    Draw { vertices: Range<u32> },
}

/// Mesh drawn by each pass: the inner mesh masks, the outer mesh is colored.
#[inline]
pub fn mesh_for(pass: StencilPass) -> MeshRole {
    match pass {
        StencilPass::Mask => MeshRole::Inner,
        StencilPass::Visible => MeshRole::Outer,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FramePlan {
    ops: Vec<FrameOp>,
}

impl FramePlan {
    /// Records the outline protocol for `group_count` groups.
    pub fn outline(clear: Color, group_count: usize) -> Self {
        let mut ops = Vec::with_capacity(1 + group_count * 9);
        ops.push(FrameOp::ClearTargets {
            color: clear,
            depth: DEPTH_CLEAR,
            stencil: STENCIL_CLEAR,
        });

        for group in 0..group_count {
            // Each group starts from an empty stencil so earlier groups cannot mask it.
            ops.push(FrameOp::ClearStencil { value: STENCIL_CLEAR });

            for pass in [StencilPass::Mask, StencilPass::Visible] {
                ops.push(FrameOp::BeginPass {
                    pass,
                    stencil_reference: STENCIL_REFERENCE,
                });
                ops.push(FrameOp::BindMesh {
                    group,
                    role: mesh_for(pass),
                });
                ops.extend(MeshData::strips().map(|vertices| FrameOp::Draw { vertices }));
            }
        }

        Self { ops }
    }

    #[inline]
    pub fn ops(&self) -> &[FrameOp] {
        &self.ops
    }

    pub fn draw_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, FrameOp::Draw { .. }))
            .count()
    }

    /// Splits the plan into render-pass sized segments.
    ///
    /// Clears cannot happen inside a wgpu render pass, so a pending stencil clear
    /// becomes the stencil load op of the next pass.
    pub fn segments(&self) -> Vec<PassSegment> {
        let mut out = Vec::new();
        let mut current: Option<PassSegment> = None;
        let mut pending_stencil: Option<u32> = None;

        for op in &self.ops {
            match op {
                FrameOp::ClearTargets {
                    color,
                    depth,
                    stencil,
                } => {
                    out.extend(current.take());
                    pending_stencil = None;
                    out.push(PassSegment {
                        kind: PassKind::Clear,
                        color_load: Load::Clear(*color),
                        depth_load: Load::Clear(*depth),
                        stencil_load: Load::Clear(*stencil),
                        stencil_reference: STENCIL_REFERENCE,
                        commands: Vec::new(),
                    });
                }

                FrameOp::ClearStencil { value } => {
                    out.extend(current.take());
                    pending_stencil = Some(*value);
                }

                FrameOp::BeginPass {
                    pass,
                    stencil_reference,
                } => {
                    out.extend(current.take());
                    current = Some(PassSegment {
                        kind: PassKind::Stencil(*pass),
                        color_load: Load::Load,
                        depth_load: Load::Load,
                        stencil_load: pending_stencil.take().map_or(Load::Load, Load::Clear),
                        stencil_reference: *stencil_reference,
                        commands: Vec::new(),
                    });
                }

                FrameOp::BindMesh { group, role } => {
                    if let Some(seg) = current.as_mut() {
                        seg.commands.push(PassCommand::BindMesh {
                            group: *group,
                            role: *role,
                        });
                    } else {
                        log::debug!("BindMesh outside of a pass ignored");
                    }
                }

                FrameOp::Draw { vertices } => {
                    if let Some(seg) = current.as_mut() {
                        seg.commands.push(PassCommand::Draw {
                            vertices: vertices.clone(),
                        });
                    } else {
                        log::debug!("Draw outside of a pass ignored");
                    }
                }
            }
        }

        out.extend(current);

        if let Some(value) = pending_stencil {
            out.push(PassSegment {
                kind: PassKind::Clear,
                color_load: Load::Load,
                depth_load: Load::Load,
                stencil_load: Load::Clear(value),
                stencil_reference: STENCIL_REFERENCE,
                commands: Vec::new(),
            });
        }

        out
    }
}

/// Attachment load behavior of a segment.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Load<T> {
    Clear(T),
    Load,
}

impl<T> Load<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Load<U> {
        match self {
            Load::Clear(v) => Load::Clear(f(v)),
            Load::Load => Load::Load,
        }
    }

    pub fn into_wgpu(self) -> wgpu::LoadOp<T> {
        match self {
            Load::Clear(v) => wgpu::LoadOp::Clear(v),
            Load::Load => wgpu::LoadOp::Load,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PassKind {
    /// Attachment clears only, no draws.
    Clear,
    Stencil(StencilPass),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PassCommand {
    BindMesh { group: usize, role: MeshRole },
    Draw { vertices: Range<u32> },
}

/// One wgpu render pass worth of the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PassSegment {
    pub kind: PassKind,
    /// Ignored by mask segments, which bind no color attachment.
    pub color_load: Load<Color>,
    pub depth_load: Load<f32>,
    pub stencil_load: Load<u32>,
    pub stencil_reference: u32,
    pub commands: Vec<PassCommand>,
}

impl PassSegment {
    /// Whether the segment binds the color target.
    #[inline]
    pub fn has_color(&self) -> bool {
        match self.kind {
            PassKind::Clear => true,
            PassKind::Stencil(pass) => pass.writes_color(),
        }
    }
}
