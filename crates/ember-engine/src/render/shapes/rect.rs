use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::render::{RenderCtx, ShaderSource, UniformKind};
use crate::scene::shapes::RectCmd;

use super::common::{Program, QUAD_INDICES, QUAD_VERTICES, QuadVertex};

const UNIFORMS: &[(&str, UniformKind)] = &[
    ("u_topLeft", UniformKind::Vec2),
    ("u_size", UniformKind::Vec2),
    ("u_color", UniformKind::Vec4),
];

/// Solid rectangle pass.
///
/// One unit quad is shared by every rectangle; position, size and color
/// travel in the per-draw uniform block (`u_topLeft`, `u_size` in NDC,
/// `u_color` premultiplied).
pub(crate) struct RectPass {
    program: Program,
    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,
}

impl RectPass {
    pub(crate) fn new() -> Self {
        Self {
            program: Program::new(
                "ember rect pipeline",
                ShaderSource::from_wgsl(
                    "ember rect",
                    include_str!("../shaders/rect.vert.wgsl"),
                    include_str!("../shaders/rect.frag.wgsl"),
                ),
                UNIFORMS,
            ),
            quad_vbo: None,
            quad_ibo: None,
        }
    }

    pub(crate) fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        self.program.ensure(ctx, &[QuadVertex::layout()], None);
        self.ensure_static_buffers(ctx);
        self.program.begin_frame();
    }

    /// Records one rectangle; `None` when it is empty or the pass is not ready.
    pub(crate) fn record(&mut self, viewport: Viewport, cmd: &RectCmd) -> Option<u32> {
        let r = cmd.rect.normalized();
        if r.is_empty() {
            return None;
        }
        self.program.record(|u| {
            u.set_vec2("u_topLeft", viewport.to_ndc(r.top_left));
            u.set_vec2("u_size", viewport.size_to_ndc(r.size));
            u.set_color("u_color", cmd.color);
        })
    }

    pub(crate) fn upload(&mut self, ctx: &RenderCtx<'_>) {
        self.program.upload(ctx);
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, offset: u32) {
        let (Some(vbo), Some(ibo)) = (self.quad_vbo.as_ref(), self.quad_ibo.as_ref()) else {
            return;
        };
        if !self.program.bind(rpass, offset) {
            return;
        }
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ember rect quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ember rect quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}
