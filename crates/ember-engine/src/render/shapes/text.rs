use core::ops::Range;

use crate::render::{RenderCtx, ShaderSource, UniformKind};
use crate::scene::shapes::{GlyphVertex, TextMesh};
use crate::paint::Color;

use super::common::Program;

const UNIFORMS: &[(&str, UniformKind)] = &[("u_color", UniformKind::Vec4)];

impl GlyphVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos (NDC)
        1 => Float32x2  // uv
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Glyph pass.
///
/// All text recorded in a frame is packed into one [`TextMesh`]; each
/// `Ui::text` call is then one indexed draw over its own index range with
/// the font's bitmap bound at group 1. Vertex and index buffers are reused
/// across frames and grow to the next power of two.
pub(crate) struct TextPass {
    program: Program,

    vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,
    ibo: Option<wgpu::Buffer>,
    index_capacity: usize,
}

impl TextPass {
    pub(crate) fn new() -> Self {
        Self {
            program: Program::new(
                "ember font pipeline",
                ShaderSource::from_wgsl(
                    "ember font",
                    include_str!("../shaders/font.vert.wgsl"),
                    include_str!("../shaders/font.frag.wgsl"),
                ),
                UNIFORMS,
            ),
            vbo: None,
            vertex_capacity: 0,
            ibo: None,
            index_capacity: 0,
        }
    }

    pub(crate) fn prepare(&mut self, ctx: &RenderCtx<'_>, texture_layout: &wgpu::BindGroupLayout) {
        self.program.ensure(ctx, &[GlyphVertex::layout()], Some(texture_layout));
        self.program.begin_frame();
    }

    pub(crate) fn record(&mut self, color: Color) -> Option<u32> {
        self.program.record(|u| u.set_color("u_color", color))
    }

    pub(crate) fn upload(&mut self, ctx: &RenderCtx<'_>, mesh: &TextMesh) {
        self.program.upload(ctx);
        if mesh.indices.is_empty() {
            return;
        }

        self.ensure_capacity(ctx, mesh.vertices.len(), mesh.indices.len());
        if let (Some(vbo), Some(ibo)) = (self.vbo.as_ref(), self.ibo.as_ref()) {
            ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&mesh.vertices));
            ctx.queue.write_buffer(ibo, 0, bytemuck::cast_slice(&mesh.indices));
        }
    }

    pub(crate) fn draw(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        offset: u32,
        font: &wgpu::BindGroup,
        indices: Range<u32>,
    ) {
        let (Some(vbo), Some(ibo)) = (self.vbo.as_ref(), self.ibo.as_ref()) else {
            return;
        };
        if !self.program.bind(rpass, offset) {
            return;
        }
        rpass.set_bind_group(1, font, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(indices, 0, 0..1);
    }

    fn ensure_capacity(&mut self, ctx: &RenderCtx<'_>, vertices: usize, indices: usize) {
        if vertices > self.vertex_capacity || self.vbo.is_none() {
            let cap = vertices.next_power_of_two().max(64);
            self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("ember font vbo"),
                size: (cap * std::mem::size_of::<GlyphVertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.vertex_capacity = cap;
        }

        if indices > self.index_capacity || self.ibo.is_none() {
            let cap = indices.next_power_of_two().max(64);
            self.ibo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("ember font ibo"),
                size: (cap * std::mem::size_of::<u32>()) as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.index_capacity = cap;
        }
    }
}
