use crate::math::Mat4;
use crate::render::sprite::SpriteVertex;
use crate::render::{RenderCtx, ShaderSource, UniformKind};

use super::common::Program;

const UNIFORMS: &[(&str, UniformKind)] = &[("u_mat", UniformKind::Mat4)];

/// Static vertex/index buffers of one uploaded sprite.
pub(crate) struct SpriteBuffers {
    pub(crate) vbo: wgpu::Buffer,
    pub(crate) ibo: wgpu::Buffer,
    pub(crate) index_count: u32,
}

/// Sprite pass: the sprite's own static quad, `u_mat` per draw and the
/// atlas bound at group 1.
pub(crate) struct SpritePass {
    program: Program,
}

impl SpritePass {
    pub(crate) fn new() -> Self {
        Self {
            program: Program::new("ember sprite pipeline", builtin_source(), UNIFORMS),
        }
    }

    /// Swaps in a user shader. It must declare `u_mat: mat4x4<f32>` at
    /// group 0 and the atlas texture/sampler at group 1.
    pub(crate) fn set_source(&mut self, source: ShaderSource) {
        self.program.set_source(source);
    }

    pub(crate) fn prepare(&mut self, ctx: &RenderCtx<'_>, texture_layout: &wgpu::BindGroupLayout) {
        self.program.ensure(ctx, &[SpriteVertex::layout()], Some(texture_layout));
        self.program.begin_frame();
    }

    pub(crate) fn record(&mut self, transform: &Mat4) -> Option<u32> {
        self.program.record(|u| u.set_mat4("u_mat", false, transform))
    }

    pub(crate) fn upload(&mut self, ctx: &RenderCtx<'_>) {
        self.program.upload(ctx);
    }

    pub(crate) fn draw(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        offset: u32,
        atlas: &wgpu::BindGroup,
        sprite: &SpriteBuffers,
    ) {
        if !self.program.bind(rpass, offset) {
            return;
        }
        rpass.set_bind_group(1, atlas, &[]);
        rpass.set_vertex_buffer(0, sprite.vbo.slice(..));
        rpass.set_index_buffer(sprite.ibo.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..sprite.index_count, 0, 0..1);
    }
}

pub(crate) fn builtin_source() -> ShaderSource {
    ShaderSource::from_wgsl(
        "ember sprite",
        include_str!("../shaders/sprite.vert.wgsl"),
        include_str!("../shaders/sprite.frag.wgsl"),
    )
}
