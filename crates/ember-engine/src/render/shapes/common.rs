//! Shared GPU types and utilities used by all draw passes.

use bytemuck::{Pod, Zeroable};

use crate::render::arena::{UniformArena, dynamic_uniform_entry};
use crate::render::{RenderCtx, Shader, ShaderSource, UniformBlock, UniformKind};

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

// ── texture group ─────────────────────────────────────────────────────────

/// Group 1 layout shared by font bitmaps and sprite atlases:
/// `binding 0` = filterable 2D texture, `binding 1` = filtering sampler.
pub(crate) fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("ember texture bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

// ── program ───────────────────────────────────────────────────────────────

/// Shader + pipeline + uniform arena for one kind of draw.
///
/// Everything GPU-side is created lazily on first use and rebuilt when the
/// surface format or the shader source changes.
pub(super) struct Program {
    label: &'static str,
    source: ShaderSource,
    fields: &'static [(&'static str, UniformKind)],

    shader: Option<Shader>,
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    uniform_layout: Option<wgpu::BindGroupLayout>,
    arena: Option<UniformArena>,
}

impl Program {
    pub(super) fn new(
        label: &'static str,
        source: ShaderSource,
        fields: &'static [(&'static str, UniformKind)],
    ) -> Self {
        Self {
            label,
            source,
            fields,
            shader: None,
            pipeline_format: None,
            pipeline: None,
            uniform_layout: None,
            arena: None,
        }
    }

    /// Replaces the shader source; the pipeline is rebuilt on next use.
    pub(super) fn set_source(&mut self, source: ShaderSource) {
        self.source = source;
        self.shader = None;
        self.pipeline = None;
    }

    pub(super) fn ensure(
        &mut self,
        ctx: &RenderCtx<'_>,
        vertex_layouts: &[wgpu::VertexBufferLayout<'_>],
        texture_layout: Option<&wgpu::BindGroupLayout>,
    ) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = Shader::compile(
            ctx.device,
            &self.source,
            UniformBlock::new(self.fields.iter().copied()),
        );
        let arena = UniformArena::new(
            self.label,
            shader.uniforms().size(),
            ctx.device.limits().min_uniform_buffer_offset_alignment,
        );

        let uniform_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(self.label),
            entries: &[dynamic_uniform_entry(
                wgpu::ShaderStages::VERTEX_FRAGMENT,
                arena.binding_size(),
            )],
        });

        let mut groups = vec![&uniform_layout];
        groups.extend(texture_layout);

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(self.label),
            bind_group_layouts: &groups,
            immediate_size: 0,
        });

        let targets = [Some(wgpu::ColorTargetState {
            format: ctx.surface_format,
            blend: Some(premul_alpha_blend()),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.label),
            layout: Some(&pipeline_layout),
            vertex: shader.vertex_state(vertex_layouts),
            fragment: Some(shader.fragment_state(&targets)),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.uniform_layout = Some(uniform_layout);
        self.arena = Some(arena);
        self.shader = Some(shader);
    }

    pub(super) fn begin_frame(&mut self) {
        if let Some(arena) = self.arena.as_mut() {
            arena.clear();
        }
    }

    /// Updates the uniform block through `write` and snapshots it for one draw.
    pub(super) fn record(&mut self, write: impl FnOnce(&mut UniformBlock)) -> Option<u32> {
        let shader = self.shader.as_mut()?;
        let arena = self.arena.as_mut()?;
        write(shader.uniforms_mut());
        Some(arena.push(shader.uniforms().bytes()))
    }

    pub(super) fn upload(&mut self, ctx: &RenderCtx<'_>) {
        let (Some(arena), Some(layout)) = (self.arena.as_mut(), self.uniform_layout.as_ref()) else {
            return;
        };
        arena.upload(ctx.device, ctx.queue, layout);
    }

    /// Sets the pipeline and the uniform group for a draw recorded at `offset`.
    ///
    /// Returns `false` when the program is not ready (the draw is skipped).
    pub(super) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>, offset: u32) -> bool {
        let Some(pipeline) = self.pipeline.as_ref() else { return false };
        let Some(bind_group) = self.arena.as_ref().and_then(UniformArena::bind_group) else {
            return false;
        };
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[offset]);
        true
    }
}
