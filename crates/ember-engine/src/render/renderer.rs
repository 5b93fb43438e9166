use std::collections::HashSet;
use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::scene::{DrawCmd, DrawList};
use crate::scene::shapes::TextMesh;
use crate::text::{BITMAP_SIZE, BakedFont};

use super::shapes::rect::RectPass;
use super::shapes::sprite::{SpriteBuffers, SpritePass};
use super::shapes::text::TextPass;
use super::shapes::texture_bind_group_layout;
use super::sprite::SPRITE_INDICES;
use super::{
    AtlasHandle, FontHandle, RenderCtx, RenderTarget, ShaderSource, Sprite, SpriteAtlas,
    SpriteHandle,
};

/// GPU texture plus its group-1 bind group.
struct TextureBinding {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// One draw, recorded in paint order before the pass starts.
#[derive(Debug, Clone)]
enum Batch {
    Rect { offset: u32 },
    Text { font: FontHandle, offset: u32, indices: Range<u32> },
    Sprite { atlas: AtlasHandle, sprite: SpriteHandle, offset: u32 },
}

/// Immediate-mode 2D renderer.
///
/// Owns every GPU resource the UI and sprites need: font bitmaps, sprite
/// atlases, sprite quads and the three draw pipelines. [`render`](Self::render)
/// flushes a [`DrawList`] in layer order inside a single render pass.
pub struct Renderer2d {
    texture_layout: wgpu::BindGroupLayout,
    font_sampler: wgpu::Sampler,
    atlas_sampler: wgpu::Sampler,

    fonts: Vec<TextureBinding>,
    atlases: Vec<TextureBinding>,
    sprites: Vec<SpriteBuffers>,

    rect: RectPass,
    text: TextPass,
    sprite: SpritePass,

    mesh: TextMesh,
    batches: Vec<Batch>,
    warned_missing: HashSet<String>,
}

impl Renderer2d {
    pub fn new(device: &wgpu::Device) -> Self {
        let font_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("ember font sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });
        let atlas_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("ember atlas sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture_layout: texture_bind_group_layout(device),
            font_sampler,
            atlas_sampler,
            fonts: Vec::new(),
            atlases: Vec::new(),
            sprites: Vec::new(),
            rect: RectPass::new(),
            text: TextPass::new(),
            sprite: SpritePass::new(),
            mesh: TextMesh::new(),
            batches: Vec::new(),
            warned_missing: HashSet::new(),
        }
    }

    // ── resources ─────────────────────────────────────────────────────────

    /// Uploads a baked font bitmap as an `R8Unorm` texture.
    pub fn upload_font(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        font: &BakedFont,
    ) -> FontHandle {
        let size = wgpu::Extent3d {
            width: BITMAP_SIZE,
            height: BITMAP_SIZE,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("ember font bitmap"),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::R8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &padded_bitmap(font.bitmap()),
        );

        let binding = self.bind_texture(device, texture, "ember font bind group", false);
        self.fonts.push(binding);
        FontHandle::from_index(self.fonts.len() as u32 - 1)
    }

    /// Uploads an atlas and its mip chain as an `Rgba8UnormSrgb` texture.
    pub fn upload_atlas(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        atlas: &SpriteAtlas,
    ) -> AtlasHandle {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("ember sprite atlas"),
            size: wgpu::Extent3d {
                width: atlas.width(),
                height: atlas.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: atlas.mip_count(),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, mip) in atlas.mips().iter().enumerate() {
            let (w, h) = mip.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                mip.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * w),
                    rows_per_image: Some(h),
                },
                wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
            );
        }

        let binding = self.bind_texture(device, texture, "ember atlas bind group", true);
        self.atlases.push(binding);
        AtlasHandle::from_index(self.atlases.len() as u32 - 1)
    }

    /// Creates the sprite's static quad buffers.
    pub fn upload_sprite(&mut self, device: &wgpu::Device, sprite: &Sprite) -> SpriteHandle {
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ember sprite vbo"),
            contents: bytemuck::cast_slice(sprite.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ember sprite ibo"),
            contents: bytemuck::cast_slice(&SPRITE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        self.sprites.push(SpriteBuffers {
            vbo,
            ibo,
            index_count: SPRITE_INDICES.len() as u32,
        });
        SpriteHandle::from_index(self.sprites.len() as u32 - 1)
    }

    /// Replaces the sprite shader. See [`ShaderSource::from_files`].
    pub fn set_sprite_shader(&mut self, source: ShaderSource) {
        self.sprite.set_source(source);
    }

    fn bind_texture(
        &self,
        device: &wgpu::Device,
        texture: wgpu::Texture,
        label: &str,
        atlas: bool,
    ) -> TextureBinding {
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = if atlas { &self.atlas_sampler } else { &self.font_sampler };
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        TextureBinding { _texture: texture, bind_group }
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Draws `draw_list` into `target` back-to-front.
    ///
    /// Commands naming a resource this renderer never uploaded are skipped
    /// (warned once per handle).
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        if draw_list.is_empty() || !ctx.viewport.is_valid() {
            return;
        }

        self.rect.prepare(ctx);
        self.text.prepare(ctx, &self.texture_layout);
        self.sprite.prepare(ctx, &self.texture_layout);
        self.mesh.clear();
        self.batches.clear();

        for item in draw_list.iter_in_paint_order() {
            let batch = match &item.cmd {
                DrawCmd::Rect(cmd) => self
                    .rect
                    .record(ctx.viewport, cmd)
                    .map(|offset| Batch::Rect { offset }),
                DrawCmd::Text(cmd) => {
                    if cmd.font.index() >= self.fonts.len() {
                        warn_missing(&mut self.warned_missing, "font", cmd.font.index());
                        continue;
                    }
                    let indices = self.mesh.append(&cmd.quads, ctx.viewport);
                    self.text
                        .record(cmd.color)
                        .map(|offset| Batch::Text { font: cmd.font, offset, indices })
                }
                DrawCmd::Sprite(cmd) => {
                    if cmd.atlas.index() >= self.atlases.len() {
                        warn_missing(&mut self.warned_missing, "atlas", cmd.atlas.index());
                        continue;
                    }
                    if cmd.sprite.index() >= self.sprites.len() {
                        warn_missing(&mut self.warned_missing, "sprite", cmd.sprite.index());
                        continue;
                    }
                    self.sprite.record(&cmd.transform).map(|offset| Batch::Sprite {
                        atlas: cmd.atlas,
                        sprite: cmd.sprite,
                        offset,
                    })
                }
            };
            self.batches.extend(batch);
        }

        if self.batches.is_empty() {
            return;
        }

        self.rect.upload(ctx);
        self.text.upload(ctx, &self.mesh);
        self.sprite.upload(ctx);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ember 2d pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for batch in &self.batches {
            match batch {
                Batch::Rect { offset } => self.rect.draw(&mut rpass, *offset),
                Batch::Text { font, offset, indices } => {
                    let font = &self.fonts[font.index()].bind_group;
                    self.text.draw(&mut rpass, *offset, font, indices.clone());
                }
                Batch::Sprite { atlas, sprite, offset } => {
                    let atlas = &self.atlases[atlas.index()].bind_group;
                    let sprite = &self.sprites[sprite.index()];
                    self.sprite.draw(&mut rpass, *offset, atlas, sprite);
                }
            }
        }
    }
}

fn warn_missing(warned: &mut HashSet<String>, kind: &str, index: usize) {
    if warned.insert(format!("{kind}:{index}")) {
        log::warn!("draw references unknown {kind} #{index}; skipped");
    }
}

/// The bitmap of an unusable font is empty; upload a blank one instead.
fn padded_bitmap(bitmap: &[u8]) -> std::borrow::Cow<'_, [u8]> {
    let len = (BITMAP_SIZE * BITMAP_SIZE) as usize;
    if bitmap.len() == len {
        std::borrow::Cow::Borrowed(bitmap)
    } else {
        std::borrow::Cow::Owned(vec![0u8; len])
    }
}
