use bytemuck::{Pod, Zeroable};

use crate::math::{Vec2, Vec4};

/// Sprite vertex: quad position plus atlas texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
}

impl SpriteVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2  // uv
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub const SPRITE_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// A static textured quad cut from an atlas.
///
/// The quad is one unit tall and keeps the aspect of `pixel_size`:
/// it spans `(-w/2h, -0.5)..(w/2h, 0.5)`. Place it with a transform matrix
/// at draw time.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    size: Vec2,
    uv_rect: Vec4,
    vertices: [SpriteVertex; 4],
}

impl Sprite {
    /// `uv_rect` is `(u_min, v_min, u_max, v_max)` with `v` growing downwards.
    pub fn new(pixel_size: Vec2, uv_rect: Vec4) -> Self {
        let half_w = pixel_size.x / (2.0 * pixel_size.y);
        let (u0, v0, u1, v1) = (uv_rect.x, uv_rect.y, uv_rect.z, uv_rect.w);

        let vertices = [
            SpriteVertex { pos: [-half_w, -0.5], uv: [u0, v1] },
            SpriteVertex { pos: [half_w, -0.5], uv: [u1, v1] },
            SpriteVertex { pos: [half_w, 0.5], uv: [u1, v0] },
            SpriteVertex { pos: [-half_w, 0.5], uv: [u0, v0] },
        ];

        Self { size: pixel_size, uv_rect, vertices }
    }

    #[inline]
    pub fn pixel_size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn uv_rect(&self) -> Vec4 {
        self.uv_rect
    }

    #[inline]
    pub fn vertices(&self) -> &[SpriteVertex; 4] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_sprite_is_unit_quad() {
        let s = Sprite::new(Vec2::new(100.0, 100.0), Vec4::new(0.0, 0.0, 0.5, 1.0));
        let pos: Vec<[f32; 2]> = s.vertices().iter().map(|v| v.pos).collect();
        assert_eq!(pos, vec![[-0.5, -0.5], [0.5, -0.5], [0.5, 0.5], [-0.5, 0.5]]);
    }

    #[test]
    fn wide_sprite_keeps_aspect() {
        let s = Sprite::new(Vec2::new(200.0, 50.0), Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(s.vertices()[1].pos, [2.0, -0.5]);
        assert_eq!(s.vertices()[3].pos, [-2.0, 0.5]);
    }

    #[test]
    fn top_vertices_sample_v_min() {
        let s = Sprite::new(Vec2::new(1.0, 1.0), Vec4::new(0.5, 0.0, 1.0, 1.0));
        assert_eq!(s.vertices()[0].uv, [0.5, 1.0]); // bottom-left
        assert_eq!(s.vertices()[2].uv, [1.0, 0.0]); // top-right
    }
}
