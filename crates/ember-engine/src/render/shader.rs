//! Shader programs and their named uniform blocks.
//!
//! A [`Shader`] is a pair of WGSL modules (one per stage) plus a
//! [`UniformBlock`]: a CPU copy of the `@group(0) @binding(0)` uniform struct
//! whose fields are addressed by name. Renderers set fields through the typed
//! setters and snapshot the block into a [`UniformArena`](super::arena::UniformArena)
//! once per draw.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::math::{Mat4, Vec2, Vec4};
use crate::paint::Color;

use super::AssetError;

// ── source ────────────────────────────────────────────────────────────────

/// WGSL source for a two-stage program.
///
/// Both stages use the entry points `vs_main` and `fs_main`.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub label: String,
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShaderSource {
    pub fn from_wgsl(
        label: impl Into<String>,
        vertex: impl Into<Cow<'static, str>>,
        fragment: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            label: label.into(),
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Reads both stages from disk.
    pub fn from_files(
        label: impl Into<String>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, AssetError> {
        Ok(Self::from_wgsl(
            label,
            read_stage(vertex_path.as_ref())?,
            read_stage(fragment_path.as_ref())?,
        ))
    }
}

fn read_stage(path: &Path) -> Result<String, AssetError> {
    std::fs::read_to_string(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })
}

// ── uniform block ─────────────────────────────────────────────────────────

/// Type of one uniform field, with its WGSL uniform-address-space layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UniformKind {
    F32,
    I32,
    Vec2,
    Vec4,
    Mat4,
}

impl UniformKind {
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            Self::F32 | Self::I32 => 4,
            Self::Vec2 => 8,
            Self::Vec4 => 16,
            Self::Mat4 => 64,
        }
    }

    #[inline]
    pub const fn align(self) -> usize {
        match self {
            Self::F32 | Self::I32 => 4,
            Self::Vec2 => 8,
            Self::Vec4 | Self::Mat4 => 16,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Slot {
    offset: usize,
    kind: UniformKind,
}

/// CPU mirror of a uniform struct, addressed by field name.
///
/// Fields are laid out in declaration order with WGSL alignment; the total
/// size is rounded up to 16 bytes. Writes to names the block does not know
/// (or with the wrong type) are dropped with a one-time warning per name.
#[derive(Debug, Clone)]
pub struct UniformBlock {
    slots: HashMap<String, Slot>,
    data: Vec<u8>,
    warned: HashSet<String>,
}

impl UniformBlock {
    pub fn new<'a>(fields: impl IntoIterator<Item = (&'a str, UniformKind)>) -> Self {
        let mut slots = HashMap::new();
        let mut end = 0usize;

        for (name, kind) in fields {
            let offset = end.next_multiple_of(kind.align());
            slots.insert(name.to_owned(), Slot { offset, kind });
            end = offset + kind.size();
        }

        Self {
            slots,
            data: vec![0u8; end.next_multiple_of(16).max(16)],
            warned: HashSet::new(),
        }
    }

    /// Size of the block in bytes (a multiple of 16).
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Byte offset of `name`, if the block has such a field.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.slots.get(name).map(|s| s.offset)
    }

    pub fn set_f32(&mut self, name: &str, v: f32) {
        self.write(name, UniformKind::F32, bytemuck::bytes_of(&v));
    }

    pub fn set_i32(&mut self, name: &str, v: i32) {
        self.write(name, UniformKind::I32, bytemuck::bytes_of(&v));
    }

    pub fn set_vec2(&mut self, name: &str, v: Vec2) {
        self.write(name, UniformKind::Vec2, bytemuck::cast_slice(&[v.x, v.y]));
    }

    pub fn set_vec4(&mut self, name: &str, v: Vec4) {
        self.write(name, UniformKind::Vec4, bytemuck::bytes_of(&v));
    }

    /// Writes a premultiplied color into a `vec4<f32>` field.
    pub fn set_color(&mut self, name: &str, c: Color) {
        self.write(name, UniformKind::Vec4, bytemuck::cast_slice(&c.to_array()));
    }

    /// Writes a column-major matrix; `transpose` uploads its transpose instead.
    pub fn set_mat4(&mut self, name: &str, transpose: bool, m: &Mat4) {
        let m = if transpose { m.transposed() } else { *m };
        self.write(name, UniformKind::Mat4, bytemuck::bytes_of(&m));
    }

    fn write(&mut self, name: &str, kind: UniformKind, bytes: &[u8]) {
        let slot = match self.slots.get(name) {
            Some(&slot) if slot.kind == kind => slot,
            found => {
                if self.warned.insert(name.to_owned()) {
                    match found {
                        Some(slot) => log::warn!(
                            "uniform `{name}` is {:?}, not {kind:?}; write ignored",
                            slot.kind
                        ),
                        None => log::warn!("uniform `{name}` does not exist; write ignored"),
                    }
                }
                return;
            }
        };
        self.data[slot.offset..slot.offset + bytes.len()].copy_from_slice(bytes);
    }
}

// ── compiled program ──────────────────────────────────────────────────────

/// Compiled vertex + fragment modules with the program's uniform block.
pub struct Shader {
    label: String,
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
    uniforms: UniformBlock,
}

impl Shader {
    pub fn compile(device: &wgpu::Device, source: &ShaderSource, uniforms: UniformBlock) -> Self {
        let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} vertex", source.label)),
            source: wgpu::ShaderSource::Wgsl(source.vertex.clone()),
        });
        let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} fragment", source.label)),
            source: wgpu::ShaderSource::Wgsl(source.fragment.clone()),
        });
        log::debug!("compiled shader `{}` ({} uniform bytes)", source.label, uniforms.size());

        Self {
            label: source.label.clone(),
            vertex,
            fragment,
            uniforms,
        }
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn uniforms(&self) -> &UniformBlock {
        &self.uniforms
    }

    #[inline]
    pub fn uniforms_mut(&mut self) -> &mut UniformBlock {
        &mut self.uniforms
    }

    pub fn vertex_state<'a>(
        &'a self,
        buffers: &'a [wgpu::VertexBufferLayout<'a>],
    ) -> wgpu::VertexState<'a> {
        wgpu::VertexState {
            module: &self.vertex,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers,
        }
    }

    pub fn fragment_state<'a>(
        &'a self,
        targets: &'a [Option<wgpu::ColorTargetState>],
    ) -> wgpu::FragmentState<'a> {
        wgpu::FragmentState {
            module: &self.fragment,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f32_at(block: &UniformBlock, offset: usize) -> f32 {
        bytemuck::pod_read_unaligned(&block.bytes()[offset..offset + 4])
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn rect_block_packs_vec2_pairs_before_vec4() {
        let block = UniformBlock::new([
            ("u_topLeft", UniformKind::Vec2),
            ("u_size", UniformKind::Vec2),
            ("u_color", UniformKind::Vec4),
        ]);
        assert_eq!(block.offset_of("u_topLeft"), Some(0));
        assert_eq!(block.offset_of("u_size"), Some(8));
        assert_eq!(block.offset_of("u_color"), Some(16));
        assert_eq!(block.size(), 32);
    }

    #[test]
    fn scalar_then_vec4_is_padded_to_sixteen() {
        let block = UniformBlock::new([("u_layer", UniformKind::F32), ("u_color", UniformKind::Vec4)]);
        assert_eq!(block.offset_of("u_color"), Some(16));
        assert_eq!(block.size(), 32);
    }

    #[test]
    fn trailing_scalar_rounds_size_up() {
        let block = UniformBlock::new([("u_mat", UniformKind::Mat4), ("u_atlas", UniformKind::I32)]);
        assert_eq!(block.offset_of("u_atlas"), Some(64));
        assert_eq!(block.size(), 80);
    }

    // ── setters ───────────────────────────────────────────────────────────

    #[test]
    fn setters_write_at_slot_offsets() {
        let mut block = UniformBlock::new([
            ("u_topLeft", UniformKind::Vec2),
            ("u_size", UniformKind::Vec2),
            ("u_color", UniformKind::Vec4),
        ]);
        block.set_vec2("u_size", Vec2::new(3.0, 4.0));
        block.set_vec4("u_color", Vec4::new(0.1, 0.2, 0.3, 0.4));

        assert_eq!(f32_at(&block, 8), 3.0);
        assert_eq!(f32_at(&block, 12), 4.0);
        assert_eq!(f32_at(&block, 28), 0.4);
        assert_eq!(f32_at(&block, 0), 0.0);
    }

    #[test]
    fn set_mat4_transpose_swaps_rows_and_columns() {
        let mut block = UniformBlock::new([("u_mat", UniformKind::Mat4)]);
        let m = Mat4::translation(crate::math::Vec3::new(5.0, 6.0, 7.0));

        block.set_mat4("u_mat", false, &m);
        // Column 3 holds the translation in column-major order.
        assert_eq!(f32_at(&block, 48), 5.0);

        block.set_mat4("u_mat", true, &m);
        assert_eq!(f32_at(&block, 48), 0.0);
        assert_eq!(f32_at(&block, 12), 5.0);
    }

    #[test]
    fn unknown_and_mistyped_names_leave_data_untouched() {
        let mut block = UniformBlock::new([("u_color", UniformKind::Vec4)]);
        block.set_f32("u_missing", 1.0);
        block.set_f32("u_color", 1.0);
        block.set_f32("u_color", 2.0);
        assert!(block.bytes().iter().all(|&b| b == 0));
        assert_eq!(block.warned.len(), 2);
    }

    #[test]
    fn set_i32_stores_integer_bits() {
        let mut block = UniformBlock::new([("u_atlas", UniformKind::I32)]);
        block.set_i32("u_atlas", -3);
        let v: i32 = bytemuck::pod_read_unaligned(&block.bytes()[0..4]);
        assert_eq!(v, -3);
    }

    // ── source ────────────────────────────────────────────────────────────

    #[test]
    fn from_files_reports_missing_stage() {
        let err = ShaderSource::from_files("x", "/nonexistent/a.wgsl", "/nonexistent/b.wgsl")
            .unwrap_err();
        assert!(matches!(err, AssetError::Read { ref path, .. } if path.ends_with("a.wgsl")));
    }

    #[test]
    fn from_files_reads_both_stages() {
        let dir = std::env::temp_dir().join(format!("ember-shader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let (v, f) = (dir.join("s.vert.wgsl"), dir.join("s.frag.wgsl"));
        std::fs::write(&v, "// vertex").unwrap();
        std::fs::write(&f, "// fragment").unwrap();

        let src = ShaderSource::from_files("s", &v, &f).unwrap();
        assert_eq!(src.vertex, "// vertex");
        assert_eq!(src.fragment, "// fragment");

        std::fs::remove_dir_all(&dir).ok();
    }
}
