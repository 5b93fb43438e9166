use std::num::NonZeroU64;

/// Per-frame uniform storage addressed with dynamic offsets.
///
/// Each draw pushes a snapshot of its [`UniformBlock`](super::UniformBlock)
/// bytes; the arena hands back the offset to pass to `set_bind_group`. All
/// snapshots are uploaded with one `write_buffer` before the pass is
/// recorded. The GPU buffer grows to the next power of two and is kept.
pub(crate) struct UniformArena {
    label: &'static str,
    block_size: u64,
    stride: u64,
    staging: Vec<u8>,

    buffer: Option<wgpu::Buffer>,
    capacity: u64,
    bind_group: Option<wgpu::BindGroup>,
}

impl UniformArena {
    /// `alignment` is the device's `min_uniform_buffer_offset_alignment`.
    pub(crate) fn new(label: &'static str, block_size: usize, alignment: u32) -> Self {
        let block_size = block_size.max(16) as u64;
        Self {
            label,
            block_size,
            stride: block_size.next_multiple_of(u64::from(alignment.max(1))),
            staging: Vec::new(),
            buffer: None,
            capacity: 0,
            bind_group: None,
        }
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.staging.clear();
    }

    /// Size the bind group layout must declare as `min_binding_size`.
    #[inline]
    pub(crate) fn binding_size(&self) -> Option<NonZeroU64> {
        NonZeroU64::new(self.block_size)
    }

    /// Appends one snapshot and returns its dynamic offset.
    pub(crate) fn push(&mut self, bytes: &[u8]) -> u32 {
        let offset = self.staging.len();
        let len = bytes.len().min(self.block_size as usize);
        self.staging.extend_from_slice(&bytes[..len]);
        self.staging.resize(offset + self.stride as usize, 0);
        offset as u32
    }

    /// Uploads all snapshots pushed since the last [`clear`](Self::clear).
    pub(crate) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
    ) {
        if self.staging.is_empty() {
            return;
        }

        let required = self.staging.len() as u64;
        if self.buffer.is_none() || required > self.capacity {
            let slots = (required / self.stride).next_power_of_two().max(64);
            self.capacity = slots * self.stride;

            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: self.capacity,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(self.label),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &buffer,
                        offset: 0,
                        size: self.binding_size(),
                    }),
                }],
            }));
            self.buffer = Some(buffer);
        }

        if let Some(buffer) = self.buffer.as_ref() {
            queue.write_buffer(buffer, 0, &self.staging);
        }
    }

    /// Bind group over the whole buffer; valid after [`upload`](Self::upload).
    #[inline]
    pub(crate) fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.bind_group.as_ref()
    }
}

/// Bind group layout entry for a dynamic-offset uniform at binding 0.
pub(crate) fn dynamic_uniform_entry(
    visibility: wgpu::ShaderStages,
    min_binding_size: Option<NonZeroU64>,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: true,
            min_binding_size,
        },
        count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_step_by_aligned_stride() {
        let mut arena = UniformArena::new("test", 32, 256);
        assert_eq!(arena.push(&[1u8; 32]), 0);
        assert_eq!(arena.push(&[2u8; 32]), 256);
        assert_eq!(arena.push(&[3u8; 32]), 512);
        assert_eq!(arena.staging.len(), 768);
        assert_eq!(arena.staging[256], 2);
        assert_eq!(arena.staging[256 + 32], 0);
    }

    #[test]
    fn block_larger_than_alignment_rounds_stride_up() {
        let mut arena = UniformArena::new("test", 80, 64);
        arena.push(&[0u8; 80]);
        assert_eq!(arena.push(&[0u8; 80]), 128);
    }

    #[test]
    fn clear_restarts_offsets() {
        let mut arena = UniformArena::new("test", 16, 256);
        arena.push(&[0u8; 16]);
        arena.clear();
        assert_eq!(arena.push(&[0u8; 16]), 0);
    }

    #[test]
    fn binding_size_is_the_block_size() {
        let arena = UniformArena::new("test", 64, 256);
        assert_eq!(arena.binding_size().map(NonZeroU64::get), Some(64));
    }
}
