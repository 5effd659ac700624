use bytemuck::{Pod, Zeroable};

use crate::components::sprite::FrameSource;

/// Per-instance render data written to shared memory for the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left x in world space.
    pub x: f32,
    /// Top-left y in world space (y down).
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Sheet id, or [`FrameSource::PLACEHOLDER`] / [`FrameSource::PARTICLE`].
    pub source: f32,
    /// Frame column on the sheet (tint index for particles).
    pub frame: f32,
    /// 1.0 facing right, -1.0 mirrored.
    pub facing: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl SpriteInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn is_placeholder(&self) -> bool {
        self.source == FrameSource::PLACEHOLDER
    }
}

/// Render buffer holding every instance for one frame, back to front.
pub struct RenderBuffer {
    pub instances: Vec<SpriteInstance>,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Instances past the capacity are dropped so the
    /// host-side buffer is never overrun.
    pub fn push(&mut self, instance: SpriteInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for shared-memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
