use bytemuck::{Pod, Zeroable};

use crate::terrain::platform::Platform;

/// Per-platform render data for an external renderer.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PlatformInstance {
    /// Centre X in world space.
    pub x: f32,
    /// Centre Y in world space.
    pub y: f32,
    pub half_width: f32,
    pub half_height: f32,
    /// `PlatformKind::index()` as a float.
    pub kind: f32,
    /// Remaining health over max health, 0.0 to 1.0.
    pub health_ratio: f32,
    /// Max health relative to the kind's base health (below 1.0 for damage fragments).
    pub integrity: f32,
    pub _pad: f32,
}

impl PlatformInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_platform<H: Copy>(platform: &Platform<H>) -> Self {
        let base = platform.kind.base_health();
        Self {
            x: platform.center.x,
            y: platform.center.y,
            half_width: platform.half_extents.x,
            half_height: platform.half_extents.y,
            kind: platform.kind.index() as f32,
            health_ratio: platform.health_ratio(),
            integrity: if base > 0.0 { platform.max_health / base } else { 0.0 },
            _pad: 0.0,
        }
    }
}

/// Reusable buffer of platform instances, rebuilt once per frame.
pub struct PlatformBuffer {
    pub instances: Vec<PlatformInstance>,
}

impl PlatformBuffer {
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    /// Replace the contents with the given (alive) platforms.
    pub fn rebuild<'a, H: Copy + 'a>(&mut self, platforms: impl IntoIterator<Item = &'a Platform<H>>) {
        self.instances.clear();
        self.instances.extend(
            platforms
                .into_iter()
                .filter(|p| p.is_alive())
                .map(PlatformInstance::from_platform),
        );
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for PlatformBuffer {
    fn default() -> Self {
        Self::new()
    }
}
