use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identifier for a platform slot in the arena.
///
/// The generation is bumped every time a slot is recycled, so an id held
/// across a compaction resolves to `None` instead of to a different platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformId {
    pub index: u32,
    pub generation: u32,
}

/// Collision category tag carried by every physics body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionCategory {
    Platform,
    Player,
    Projectile,
    Pickup,
}

impl CollisionCategory {
    pub const fn bits(self) -> u32 {
        match self {
            CollisionCategory::Platform => 0x0001,
            CollisionCategory::Player => 0x0002,
            CollisionCategory::Projectile => 0x0004,
            CollisionCategory::Pickup => 0x0008,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            0x0001 => Some(CollisionCategory::Platform),
            0x0002 => Some(CollisionCategory::Player),
            0x0004 => Some(CollisionCategory::Projectile),
            0x0008 => Some(CollisionCategory::Pickup),
            _ => None,
        }
    }
}

/// How an impact treats the platforms it touches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpactMode {
    /// Destroy every touched platform regardless of health and keep the
    /// parts outside the carved box at full health.
    Carve,
    /// Subtract distance-scaled damage; only platforms driven to zero
    /// health are destroyed.
    Damage { amount: f32 },
}

/// An impact handed over by the combat layer. Ephemeral, never stored
/// beyond the frame it is applied in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub center: Vec2,
    pub radius: f32,
    pub mode: ImpactMode,
}

impl Impact {
    pub fn carve(center: Vec2, radius: f32) -> Self {
        Self { center, radius, mode: ImpactMode::Carve }
    }

    pub fn damage(center: Vec2, radius: f32, amount: f32) -> Self {
        Self { center, radius, mode: ImpactMode::Damage { amount } }
    }
}

/// Outcome of applying one impact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImpactReport {
    /// Platforms inside the radius (carved or damaged).
    pub hit: usize,
    /// Platforms whose bodies were released.
    pub destroyed: usize,
    /// Remnant platforms inserted afterwards.
    pub remnants: usize,
}

impl ImpactReport {
    pub fn merge(&mut self, other: ImpactReport) {
        self.hit += other.hit;
        self.destroyed += other.destroyed;
        self.remnants += other.remnants;
    }
}
