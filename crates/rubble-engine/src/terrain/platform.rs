use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::CollisionCategory;
use crate::core::broker::{BodyBroker, OwnedBody};
use crate::terrain::carver::Rect;

/// Material of a platform. Decides its base structural health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    Ground,
    Wood,
    #[default]
    Stone,
    Metal,
    Brick,
    Roof,
}

impl PlatformKind {
    pub const ALL: [PlatformKind; 6] = [
        PlatformKind::Ground,
        PlatformKind::Wood,
        PlatformKind::Stone,
        PlatformKind::Metal,
        PlatformKind::Brick,
        PlatformKind::Roof,
    ];

    pub const fn base_health(self) -> f32 {
        match self {
            PlatformKind::Ground => 800.0,
            PlatformKind::Wood => 60.0,
            PlatformKind::Stone => 200.0,
            PlatformKind::Metal => 300.0,
            PlatformKind::Brick => 150.0,
            PlatformKind::Roof => 40.0,
        }
    }

    /// Stable small index for renderers.
    pub const fn index(self) -> u32 {
        match self {
            PlatformKind::Ground => 0,
            PlatformKind::Wood => 1,
            PlatformKind::Stone => 2,
            PlatformKind::Metal => 3,
            PlatformKind::Brick => 4,
            PlatformKind::Roof => 5,
        }
    }
}

/// A destructible, axis-aligned slab of arena geometry.
///
/// A platform is alive exactly while it owns a physics body. Once the body
/// is released the platform is a tombstone and can never come back; repaired
/// terrain is always a new platform.
#[derive(Debug)]
pub struct Platform<H> {
    pub center: Vec2,
    pub half_extents: Vec2,
    pub kind: PlatformKind,
    pub health: f32,
    pub max_health: f32,
    body: Option<OwnedBody<H>>,
}

impl<H: Copy> Platform<H> {
    /// Create a live platform at full `max_health`, asking the broker for its body.
    pub(crate) fn spawn<B>(broker: &mut B, rect: Rect, kind: PlatformKind, max_health: f32) -> Self
    where
        B: BodyBroker<Handle = H> + ?Sized,
    {
        let body = OwnedBody::create(broker, rect.center, rect.half_extents, CollisionCategory::Platform);
        Self {
            center: rect.center,
            half_extents: rect.half_extents,
            kind,
            health: max_health,
            max_health,
            body: Some(body),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.body.is_some()
    }

    /// The physics body handle, `None` once destroyed.
    pub fn body(&self) -> Option<H> {
        self.body.as_ref().map(OwnedBody::handle)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.center, self.half_extents)
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Release the body and mark the platform dead.
    /// Returns `false` (and touches nothing) if it was already dead.
    pub(crate) fn destroy<B>(&mut self, broker: &mut B) -> bool
    where
        B: BodyBroker<Handle = H> + ?Sized,
    {
        match self.body.take() {
            Some(body) => {
                body.release(broker);
                self.health = 0.0;
                true
            }
            None => false,
        }
    }
}
