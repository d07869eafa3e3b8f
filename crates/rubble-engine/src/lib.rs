pub mod api;
pub mod config;
pub mod core;
pub mod input;
pub mod levels;
pub mod renderer;
pub mod terrain;

// Re-export key types at crate root for convenience
pub use api::types::{CollisionCategory, Impact, ImpactMode, ImpactReport, PlatformId};
pub use config::{ArenaConfig, TerrainTuning};
pub use crate::core::broker::{BodyBroker, OwnedBody};
pub use crate::core::time::FixedTimestep;
pub use input::queue::ImpactQueue;
pub use levels::{LevelLayout, LevelLibrary, PlatformSpec};
pub use renderer::instance::{PlatformBuffer, PlatformInstance};
pub use terrain::arena::Arena;
pub use terrain::carver::{Circle, Rect, RemnantLimits};
pub use terrain::platform::{Platform, PlatformKind};

#[cfg(feature = "physics")]
pub use crate::core::physics::{
    PhysicsWorld, PhysicsBody, BodyDesc, BodyType,
    ColliderDesc, ColliderMaterial, CollisionPair,
};
