pub mod arena;
pub mod carver;
pub mod destruction;
pub mod platform;
pub mod spawn;
pub mod store;

pub use arena::Arena;
pub use carver::{Circle, Rect, RemnantLimits};
pub use platform::{Platform, PlatformKind};
pub use store::PlatformStore;
