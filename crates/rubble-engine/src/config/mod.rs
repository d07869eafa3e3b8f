pub mod tuning;

pub use tuning::{ArenaConfig, TerrainTuning};
