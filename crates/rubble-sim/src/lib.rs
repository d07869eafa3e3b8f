pub mod runner;

pub use runner::ArenaRunner;
