pub mod builtin;
pub mod layout;

pub use layout::{LevelLayout, LevelLibrary, PlatformSpec};
