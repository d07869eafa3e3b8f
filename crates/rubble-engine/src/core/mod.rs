pub mod broker;
#[cfg(feature = "physics")]
pub mod physics;
pub mod time;
