pub mod instance;

pub use instance::{PlatformBuffer, PlatformInstance};
