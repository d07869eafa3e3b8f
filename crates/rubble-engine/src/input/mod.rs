pub mod queue;

pub use queue::ImpactQueue;
