pub mod align;
pub mod assemble;
pub mod builder;
pub mod runner;

pub use builder::{ReconstructionBuilder, ReconstructionConfig};
pub use runner::{VehicleProfile, VehicleReconstructor};
