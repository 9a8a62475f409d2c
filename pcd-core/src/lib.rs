pub mod error;
pub mod pointcloud;
pub mod scan;

pub use error::ReconstructionError;
