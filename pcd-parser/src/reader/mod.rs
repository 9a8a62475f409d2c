pub mod manifest;
pub mod scan;

use pcd_core::ReconstructionError;

pub trait ScanRowReader {
    fn next_row(&mut self) -> Result<Option<Vec<f64>>, ReconstructionError>;
}
