pub mod stream;
pub mod table;

pub use stream::{AlignedLine, AlignedStream, DecodedStream, PlanarPoint, ScanLine, Scanner};
pub use table::RawScanTable;
