use pcd_core::{scan::DecodedStream, ReconstructionError};

pub mod lidar;

pub trait ParserProvider {
    fn get_parser(&self) -> Box<dyn Parser>;
}

pub trait Parser {
    fn parse(&self) -> Result<DecodedStream, ReconstructionError>;
}
