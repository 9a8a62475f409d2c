use std::path::PathBuf;

use pcd_core::{scan::DecodedStream, ReconstructionError};

use crate::{decoder::decode, reader::scan::read_scan_table};

use super::{Parser, ParserProvider};

pub struct LidarParserProvider {
    pub filename: PathBuf,
    pub translate_offset: Option<f64>,
}

impl ParserProvider for LidarParserProvider {
    fn get_parser(&self) -> Box<dyn Parser> {
        Box::new(LidarParser {
            filename: self.filename.clone(),
            translate_offset: self.translate_offset,
        })
    }
}

/// Reads one scanner's distance table and decodes it into scan lines.
pub struct LidarParser {
    pub filename: PathBuf,
    pub translate_offset: Option<f64>,
}

impl Parser for LidarParser {
    fn parse(&self) -> Result<DecodedStream, ReconstructionError> {
        let table = read_scan_table(&self.filename)?;
        let stream = decode(&table, self.translate_offset);
        log::debug!(
            "decoded {} scan lines from {:?} (translate: {:?})",
            stream.len(),
            self.filename,
            self.translate_offset
        );
        Ok(stream)
    }
}
