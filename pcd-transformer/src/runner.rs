use pcd_core::{
    pointcloud::{
        extent::{extent, Extents},
        point::PointCloud,
    },
    ReconstructionError,
};
use pcd_parser::parsers::{lidar::LidarParserProvider, ParserProvider as _};

use crate::{align::align, assemble::assemble, builder::ReconstructionConfig};

/// Cloud and dimensions of one vehicle.
#[derive(Debug, Clone)]
pub struct VehicleProfile {
    pub cloud: PointCloud,
    pub extents: Extents,
}

/// Runs decode, align, assemble and extent for one vehicle, in that order.
pub struct VehicleReconstructor {
    config: ReconstructionConfig,
}

impl VehicleReconstructor {
    pub fn new(config: ReconstructionConfig) -> Self {
        Self { config }
    }

    pub fn cloud(&self) -> Result<PointCloud, ReconstructionError> {
        let config = &self.config;

        let stream_a = LidarParserProvider {
            filename: config.scanner_a.clone(),
            translate_offset: None,
        }
        .get_parser()
        .parse()?;
        let stream_b = LidarParserProvider {
            filename: config.scanner_b.clone(),
            translate_offset: config.translate_offset,
        }
        .get_parser()
        .parse()?;

        let aligned = align(
            stream_a,
            stream_b,
            config.pass_duration_s,
            config.speed_kmh,
        );
        Ok(assemble(&aligned))
    }

    pub fn execute(&self) -> Result<VehicleProfile, ReconstructionError> {
        let cloud = self.cloud()?;
        let extents = extent(&cloud)?;
        Ok(VehicleProfile { cloud, extents })
    }
}
