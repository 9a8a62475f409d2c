use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use pcd_core::ReconstructionError;

/// One row of the vehicle manifest.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct VehicleRecord {
    pub id: u32,
    /// Time the vehicle took to pass the scanners, in seconds.
    pub duration: f64,
    /// Vehicle speed, in km/h.
    pub speed: f64,
}

impl VehicleRecord {
    /// Zero-padded id used in file names (`LIDAR0_05.txt`, `Cloud_05.txt`).
    pub fn file_id(&self) -> String {
        format!("{:02}", self.id)
    }
}

pub fn read_manifest(path: impl AsRef<Path>) -> Result<Vec<VehicleRecord>, ReconstructionError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ReconstructionError::MissingFile(path.to_path_buf()),
        _ => ReconstructionError::Io(e),
    })?;
    let records = parse_manifest(path, file)?;
    log::debug!("read {} vehicle records from {:?}", records.len(), path);
    Ok(records)
}

/// Parses tab-separated `id, duration, speed` rows. The first row is a header and
/// columns are matched by position, not by header name.
pub fn parse_manifest<R: Read>(
    path: impl Into<PathBuf>,
    reader: R,
) -> Result<Vec<VehicleRecord>, ReconstructionError> {
    let path = path.into();
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(&path, e))?;
        let vehicle: VehicleRecord = record
            .deserialize(None)
            .map_err(|e| csv_error(&path, e))?;

        for (name, value) in [("duration", vehicle.duration), ("speed", vehicle.speed)] {
            if !value.is_finite() || value < 0.0 {
                let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
                return Err(ReconstructionError::input_format(
                    &path,
                    line,
                    format!("{} must be a non-negative number, got {}", name, value),
                ));
            }
        }
        records.push(vehicle);
    }

    Ok(records)
}

fn csv_error(path: &Path, error: csv::Error) -> ReconstructionError {
    let line = error.position().map(|p| p.line() as usize).unwrap_or(0);
    ReconstructionError::input_format(path, line, error.to_string())
}
