use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::Path,
};

use csv::WriterBuilder;

use pcd_core::{pointcloud::extent::Extents, ReconstructionError};

pub const REPORT_FILE_NAME: &str = "dimensions.txt";

const HEADER: [&str; 4] = ["VehicleID", "Width(m)", "Height(m)", "Length(m)"];

/// Dimensions of every vehicle processed so far, keyed by vehicle id.
#[derive(Debug, Clone, Default)]
pub struct DimensionsReport {
    rows: BTreeMap<u32, Extents>,
}

impl DimensionsReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the dimensions of `vehicle_id`.
    pub fn insert(&mut self, vehicle_id: u32, extents: Extents) {
        self.rows.insert(vehicle_id, extents);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tab-separated header row, then one row per vehicle with 3 decimals.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), ReconstructionError> {
        let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);

        writer.write_record(HEADER).map_err(csv_error)?;
        for (id, extents) in &self.rows {
            writer
                .write_record([
                    id.to_string(),
                    format!("{:.3}", extents.width),
                    format!("{:.3}", extents.height),
                    format!("{:.3}", extents.length),
                ])
                .map_err(csv_error)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Rewrites the whole report at `path`.
    pub fn save(&self, path: &Path) -> Result<(), ReconstructionError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.write_to(File::create(path)?)?;
        log::debug!("wrote dimensions of {} vehicles to {:?}", self.len(), path);
        Ok(())
    }
}

fn csv_error(error: csv::Error) -> ReconstructionError {
    match error.into_kind() {
        csv::ErrorKind::Io(e) => ReconstructionError::Io(e),
        other => ReconstructionError::Io(std::io::Error::other(format!("{:?}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extents(width: f64, height: f64, length: f64) -> Extents {
        Extents {
            width,
            height,
            length,
        }
    }

    #[test]
    fn writes_header_and_rows_sorted_by_id() {
        let mut report = DimensionsReport::new();
        report.insert(12, extents(2.0, 1.5, 4.25));
        report.insert(3, extents(1.8456, 1.2344, 3.9999));

        let mut buf = Vec::new();
        report.write_to(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "VehicleID\tWidth(m)\tHeight(m)\tLength(m)\n\
             3\t1.846\t1.234\t4.000\n\
             12\t2.000\t1.500\t4.250\n"
        );
    }

    #[test]
    fn empty_report_has_header_only() {
        let mut buf = Vec::new();
        DimensionsReport::new().write_to(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "VehicleID\tWidth(m)\tHeight(m)\tLength(m)\n"
        );
    }

    #[test]
    fn reinserting_a_vehicle_replaces_its_row() {
        let mut report = DimensionsReport::new();
        report.insert(1, extents(1.0, 1.0, 1.0));
        report.insert(1, extents(2.0, 2.0, 2.0));
        assert_eq!(report.len(), 1);

        let mut buf = Vec::new();
        report.write_to(&mut buf).unwrap();
        assert!(String::from_utf8(buf)
            .unwrap()
            .ends_with("\n1\t2.000\t2.000\t2.000\n"));
    }

    #[test]
    fn save_rewrites_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(REPORT_FILE_NAME);

        let mut report = DimensionsReport::new();
        report.insert(1, extents(1.0, 2.0, 3.0));
        report.save(&path).unwrap();
        report.insert(2, extents(4.0, 5.0, 6.0));
        report.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.ends_with("2\t4.000\t5.000\t6.000\n"));
    }
}
