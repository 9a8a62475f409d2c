use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
    time::Instant,
};

use rayon::iter::{IntoParallelRefIterator as _, ParallelIterator as _};

use pcd_core::{pointcloud::extent::Extents, ReconstructionError};
use pcd_exporter::{
    cloud::{cloud_file_name, export_cloud},
    report::{DimensionsReport, REPORT_FILE_NAME},
};
use pcd_parser::reader::manifest::{read_manifest, VehicleRecord};
use pcd_transformer::{ReconstructionBuilder, VehicleReconstructor};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub manifest: PathBuf,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub translate_offset: Option<f64>,
    /// Vehicle ids to process; empty means all of them.
    pub only: Vec<u32>,
}

#[derive(Debug)]
pub struct VehicleOutcome {
    pub record: VehicleRecord,
    pub result: Result<Extents, ReconstructionError>,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    /// In manifest order.
    pub outcomes: Vec<VehicleOutcome>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> impl Iterator<Item = (&VehicleRecord, &Extents)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|e| (&o.record, e)))
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }
}

/// Reconstructs every vehicle of the manifest.
///
/// A failing vehicle is logged and skipped. Only a manifest that cannot be read, or an
/// output directory that cannot be created, fails the whole batch.
pub fn run_batch(options: &BatchOptions) -> Result<BatchSummary, ReconstructionError> {
    let records: Vec<VehicleRecord> = read_manifest(&options.manifest)?
        .into_iter()
        .filter(|r| options.only.is_empty() || options.only.contains(&r.id))
        .collect();
    let records = keep_last_per_id(records);
    log::info!("{} vehicles to process", records.len());

    fs::create_dir_all(&options.output_dir)?;
    let report_path = options.output_dir.join(REPORT_FILE_NAME);
    let report = Mutex::new(DimensionsReport::new());

    let outcomes = records
        .par_iter()
        .map(|record| {
            let start = Instant::now();
            let result = process_vehicle(record, options, &report, &report_path);
            match &result {
                Ok(extents) => log::info!(
                    "vehicle {}: width {:.3} m, height {:.3} m, length {:.3} m ({:?})",
                    record.file_id(),
                    extents.width,
                    extents.height,
                    extents.length,
                    start.elapsed()
                ),
                Err(e) => log::error!("Error processing vehicle {}: {}", record.file_id(), e),
            }
            VehicleOutcome {
                record: *record,
                result,
            }
        })
        .collect();

    Ok(BatchSummary { outcomes })
}

/// A vehicle listed more than once is processed once, with its last row.
fn keep_last_per_id(records: Vec<VehicleRecord>) -> Vec<VehicleRecord> {
    let mut seen = HashSet::new();
    let mut kept: Vec<VehicleRecord> = records
        .into_iter()
        .rev()
        .filter(|r| {
            let first = seen.insert(r.id);
            if !first {
                log::warn!("vehicle {} is listed more than once, using its last row", r.file_id());
            }
            first
        })
        .collect();
    kept.reverse();
    kept
}

fn process_vehicle(
    record: &VehicleRecord,
    options: &BatchOptions,
    report: &Mutex<DimensionsReport>,
    report_path: &Path,
) -> Result<Extents, ReconstructionError> {
    let file_id = record.file_id();
    let config = ReconstructionBuilder::for_vehicle(&options.data_dir, &file_id)
        .translate_offset(options.translate_offset)
        .pass_duration(record.duration)
        .speed(record.speed)
        .build();

    let profile = VehicleReconstructor::new(config).execute()?;

    let cloud_path = options.output_dir.join(cloud_file_name(&file_id));
    export_cloud(&cloud_path, &profile.cloud)?;

    // the report always reflects every vehicle finished so far
    let mut report = report.lock().unwrap_or_else(PoisonError::into_inner);
    report.insert(record.id, profile.extents);
    report.save(report_path)?;

    Ok(profile.extents)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new(manifest: &str) -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::create_dir_all(dir.path().join("measurements")).unwrap();
            fs::write(dir.path().join("vehicle_info.txt"), manifest).unwrap();
            Self { dir }
        }

        fn scan(&self, name: &str, text: &str) {
            fs::write(self.dir.path().join("measurements").join(name), text).unwrap();
        }

        fn options(&self, only: Vec<u32>) -> BatchOptions {
            BatchOptions {
                manifest: self.dir.path().join("vehicle_info.txt"),
                data_dir: self.dir.path().join("measurements"),
                output_dir: self.dir.path().join("output"),
                translate_offset: Some(3840.0),
                only,
            }
        }

        fn output(&self, name: &str) -> PathBuf {
            self.dir.path().join("output").join(name)
        }
    }

    const MANIFEST: &str = "VehicleID\tDuration\tSpeed\n1\t1.0\t36\n2\t1.0\t36\n3\t0.5\t72\n";

    #[test]
    fn failing_vehicles_are_skipped() {
        let fixture = Fixture::new(MANIFEST);
        fixture.scan("LIDAR0_01.txt", "1000 0\n2000 0\n");
        fixture.scan("LIDAR1_01.txt", "1000 0\n");
        // vehicle 2 has no scanner files
        fixture.scan("LIDAR0_03.txt", "0 0\n0 0\n");
        fixture.scan("LIDAR1_03.txt", "0 0\n0 0\n");

        let summary = run_batch(&fixture.options(Vec::new())).unwrap();

        assert_eq!(summary.outcomes.len(), 3);
        assert_eq!(summary.failed_count(), 2);
        assert!(matches!(
            summary.outcomes[1].result,
            Err(ReconstructionError::MissingFile(_))
        ));
        assert!(matches!(
            summary.outcomes[2].result,
            Err(ReconstructionError::EmptyCloud)
        ));

        let ok: Vec<u32> = summary.succeeded().map(|(r, _)| r.id).collect();
        assert_eq!(ok, vec![1]);

        assert!(fixture.output("Cloud_01.txt").exists());
        assert!(!fixture.output("Cloud_02.txt").exists());
        assert!(!fixture.output("Cloud_03.txt").exists());

        let report = fs::read_to_string(fixture.output(REPORT_FILE_NAME)).unwrap();
        assert_eq!(
            report,
            "VehicleID\tWidth(m)\tHeight(m)\tLength(m)\n1\t4.840\t0.000\t10.000\n"
        );
    }

    #[test]
    fn cloud_file_has_one_row_per_point() {
        let fixture = Fixture::new(MANIFEST);
        fixture.scan("LIDAR0_01.txt", "1000 1000\n");
        fixture.scan("LIDAR1_01.txt", "0 1000\n");

        let summary = run_batch(&fixture.options(vec![1])).unwrap();
        assert_eq!(summary.outcomes.len(), 1);
        assert_eq!(summary.failed_count(), 0);

        let cloud = fs::read_to_string(fixture.output("Cloud_01.txt")).unwrap();
        assert_eq!(cloud.lines().count(), 3);
        assert!(cloud.lines().all(|l| l.split(' ').count() == 3));
    }

    #[test]
    fn duplicate_ids_use_the_last_row() {
        let fixture = Fixture::new("id\tduration\tspeed\n1\t1.0\t36\n2\t1.0\t36\n1\t1.0\t72\n");
        fixture.scan("LIDAR0_01.txt", "1000 0\n2000 0\n");
        fixture.scan("LIDAR1_01.txt", "1000 0\n");

        let summary = run_batch(&fixture.options(Vec::new())).unwrap();

        let ids: Vec<u32> = summary.outcomes.iter().map(|o| o.record.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(summary.outcomes[1].record.speed, 72.0);

        let report = fs::read_to_string(fixture.output(REPORT_FILE_NAME)).unwrap();
        assert_eq!(
            report,
            "VehicleID\tWidth(m)\tHeight(m)\tLength(m)\n1\t4.840\t0.000\t20.000\n"
        );
    }

    #[test]
    fn only_filters_vehicles() {
        let fixture = Fixture::new(MANIFEST);
        let summary = run_batch(&fixture.options(vec![2, 3])).unwrap();
        let ids: Vec<u32> = summary.outcomes.iter().map(|o| o.record.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn missing_manifest_fails_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let options = BatchOptions {
            manifest: dir.path().join("vehicle_info.txt"),
            data_dir: dir.path().to_path_buf(),
            output_dir: dir.path().join("output"),
            translate_offset: None,
            only: Vec::new(),
        };
        assert!(matches!(
            run_batch(&options),
            Err(ReconstructionError::MissingFile(_))
        ));
    }
}
