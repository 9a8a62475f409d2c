use std::path::{Path, PathBuf};

/// Translation of the second scanner across the lane, in the scanner's native unit.
pub const DEFAULT_TRANSLATE_OFFSET: f64 = 3840.0;

/// Inputs of one vehicle reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructionConfig {
    pub scanner_a: PathBuf,
    pub scanner_b: PathBuf,
    /// Added to the x coordinate of every scanner B sample before scaling.
    pub translate_offset: Option<f64>,
    pub pass_duration_s: f64,
    pub speed_kmh: f64,
}

pub struct ReconstructionBuilder {
    scanner_a: PathBuf,
    scanner_b: PathBuf,
    translate_offset: Option<f64>,
    pass_duration_s: f64,
    speed_kmh: f64,
}

impl ReconstructionBuilder {
    pub fn new(scanner_a: impl Into<PathBuf>, scanner_b: impl Into<PathBuf>) -> Self {
        Self {
            scanner_a: scanner_a.into(),
            scanner_b: scanner_b.into(),
            translate_offset: Some(DEFAULT_TRANSLATE_OFFSET),
            pass_duration_s: 0.0,
            speed_kmh: 0.0,
        }
    }

    /// Scanner files of vehicle `file_id` in `data_dir`: `LIDAR0_<id>.txt` and `LIDAR1_<id>.txt`.
    pub fn for_vehicle(data_dir: &Path, file_id: &str) -> Self {
        Self::new(
            data_dir.join(format!("LIDAR0_{}.txt", file_id)),
            data_dir.join(format!("LIDAR1_{}.txt", file_id)),
        )
    }

    pub fn translate_offset(mut self, offset: Option<f64>) -> Self {
        self.translate_offset = offset;
        self
    }

    pub fn pass_duration(mut self, seconds: f64) -> Self {
        self.pass_duration_s = seconds;
        self
    }

    pub fn speed(mut self, kmh: f64) -> Self {
        self.speed_kmh = kmh;
        self
    }

    pub fn build(self) -> ReconstructionConfig {
        ReconstructionConfig {
            scanner_a: self.scanner_a,
            scanner_b: self.scanner_b,
            translate_offset: self.translate_offset,
            pass_duration_s: self.pass_duration_s,
            speed_kmh: self.speed_kmh,
        }
    }
}
