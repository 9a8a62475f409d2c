//! Polar to Cartesian conversion of raw scanner tables.
//!
//! Every scan line starts at [`START_ANGLE_DEG`] and advances by [`ANGLE_STEP_DEG`]
//! per sample in the scanner's native rotation direction. Coordinates are produced in
//! the scanner plane and scaled by [`UNIT_SCALE`] (native unit to millimeters).

use rayon::prelude::*;

use pcd_core::scan::{DecodedStream, PlanarPoint, RawScanTable, ScanLine};

pub const START_ANGLE_DEG: f64 = 180.0;
pub const ANGLE_STEP_DEG: f64 = 0.5;
pub const UNIT_SCALE: f64 = 1000.0;

/// Angle of the `index`-th sample of a scan line, in radians.
pub fn sample_angle(index: usize) -> f64 {
    (START_ANGLE_DEG + index as f64 * ANGLE_STEP_DEG).to_radians()
}

pub fn decode_sample(distance: f64, angle: f64, translate_offset: Option<f64>) -> PlanarPoint {
    if distance == 0.0 {
        return PlanarPoint::SENTINEL;
    }

    let mut x = distance * angle.cos();
    let y = distance * angle.sin();
    if let Some(offset) = translate_offset {
        x += offset;
    }

    PlanarPoint::new(x * UNIT_SCALE, y * UNIT_SCALE)
}

pub fn decode_line(distances: &[f64], translate_offset: Option<f64>) -> ScanLine {
    let points = distances
        .iter()
        .enumerate()
        .map(|(i, &d)| decode_sample(d, sample_angle(i), translate_offset))
        .collect();
    ScanLine::new(points)
}

/// Decodes every scan line of `table`.
///
/// `translate_offset` is added to x (in the table's native unit) before scaling, and is
/// used for the second scanner, which sits across the lane from the first one.
pub fn decode(table: &RawScanTable, translate_offset: Option<f64>) -> DecodedStream {
    let lines: Vec<ScanLine> = table
        .rows()
        .par_iter()
        .map(|row| decode_line(row, translate_offset))
        .collect();
    DecodedStream::new(lines)
}
