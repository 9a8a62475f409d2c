use serde::{Deserialize, Serialize};

use crate::error::ReconstructionError;

use super::point::PointCloud;

/// Axis-aligned dimensions of a vehicle cloud, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    /// Span along x (across the lane).
    pub width: f64,
    /// Span along y (vertical).
    pub height: f64,
    /// Span along z (travel axis).
    pub length: f64,
}

/// Computes the bounding extents of `cloud`.
///
/// Fails with [`ReconstructionError::EmptyCloud`] when the cloud has no points,
/// since min/max are undefined.
pub fn extent(cloud: &PointCloud) -> Result<Extents, ReconstructionError> {
    if cloud.points.is_empty() {
        return Err(ReconstructionError::EmptyCloud);
    }

    let mut min = [f64::MAX; 3];
    let mut max = [f64::MIN; 3];
    for point in &cloud.points {
        for (axis, value) in point.to_array().into_iter().enumerate() {
            min[axis] = min[axis].min(value);
            max[axis] = max[axis].max(value);
        }
    }

    let extents = Extents {
        width: max[0] - min[0],
        height: max[1] - min[1],
        length: max[2] - min[2],
    };
    log::debug!("extents of {} points: {:?}", cloud.points.len(), extents);

    Ok(extents)
}
