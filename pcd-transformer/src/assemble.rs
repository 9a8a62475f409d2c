use pcd_core::{
    pointcloud::point::{Point, PointCloud},
    scan::AlignedStream,
};

/// Travel-axis positions are in millimeters.
pub const POSITION_SCALE: f64 = 1000.0;
/// Decoded planar coordinates carry the decoder's extra x1000 on top of millimeters.
pub const PLANAR_SCALE: f64 = 1_000_000.0;

/// Flattens an aligned stream into a point cloud in meters.
///
/// Sentinel samples are dropped. The y axis is flipped so that up is positive in the
/// persisted cloud. Points keep the traversal order of `aligned`.
pub fn assemble(aligned: &AlignedStream) -> PointCloud {
    let points: Vec<Point> = aligned
        .iter()
        .flat_map(|entry| {
            let z = entry.position_mm / POSITION_SCALE;
            entry
                .line
                .valid_points()
                .map(move |p| Point::new(p.x / PLANAR_SCALE, -p.y / PLANAR_SCALE, z))
        })
        .collect();

    log::debug!(
        "assembled {} points from {} samples",
        points.len(),
        aligned.sample_count()
    );

    PointCloud::new(points)
}

#[cfg(test)]
mod tests {
    use pcd_core::scan::{AlignedLine, PlanarPoint, ScanLine, Scanner};

    use super::*;

    fn entry(scanner: Scanner, position_mm: f64, points: Vec<PlanarPoint>) -> AlignedLine {
        AlignedLine {
            scanner,
            line: ScanLine::new(points),
            position_mm,
        }
    }

    #[test]
    fn converts_units_and_flips_y() {
        let aligned = AlignedStream::new(vec![entry(
            Scanner::A,
            2500.0,
            vec![PlanarPoint::new(-1_500_000.0, 250_000.0)],
        )]);

        let cloud = assemble(&aligned);
        assert_eq!(cloud.points, vec![Point::new(-1.5, -0.25, 2.5)]);
    }

    #[test]
    fn drops_sentinels_only() {
        let aligned = AlignedStream::new(vec![
            entry(
                Scanner::A,
                0.0,
                vec![
                    PlanarPoint::SENTINEL,
                    PlanarPoint::new(0.0, 1_000_000.0),
                    PlanarPoint::new(2_000_000.0, 0.0),
                ],
            ),
            entry(Scanner::B, 0.0, vec![PlanarPoint::SENTINEL; 3]),
        ]);

        let cloud = assemble(&aligned);
        assert_eq!(cloud.len(), 2);
        assert!(cloud.points.iter().all(|p| !(p.x == 0.0 && p.y == 0.0)));
        assert!(cloud.len() <= aligned.sample_count());
    }

    #[test]
    fn keeps_traversal_order() {
        let aligned = AlignedStream::new(vec![
            entry(Scanner::A, 0.0, vec![PlanarPoint::new(1e6, 0.0)]),
            entry(Scanner::B, 0.0, vec![PlanarPoint::new(2e6, 0.0)]),
            entry(Scanner::A, 1000.0, vec![PlanarPoint::new(3e6, 0.0)]),
        ]);

        let xs: Vec<f64> = assemble(&aligned).iter().map(|(x, _, _, _)| x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn all_sentinel_input_gives_empty_cloud() {
        let aligned = AlignedStream::new(vec![
            entry(Scanner::A, 0.0, vec![PlanarPoint::SENTINEL; 2]),
            entry(Scanner::B, 10_000.0, vec![PlanarPoint::SENTINEL; 2]),
        ]);
        assert!(assemble(&aligned).is_empty());
        assert!(assemble(&AlignedStream::default()).is_empty());
    }
}
