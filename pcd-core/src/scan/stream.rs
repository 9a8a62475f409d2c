/// Which of the two fixed scanners produced a scan line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scanner {
    /// First scanner (`LIDAR0`), at the origin of the vehicle frame.
    A,
    /// Second scanner (`LIDAR1`), offset across the lane.
    B,
}

/// Planar position of one sample in the scanner plane, in millimeters.
///
/// `(0, 0)` is the sentinel for a sample with no return. A genuine hit at the
/// scanner origin is indistinguishable from it and is dropped as well.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub const SENTINEL: PlanarPoint = PlanarPoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_sentinel(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// One decoded scan line, index-aligned with the raw samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanLine {
    pub points: Vec<PlanarPoint>,
}

impl ScanLine {
    pub fn new(points: Vec<PlanarPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn valid_points(&self) -> impl Iterator<Item = &PlanarPoint> {
        self.points.iter().filter(|p| !p.is_sentinel())
    }
}

/// All scan lines of one scanner over a vehicle pass, in acquisition order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedStream {
    pub lines: Vec<ScanLine>,
}

impl DecodedStream {
    pub fn new(lines: Vec<ScanLine>) -> Self {
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlignedLine {
    pub scanner: Scanner,
    pub line: ScanLine,
    /// Position along the travel axis, in millimeters.
    pub position_mm: f64,
}

/// Scan lines of both scanners merged into one sequence with travel-axis positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedStream {
    pub lines: Vec<AlignedLine>,
}

impl AlignedStream {
    pub fn new(lines: Vec<AlignedLine>) -> Self {
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn sample_count(&self) -> usize {
        self.lines.iter().map(|l| l.line.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlignedLine> {
        self.lines.iter()
    }
}
