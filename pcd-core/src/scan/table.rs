/// Raw distance samples of one scanner, one row per scan line.
///
/// Each row holds one sample per angular step; `0.0` means the scanner got no return.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawScanTable {
    rows: Vec<Vec<f64>>,
}

impl RawScanTable {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn sample_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn max_distance(&self) -> f64 {
        self.rows
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }
}
