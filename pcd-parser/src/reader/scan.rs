use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use pcd_core::{scan::RawScanTable, ReconstructionError};

use super::ScanRowReader;

/// Reads a whitespace-delimited distance table, one scan line per text line.
///
/// Blank lines and lines starting with `#` are skipped. Every row must have the
/// same number of samples as the first one.
pub struct TextScanReader<R> {
    path: PathBuf,
    lines: io::Lines<R>,
    line_number: usize,
    columns: Option<usize>,
}

impl TextScanReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReconstructionError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ReconstructionError::MissingFile(path.to_path_buf()),
            _ => ReconstructionError::Io(e),
        })?;

        Ok(Self::new(path, BufReader::new(file)))
    }
}

impl<R: BufRead> TextScanReader<R> {
    pub fn new(path: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            path: path.into(),
            lines: reader.lines(),
            line_number: 0,
            columns: None,
        }
    }

    fn parse_row(&mut self, text: &str) -> Result<Vec<f64>, ReconstructionError> {
        let mut row = Vec::new();
        for token in text.split_whitespace() {
            let distance: f64 = token.parse().map_err(|e| {
                ReconstructionError::input_format(
                    &self.path,
                    self.line_number,
                    format!("Failed to parse distance '{}': {}", token, e),
                )
            })?;
            if !distance.is_finite() || distance < 0.0 {
                return Err(ReconstructionError::input_format(
                    &self.path,
                    self.line_number,
                    format!("Distance must be a non-negative number, got '{}'", token),
                ));
            }
            row.push(distance);
        }

        match self.columns {
            Some(columns) if columns != row.len() => {
                return Err(ReconstructionError::input_format(
                    &self.path,
                    self.line_number,
                    format!("Expected {} samples, found {}", columns, row.len()),
                ));
            }
            Some(_) => {}
            None => self.columns = Some(row.len()),
        }

        Ok(row)
    }
}

impl<R: BufRead> ScanRowReader for TextScanReader<R> {
    fn next_row(&mut self) -> Result<Option<Vec<f64>>, ReconstructionError> {
        loop {
            let Some(line) = self.lines.next() else {
                return Ok(None);
            };
            let line = line?;
            self.line_number += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            return self.parse_row(trimmed).map(Some);
        }
    }
}

pub fn read_rows(reader: &mut dyn ScanRowReader) -> Result<RawScanTable, ReconstructionError> {
    let mut rows = Vec::new();
    while let Some(row) = reader.next_row()? {
        rows.push(row);
    }
    Ok(RawScanTable::new(rows))
}

pub fn read_scan_table(path: impl AsRef<Path>) -> Result<RawScanTable, ReconstructionError> {
    let path = path.as_ref();
    let mut reader = TextScanReader::open(path)?;
    let table = read_rows(&mut reader)?;
    log::debug!(
        "read {} scan lines ({} samples, max distance {}) from {:?}",
        table.len(),
        table.sample_count(),
        table.max_distance(),
        path
    );
    Ok(table)
}
