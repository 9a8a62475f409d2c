use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconstructionError {
    #[error("Input file is missing: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to parse {path} (line {line}): {message}")]
    InputFormat {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Cannot compute extents of an empty point cloud")]
    EmptyCloud,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReconstructionError {
    pub fn input_format(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::InputFormat {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}
