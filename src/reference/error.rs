use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("Failed to read reference file '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Reference file '{path}' has no header row")]
    MissingHeader { path: PathBuf },

    #[error("Row at line {line} of '{path}' has {found} fields, header has {expected}")]
    Parse {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Malformed CSV data in '{0}'")]
    Csv(PathBuf, #[source] csv::Error),

    #[error("Required column '{column}' not found in '{path}'")]
    MissingColumn { path: PathBuf, column: String },
}
