use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while generating, writing or reading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),
    #[error("no disease profiles supplied")]
    NoProfiles,
    #[error("dataset file not found at {}", path.display())]
    NotFound { path: PathBuf },
    #[error("dataset must contain '{column}' column")]
    MissingLabelColumn { column: String },
    #[error("dataset file is empty")]
    Empty,
    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: column '{column}' has non-numeric value '{value}'")]
    InvalidCell {
        line: usize,
        column: String,
        value: String,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
