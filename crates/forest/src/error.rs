use thiserror::Error;

/// Errors raised while fitting or querying a classifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForestError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("matrix of {rows}x{cols} needs {expected} values, got {found}")]
    InvalidMatrix {
        rows: usize,
        cols: usize,
        expected: usize,
        found: usize,
    },
    #[error("cannot fit with zero samples")]
    EmptyInput,
    #[error("feature matrix has {rows} rows but {labels} labels were given")]
    ShapeMismatch { rows: usize, labels: usize },
    #[error("model was trained with {expected} features but input has {found}")]
    FeatureMismatch { expected: usize, found: usize },
    #[error("model not fitted yet")]
    NotFitted,
}
