use dataset::DatasetError;
use forest::ForestError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing persisted model/schema artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found at {}", path.display())]
    Missing { path: PathBuf },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode artifact: {0}")]
    Encode(String),
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("{} has format version {found}, expected {expected}", path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u16,
        expected: u16,
    },
    #[error("model and schema disagree: {0}")]
    Incompatible(String),
}

/// Failures while training a model.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("invalid predictor configuration: {0}")]
    InvalidConfig(String),
    #[error("dataset not found at {}; generate it first", path.display())]
    DatasetMissing { path: PathBuf },
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),
    #[error("dataset has no rows")]
    EmptyDataset,
    #[error("classifier error: {0}")]
    Forest(#[from] ForestError),
    #[error("artifact error: {0}")]
    Artifact(#[from] ArtifactError),
}

/// Failures surfaced by [`crate::DiseasePredictor::predict`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PredictError {
    #[error("Model could not be trained or loaded.")]
    ModelUnavailable,
    #[error("{0}")]
    Inference(String),
}
