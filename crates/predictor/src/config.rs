use crate::error::TrainError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DATASET_FILE: &str = "disease_dataset.csv";
pub const MODEL_FILE: &str = "disease_model.bin";
pub const SCHEMA_FILE: &str = "model_columns.bin";

/// Where the predictor finds its inputs and artifacts, and how it trains.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictorConfig {
    /// CSV dataset read by the trainer.
    pub dataset_path: PathBuf,
    /// Persisted random forest.
    pub model_path: PathBuf,
    /// Persisted feature schema (training column order).
    pub schema_path: PathBuf,
    /// Trees in the forest.
    pub n_estimators: usize,
    /// Holdout share for the accuracy report.
    pub test_fraction: f64,
    /// Seed for the split and the forest.
    pub random_state: u64,
    /// Optional depth cap per tree; `None` grows trees until leaves are pure.
    pub max_depth: Option<usize>,
}

impl PredictorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard file names under a data directory and a model directory.
    pub fn from_dirs(data_dir: impl AsRef<Path>, model_dir: impl AsRef<Path>) -> Self {
        Self {
            dataset_path: data_dir.as_ref().join(DATASET_FILE),
            model_path: model_dir.as_ref().join(MODEL_FILE),
            schema_path: model_dir.as_ref().join(SCHEMA_FILE),
            ..Self::default()
        }
    }

    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = path.into();
        self
    }

    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn validate(&self) -> Result<(), TrainError> {
        if self.n_estimators == 0 {
            return Err(TrainError::InvalidConfig(
                "n_estimators must be at least 1".into(),
            ));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(TrainError::InvalidConfig(format!(
                "test_fraction must be within (0, 1), got {}",
                self.test_fraction
            )));
        }
        if self.model_path == self.schema_path {
            return Err(TrainError::InvalidConfig(
                "model_path and schema_path must differ".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data").join(DATASET_FILE),
            model_path: PathBuf::from("model").join(MODEL_FILE),
            schema_path: PathBuf::from("model").join(SCHEMA_FILE),
            n_estimators: 100,
            test_fraction: 0.2,
            random_state: 42,
            max_depth: None,
        }
    }
}
