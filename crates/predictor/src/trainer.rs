use crate::config::PredictorConfig;
use crate::error::TrainError;
use crate::model::TrainedModel;
use crate::schema::FeatureSchema;
use dataset::{Dataset, DatasetError};
use forest::{accuracy, train_test_split, Matrix, RandomForestClassifier};
use serde::Serialize;
use std::collections::HashMap;

/// Summary of a finished training run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainReport {
    pub n_train: usize,
    pub n_test: usize,
    pub n_features: usize,
    pub classes: Vec<String>,
    /// Holdout accuracy. Reported, never enforced.
    pub accuracy: f32,
}

/// Reads the dataset, fits the forest, reports holdout accuracy and persists
/// the result.
pub struct Trainer<'a> {
    config: &'a PredictorConfig,
}

impl<'a> Trainer<'a> {
    pub fn new(config: &'a PredictorConfig) -> Self {
        Self { config }
    }

    /// Train and persist. Overwrites any previous artifacts.
    pub fn train(&self) -> Result<(TrainedModel, TrainReport), TrainError> {
        let cfg = self.config;
        cfg.validate()?;
        tracing::info!(dataset = %cfg.dataset_path.display(), "training model");

        let dataset = Dataset::read_csv(&cfg.dataset_path).map_err(|e| match e {
            DatasetError::NotFound { path } => TrainError::DatasetMissing { path },
            other => TrainError::Dataset(other),
        })?;
        if dataset.is_empty() {
            return Err(TrainError::EmptyDataset);
        }

        let classes = dataset.labels();
        let class_index: HashMap<&str, usize> = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let n_features = dataset.n_features();
        let data: Vec<f32> = dataset
            .samples
            .iter()
            .flat_map(|s| s.features.iter().map(|&v| f32::from(v)))
            .collect();
        let x = Matrix::from_vec(dataset.len(), n_features, data)?;
        let y: Vec<usize> = dataset
            .samples
            .iter()
            .map(|s| class_index[s.label.as_str()])
            .collect();

        let (train_idx, test_idx) =
            train_test_split(dataset.len(), cfg.test_fraction, cfg.random_state)?;
        let x_train = x.select_rows(&train_idx);
        let y_train: Vec<usize> = train_idx.iter().map(|&i| y[i]).collect();
        let x_test = x.select_rows(&test_idx);
        let y_test: Vec<usize> = test_idx.iter().map(|&i| y[i]).collect();

        let mut forest =
            RandomForestClassifier::new(cfg.n_estimators).with_random_state(cfg.random_state);
        if let Some(depth) = cfg.max_depth {
            forest = forest.with_max_depth(depth);
        }
        forest.fit(&x_train, &y_train)?;

        let predictions = forest.predict(&x_test)?;
        let holdout = accuracy(&y_test, &predictions);
        tracing::info!(
            accuracy = %format!("{holdout:.4}"),
            train_rows = train_idx.len(),
            test_rows = test_idx.len(),
            "model trained"
        );

        let model = TrainedModel::new(
            forest,
            FeatureSchema::new(dataset.columns.clone()),
            classes.clone(),
            Some(holdout),
        );
        model.save(cfg)?;

        let report = TrainReport {
            n_train: train_idx.len(),
            n_test: test_idx.len(),
            n_features,
            classes,
            accuracy: holdout,
        };
        Ok((model, report))
    }
}
