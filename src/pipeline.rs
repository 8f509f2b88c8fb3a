use dataset::{default_profiles, generate, Dataset, DatasetError, GeneratorConfig};
use predictor::{DiseasePredictor, PredictError, Prediction};
use serde::Serialize;
use std::path::Path;

/// Symptoms used by the default command to check a model end to end.
pub const SELF_TEST_SYMPTOMS: [&str; 3] = ["fever", "cough", "headache"];

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("dataset generation failed: {0}")]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Predict(#[from] PredictError),
}

/// Generate the default disease profiles and write them to `path`.
pub fn generate_dataset(path: &Path, config: &GeneratorConfig) -> Result<Dataset, PipelineError> {
    let dataset = generate(&default_profiles(), config)?;
    dataset.write_csv(path)?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.len(),
        features = dataset.n_features(),
        "dataset generated"
    );
    Ok(dataset)
}

#[derive(Debug, Clone, Serialize)]
pub struct SelfTest {
    pub symptoms: Vec<String>,
    pub result: Prediction,
}

/// Make sure a model is available, then predict [`SELF_TEST_SYMPTOMS`].
pub fn run_self_test(predictor: &DiseasePredictor) -> Result<SelfTest, PipelineError> {
    predictor.initialize()?;
    let result = predictor.predict(&SELF_TEST_SYMPTOMS)?;
    Ok(SelfTest {
        symptoms: SELF_TEST_SYMPTOMS.iter().map(|s| s.to_string()).collect(),
        result,
    })
}
