//! Symptom-to-disease prediction.
//!
//! This crate turns the synthetic dataset into a persisted random forest and
//! answers free-text symptom queries against it.
//!
//! ## Pieces
//!
//! - [`FeatureSchema`]: the ordered symptom columns the model was trained
//!   on. Persisted next to the model so inference rebuilds the exact same
//!   feature order.
//! - [`Trainer`]: 80/20 seeded split, forest fit, holdout accuracy report,
//!   artifact persistence.
//! - [`DiseasePredictor`]: the process-wide service object. It owns the
//!   model behind an explicit [`ModelState`] machine (load, else train, else
//!   fail) and ranks diseases for a symptom list.
//! - [`inspect_artifacts`]: diagnostic view of what is on disk.
//!
//! ## Matching policy
//!
//! Inputs are trimmed, lowercased and have spaces turned into underscores.
//! If that form is not a column, the raw string is tried. Anything else is
//! dropped without error; the prediction reports which symptoms matched.
//!
//! ```no_run
//! use predictor::{DiseasePredictor, PredictorConfig};
//!
//! let predictor = DiseasePredictor::new(PredictorConfig::default());
//! let result = predictor.predict(&["fever", "cough", "headache"]).unwrap();
//! println!("{} ({:.2})", result.prediction, result.confidence);
//! ```

mod artifact;
mod config;
mod error;
mod inspect;
mod model;
mod schema;
mod service;
mod trainer;

pub use crate::artifact::{ModelArtifact, SchemaArtifact, ARTIFACT_FORMAT_VERSION};
pub use crate::config::{PredictorConfig, DATASET_FILE, MODEL_FILE, SCHEMA_FILE};
pub use crate::error::{ArtifactError, PredictError, TrainError};
pub use crate::inspect::{
    inspect_artifacts, ArtifactCheck, InspectionReport, ModelSummary, SchemaSummary,
};
pub use crate::model::{
    Prediction, RankedDisease, TrainedModel, NO_MATCH_WARNING, TOP_K, UNKNOWN_DISEASE,
};
pub use crate::schema::{normalize_symptom, EncodedSymptoms, FeatureSchema};
pub use crate::service::{DiseasePredictor, ModelState, ModelStatus};
pub use crate::trainer::{TrainReport, Trainer};
