//! The long-lived predictor object and its load-or-train state machine.

use crate::config::PredictorConfig;
use crate::error::{ArtifactError, PredictError, TrainError};
use crate::model::{Prediction, TrainedModel};
use crate::trainer::{TrainReport, Trainer};
use serde::Serialize;
use std::sync::{
    Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError,
};

/// Lifecycle of the in-memory model.
///
/// `Uninitialized` and `Failed` move to `Loaded` when persisted artifacts
/// decode, otherwise to `Trained` when training succeeds, otherwise to
/// `Failed`. That chain is the only retry there is.
#[derive(Debug, Clone)]
pub enum ModelState {
    Uninitialized,
    Loaded(Arc<TrainedModel>),
    Trained(Arc<TrainedModel>),
    Failed(String),
}

/// Serializable tag of a [`ModelState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    Uninitialized,
    Loaded,
    Trained,
    Failed,
}

impl ModelStatus {
    /// Same spelling as the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelStatus::Uninitialized => "uninitialized",
            ModelStatus::Loaded => "loaded",
            ModelStatus::Trained => "trained",
            ModelStatus::Failed => "failed",
        }
    }
}

impl ModelState {
    pub fn model(&self) -> Option<&Arc<TrainedModel>> {
        match self {
            ModelState::Loaded(m) | ModelState::Trained(m) => Some(m),
            ModelState::Uninitialized | ModelState::Failed(_) => None,
        }
    }

    pub fn status(&self) -> ModelStatus {
        match self {
            ModelState::Uninitialized => ModelStatus::Uninitialized,
            ModelState::Loaded(_) => ModelStatus::Loaded,
            ModelState::Trained(_) => ModelStatus::Trained,
            ModelState::Failed(_) => ModelStatus::Failed,
        }
    }
}

/// Symptom-to-disease predictor.
///
/// Construct once per process and share it. The model inside is immutable;
/// [`DiseasePredictor::retrain`] swaps in a new one wholesale.
///
/// Loading and training are serialized on their own mutex. The state lock is
/// only taken to read or swap the state, never across a training run.
#[derive(Debug)]
pub struct DiseasePredictor {
    config: PredictorConfig,
    state: RwLock<ModelState>,
    build: Mutex<()>,
}

impl DiseasePredictor {
    pub fn new(config: PredictorConfig) -> Self {
        Self {
            config,
            state: RwLock::new(ModelState::Uninitialized),
            build: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn status(&self) -> ModelStatus {
        self.read_state().status()
    }

    /// Like [`DiseasePredictor::status`] but never waits. `None` when the
    /// state is being swapped right now.
    pub fn try_status(&self) -> Option<ModelStatus> {
        match self.state.try_read() {
            Ok(state) => Some(state.status()),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner().status()),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    /// A load or training run is in progress.
    pub fn is_training(&self) -> bool {
        matches!(self.build.try_lock(), Err(TryLockError::WouldBlock))
    }

    /// The current model, if one is loaded or trained.
    pub fn model(&self) -> Option<Arc<TrainedModel>> {
        self.read_state().model().cloned()
    }

    /// Run the load-or-train chain now instead of on the first prediction.
    pub fn initialize(&self) -> Result<Arc<TrainedModel>, PredictError> {
        self.ensure_ready()
    }

    /// Load persisted artifacts into memory. Returns `false` when they are
    /// missing or unusable; the current state is kept in that case.
    pub fn load_model(&self) -> bool {
        let _build = self.lock_build();
        match TrainedModel::load(&self.config) {
            Ok(model) => {
                *self.write_state() = ModelState::Loaded(Arc::new(model));
                true
            }
            Err(err) => {
                log_load_failure(&err);
                false
            }
        }
    }

    /// Train from the dataset and replace the in-memory model. Returns
    /// `false` (after logging) when training fails.
    pub fn train_model(&self) -> bool {
        match self.retrain() {
            Ok(_) => true,
            Err(err) => {
                tracing::error!(error = %err, "error during training");
                false
            }
        }
    }

    /// Train, persist and swap in a fresh model.
    ///
    /// On failure the previous model, if any, stays in place.
    pub fn retrain(&self) -> Result<TrainReport, TrainError> {
        let _build = self.lock_build();
        let (model, report) = Trainer::new(&self.config).train()?;
        *self.write_state() = ModelState::Trained(Arc::new(model));
        Ok(report)
    }

    /// Predict a disease for free-form symptom strings.
    ///
    /// Initializes the model on first use. See [`TrainedModel::predict`] for
    /// matching rules.
    pub fn predict<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<Prediction, PredictError> {
        let model = self.ensure_ready()?;
        model.predict(symptoms)
    }

    fn ensure_ready(&self) -> Result<Arc<TrainedModel>, PredictError> {
        if let Some(model) = self.model() {
            return Ok(model);
        }

        let _build = self.lock_build();
        // Another caller may have finished while this one waited.
        if let Some(model) = self.model() {
            return Ok(model);
        }

        let next = match TrainedModel::load(&self.config) {
            Ok(model) => {
                tracing::info!(path = %self.config.model_path.display(), "model loaded");
                ModelState::Loaded(Arc::new(model))
            }
            Err(err) => {
                log_load_failure(&err);
                tracing::info!("model not loaded, attempting to train");
                match Trainer::new(&self.config).train() {
                    Ok((model, _)) => ModelState::Trained(Arc::new(model)),
                    Err(err) => {
                        tracing::error!(error = %err, "model could not be trained or loaded");
                        ModelState::Failed(err.to_string())
                    }
                }
            }
        };

        let model = next.model().cloned();
        *self.write_state() = next;
        model.ok_or(PredictError::ModelUnavailable)
    }

    fn lock_build(&self) -> MutexGuard<'_, ()> {
        self.build
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ModelState> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ModelState> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn log_load_failure(err: &ArtifactError) {
    match err {
        ArtifactError::Missing { path } => {
            tracing::info!(path = %path.display(), "no persisted model found");
        }
        other => tracing::warn!(error = %other, "error loading model (will retrain)"),
    }
}
