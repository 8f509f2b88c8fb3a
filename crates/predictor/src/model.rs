use crate::artifact::{
    read_artifact, stage_artifact, ModelArtifact, SchemaArtifact, ARTIFACT_FORMAT_VERSION,
};
use crate::config::PredictorConfig;
use crate::error::{ArtifactError, PredictError};
use crate::schema::FeatureSchema;
use forest::{Matrix, RandomForestClassifier};
use serde::{Deserialize, Serialize};

/// How many ranked diseases a prediction carries at most.
pub const TOP_K: usize = 3;

/// Returned when no input symptom is known to the schema.
pub const NO_MATCH_WARNING: &str = "No matching symptoms found in the model database.";

pub const UNKNOWN_DISEASE: &str = "Unknown";

/// One entry of the ranked prediction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDisease {
    pub disease: String,
    pub probability: f32,
}

/// Outcome of a prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction: String,
    /// Probability of the top-ranked class.
    pub confidence: f32,
    /// Up to three classes with non-zero probability, most probable first.
    pub top_predictions: Vec<RankedDisease>,
    /// Schema columns the input switched on.
    pub matched_symptoms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl Prediction {
    /// Result for input that matched nothing in the schema.
    pub fn unknown() -> Self {
        Self {
            prediction: UNKNOWN_DISEASE.to_string(),
            confidence: 0.0,
            top_predictions: Vec::new(),
            matched_symptoms: Vec::new(),
            warning: Some(NO_MATCH_WARNING.to_string()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.prediction == UNKNOWN_DISEASE && self.top_predictions.is_empty()
    }
}

/// A fitted forest together with the schema and class names it needs.
///
/// Immutable once built; shared between requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    forest: RandomForestClassifier,
    schema: FeatureSchema,
    classes: Vec<String>,
    holdout_accuracy: Option<f32>,
}

impl TrainedModel {
    pub fn new(
        forest: RandomForestClassifier,
        schema: FeatureSchema,
        classes: Vec<String>,
        holdout_accuracy: Option<f32>,
    ) -> Self {
        Self {
            forest,
            schema,
            classes,
            holdout_accuracy,
        }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn forest(&self) -> &RandomForestClassifier {
        &self.forest
    }

    pub fn holdout_accuracy(&self) -> Option<f32> {
        self.holdout_accuracy
    }

    /// Persist the model and the schema as two artifacts.
    ///
    /// Both are encoded and staged before either is moved into place, so a
    /// failure while writing leaves the previous pair untouched.
    pub fn save(&self, config: &PredictorConfig) -> Result<(), ArtifactError> {
        let model = ModelArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            classes: self.classes.clone(),
            n_features: self.schema.len(),
            holdout_accuracy: self.holdout_accuracy,
            forest: self.forest.clone(),
        };
        let schema = SchemaArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            columns: self.schema.columns().to_vec(),
        };

        let staged_model = stage_artifact(&config.model_path, &model)?;
        let staged_schema = stage_artifact(&config.schema_path, &schema)?;
        staged_model.commit()?;
        staged_schema.commit()?;
        tracing::info!(path = %config.model_path.display(), "model saved");
        tracing::info!(path = %config.schema_path.display(), "columns saved");
        Ok(())
    }

    /// Load both artifacts and check that they describe the same feature
    /// space.
    pub fn load(config: &PredictorConfig) -> Result<Self, ArtifactError> {
        let model: ModelArtifact = read_artifact(&config.model_path)?;
        let schema: SchemaArtifact = read_artifact(&config.schema_path)?;

        if schema.columns.len() != model.n_features {
            return Err(ArtifactError::Incompatible(format!(
                "schema has {} columns but model expects {} features",
                schema.columns.len(),
                model.n_features
            )));
        }
        if model.forest.n_features() != Some(model.n_features) {
            return Err(ArtifactError::Incompatible(format!(
                "forest was fitted on {:?} features, artifact declares {}",
                model.forest.n_features(),
                model.n_features
            )));
        }
        if let Some(n_classes) = model.forest.n_classes() {
            if n_classes > model.classes.len() {
                return Err(ArtifactError::Incompatible(format!(
                    "forest knows {n_classes} classes but only {} names were stored",
                    model.classes.len()
                )));
            }
        }

        Ok(Self::new(
            model.forest,
            FeatureSchema::new(schema.columns),
            model.classes,
            model.holdout_accuracy,
        ))
    }

    /// Rank diseases for a free-form symptom list.
    ///
    /// Non-empty input that matches no schema column yields
    /// [`Prediction::unknown`] without consulting the forest.
    pub fn predict<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<Prediction, PredictError> {
        let encoded = self.schema.encode(symptoms);
        tracing::debug!(
            inputs = symptoms.len(),
            matched = encoded.matched.len(),
            "symptoms encoded"
        );

        if encoded.matched.is_empty() && !symptoms.is_empty() {
            return Ok(Prediction::unknown());
        }

        let row = Matrix::from_vec(1, encoded.vector.len(), encoded.vector)
            .map_err(|e| PredictError::Inference(e.to_string()))?;
        let proba = self
            .forest
            .predict_proba(&row)
            .map_err(|e| PredictError::Inference(e.to_string()))?;

        let mut ranked: Vec<(usize, f32)> = proba.row(0).iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let &(top_class, confidence) = ranked
            .first()
            .ok_or_else(|| PredictError::Inference("model produced no classes".into()))?;
        let label = |class: usize| {
            self.classes.get(class).cloned().ok_or_else(|| {
                PredictError::Inference(format!("class index {class} has no name"))
            })
        };

        let top_predictions = ranked
            .iter()
            .take(TOP_K)
            .filter(|(_, p)| *p > 0.0)
            .map(|&(class, probability)| {
                Ok(RankedDisease {
                    disease: label(class)?,
                    probability,
                })
            })
            .collect::<Result<Vec<_>, PredictError>>()?;

        Ok(Prediction {
            prediction: label(top_class)?,
            confidence,
            top_predictions,
            matched_symptoms: encoded.matched,
            warning: None,
        })
    }
}
