//! Diagnostic inspection of persisted artifacts.
//!
//! Each file is checked against the known format version before anything
//! else is decoded, and the model and schema are cross-checked for feature
//! count agreement.

use crate::artifact::{
    peek_format_version, read_bytes, ModelArtifact, SchemaArtifact, ARTIFACT_FORMAT_VERSION,
};
use crate::config::PredictorConfig;
use crate::error::ArtifactError;
use bincode::config::standard;
use bincode::serde::decode_from_slice;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArtifactCheck<T> {
    Missing,
    Unreadable { reason: String },
    UnsupportedVersion { found: u16, expected: u16 },
    Valid(T),
}

impl<T> ArtifactCheck<T> {
    pub fn valid(&self) -> Option<&T> {
        match self {
            ArtifactCheck::Valid(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub format_version: u16,
    pub n_features: usize,
    pub classes: Vec<String>,
    pub n_trees: usize,
    pub holdout_accuracy: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaSummary {
    pub format_version: u16,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionReport {
    pub model_path: PathBuf,
    pub schema_path: PathBuf,
    pub model: ArtifactCheck<ModelSummary>,
    pub schema: ArtifactCheck<SchemaSummary>,
    /// Both artifacts are valid and agree on the feature count.
    pub compatible: bool,
}

/// Inspect the artifacts named by `config` without loading them into a
/// predictor.
pub fn inspect_artifacts(config: &PredictorConfig) -> InspectionReport {
    let model = check::<ModelArtifact, _>(&config.model_path, |m| ModelSummary {
        format_version: m.format_version,
        n_features: m.n_features,
        n_trees: m.forest.n_trees(),
        holdout_accuracy: m.holdout_accuracy,
        classes: m.classes,
    });
    let schema = check::<SchemaArtifact, _>(&config.schema_path, |s| SchemaSummary {
        format_version: s.format_version,
        columns: s.columns,
    });

    let compatible = match (model.valid(), schema.valid()) {
        (Some(m), Some(s)) => m.n_features == s.columns.len(),
        _ => false,
    };

    InspectionReport {
        model_path: config.model_path.clone(),
        schema_path: config.schema_path.clone(),
        model,
        schema,
        compatible,
    }
}

fn check<A, T>(path: &Path, summarize: impl FnOnce(A) -> T) -> ArtifactCheck<T>
where
    A: DeserializeOwned,
{
    let bytes = match read_bytes(path) {
        Ok(bytes) => bytes,
        Err(ArtifactError::Missing { .. }) => return ArtifactCheck::Missing,
        Err(err) => {
            return ArtifactCheck::Unreadable {
                reason: err.to_string(),
            }
        }
    };

    match peek_format_version(path, &bytes) {
        Ok(ARTIFACT_FORMAT_VERSION) => {}
        Ok(found) => {
            return ArtifactCheck::UnsupportedVersion {
                found,
                expected: ARTIFACT_FORMAT_VERSION,
            }
        }
        Err(err) => {
            return ArtifactCheck::Unreadable {
                reason: err.to_string(),
            }
        }
    }

    match decode_from_slice::<A, _>(&bytes, standard()) {
        Ok((artifact, _)) => ArtifactCheck::Valid(summarize(artifact)),
        Err(err) => ArtifactCheck::Unreadable {
            reason: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::write_artifact;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn empty_directory_reports_missing() {
        let dir = tempdir().unwrap();
        let report = inspect_artifacts(&PredictorConfig::from_dirs(dir.path(), dir.path()));
        assert_eq!(report.model, ArtifactCheck::Missing);
        assert_eq!(report.schema, ArtifactCheck::Missing);
        assert!(!report.compatible);
    }

    #[test]
    fn schema_version_is_checked() {
        let dir = tempdir().unwrap();
        let cfg = PredictorConfig::from_dirs(dir.path(), dir.path());
        write_artifact(
            &cfg.schema_path,
            &SchemaArtifact {
                format_version: 7,
                columns: vec![],
            },
        )
        .unwrap();

        let report = inspect_artifacts(&cfg);
        assert_eq!(
            report.schema,
            ArtifactCheck::UnsupportedVersion {
                found: 7,
                expected: ARTIFACT_FORMAT_VERSION
            }
        );
    }

    #[test]
    fn corrupt_model_is_unreadable() {
        let dir = tempdir().unwrap();
        let cfg = PredictorConfig::from_dirs(dir.path(), dir.path());
        fs::write(&cfg.model_path, [1u8, 3, 0xFF]).unwrap();

        let report = inspect_artifacts(&cfg);
        assert!(matches!(report.model, ArtifactCheck::Unreadable { .. }));
    }

    #[test]
    fn report_serializes_with_status_tags() {
        let dir = tempdir().unwrap();
        let report = inspect_artifacts(&PredictorConfig::from_dirs(dir.path(), dir.path()));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["model"]["status"], "missing");
        assert_eq!(json["compatible"], false);
    }
}
