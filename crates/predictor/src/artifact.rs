//! On-disk model and schema artifacts.
//!
//! Both files are bincode (serde mode) payloads whose first field is a
//! format version. Readers check that version before decoding the rest, so
//! a file written by an incompatible build is reported as such instead of as
//! garbage.

use crate::error::ArtifactError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use forest::RandomForestClassifier;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Bump whenever the layout of [`ModelArtifact`] or [`SchemaArtifact`]
/// changes.
pub const ARTIFACT_FORMAT_VERSION: u16 = 1;

/// Persisted classifier and its output classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u16,
    /// Class names indexed by the forest's class indices.
    pub classes: Vec<String>,
    pub n_features: usize,
    pub holdout_accuracy: Option<f32>,
    pub forest: RandomForestClassifier,
}

/// Persisted training column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaArtifact {
    pub format_version: u16,
    pub columns: Vec<String>,
}

/// An encoded artifact sitting in a temporary file next to its target.
///
/// Nothing is visible at the target path until [`StagedArtifact::commit`].
/// Dropping it uncommitted removes the temporary file.
#[derive(Debug)]
pub struct StagedArtifact {
    temp: NamedTempFile,
    path: PathBuf,
}

impl StagedArtifact {
    /// Rename the staged file over the target.
    pub fn commit(self) -> Result<(), ArtifactError> {
        let path = self.path;
        self.temp
            .persist(&path)
            .map(|_| ())
            .map_err(|e| ArtifactError::Io {
                path,
                source: e.error,
            })
    }
}

/// Encode `value` into a temporary file in the directory of `path`.
pub fn stage_artifact<T: Serialize>(
    path: &Path,
    value: &T,
) -> Result<StagedArtifact, ArtifactError> {
    let io_err = |source: std::io::Error| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    };

    let bytes =
        encode_to_vec(value, standard()).map_err(|e| ArtifactError::Encode(e.to_string()))?;

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(io_err)?;

    let mut temp = NamedTempFile::new_in(parent).map_err(io_err)?;
    temp.write_all(&bytes).map_err(io_err)?;
    temp.flush().map_err(io_err)?;
    Ok(StagedArtifact {
        temp,
        path: path.to_path_buf(),
    })
}

/// Encode `value` and move it into place at `path`.
#[cfg(test)]
pub fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    stage_artifact(path, value)?.commit()
}

/// Read the raw bytes of an artifact, mapping a missing file to
/// [`ArtifactError::Missing`].
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ArtifactError::Missing {
            path: path.to_path_buf(),
        },
        _ => ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Format version stored at the head of an artifact.
pub fn peek_format_version(path: &Path, bytes: &[u8]) -> Result<u16, ArtifactError> {
    decode_from_slice::<u16, _>(bytes, standard())
        .map(|(version, _)| version)
        .map_err(|e| ArtifactError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Decode an artifact after checking its format version.
pub fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = read_bytes(path)?;
    let found = peek_format_version(path, &bytes)?;
    if found != ARTIFACT_FORMAT_VERSION {
        return Err(ArtifactError::UnsupportedVersion {
            path: path.to_path_buf(),
            found,
            expected: ARTIFACT_FORMAT_VERSION,
        });
    }
    decode_from_slice(&bytes, standard())
        .map(|(value, _)| value)
        .map_err(|e| ArtifactError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn schema_artifact_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sub").join("cols.bin");
        let artifact = SchemaArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            columns: vec!["b".into(), "a".into()],
        };
        write_artifact(&path, &artifact).unwrap();

        let back: SchemaArtifact = read_artifact(&path).unwrap();
        assert_eq!(back, artifact);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let err = read_artifact::<SchemaArtifact>(&dir.path().join("nope.bin")).unwrap_err();
        assert!(matches!(err, ArtifactError::Missing { .. }));
    }

    #[test]
    fn foreign_version_is_rejected_before_decoding() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cols.bin");
        let artifact = SchemaArtifact {
            format_version: 99,
            columns: vec!["a".into()],
        };
        write_artifact(&path, &artifact).unwrap();

        let err = read_artifact::<SchemaArtifact>(&path).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::UnsupportedVersion { found: 99, expected: 1, .. }
        ));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cols.bin");
        // version 1 followed by a truncated sequence header
        fs::write(&path, [1u8, 0xFC]).unwrap();

        let err = read_artifact::<SchemaArtifact>(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Decode { .. }));
    }

    #[test]
    fn overwrite_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cols.bin");
        for columns in [vec!["x".to_string()], vec!["y".to_string(), "z".to_string()]] {
            let artifact = SchemaArtifact {
                format_version: ARTIFACT_FORMAT_VERSION,
                columns,
            };
            write_artifact(&path, &artifact).unwrap();
        }
        let back: SchemaArtifact = read_artifact(&path).unwrap();
        assert_eq!(back.columns, vec!["y", "z"]);
    }

    #[test]
    fn staged_artifact_is_invisible_until_committed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cols.bin");
        let artifact = SchemaArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            columns: vec!["a".into()],
        };

        drop(stage_artifact(&path, &artifact).unwrap());
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

        stage_artifact(&path, &artifact).unwrap().commit().unwrap();
        let back: SchemaArtifact = read_artifact(&path).unwrap();
        assert_eq!(back, artifact);
    }
}
