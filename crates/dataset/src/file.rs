//! Comma-separated dataset file codec.
//!
//! Header row is the feature columns followed by [`LABEL_COLUMN`]. Feature
//! cells are `0`/`1`. Quoting follows RFC 4180 via the `csv` crate, so labels
//! may hold commas, quotes or line breaks.

use crate::error::DatasetError;
use crate::generator::{Dataset, Sample};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Name of the label column in dataset files.
pub const LABEL_COLUMN: &str = "Disease";

impl Dataset {
    /// Write the dataset to `path`, creating parent directories as needed.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = ::csv::Writer::from_path(path)?;
        writer.write_record(
            self.columns
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(LABEL_COLUMN)),
        )?;

        let mut row: Vec<String> = Vec::with_capacity(self.columns.len() + 1);
        for sample in &self.samples {
            row.clear();
            row.extend(sample.features.iter().map(u8::to_string));
            row.push(sample.label.clone());
            writer.write_record(&row)?;
        }
        writer.flush()?;

        tracing::info!(
            rows = self.samples.len(),
            path = %path.display(),
            "dataset written"
        );
        Ok(())
    }

    /// Read a dataset previously written by [`Dataset::write_csv`] or any
    /// CSV with a `Disease` column and numeric feature columns.
    ///
    /// The label column may sit anywhere in the header; every other column is
    /// a feature, kept in file order. Non-zero cells become `1`.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => DatasetError::NotFound {
                path: path.to_path_buf(),
            },
            _ => DatasetError::Io(err),
        })?;

        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let header = reader.headers().map_err(from_csv)?.clone();
        if header.is_empty() {
            return Err(DatasetError::Empty);
        }
        let label_idx = header
            .iter()
            .position(|c| c == LABEL_COLUMN)
            .ok_or_else(|| DatasetError::MissingLabelColumn {
                column: LABEL_COLUMN.to_string(),
            })?;

        let columns: Vec<String> = header
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != label_idx)
            .map(|(_, c)| c.to_string())
            .collect();

        let mut samples = Vec::new();
        for record in reader.records() {
            let record = record.map_err(from_csv)?;
            let line = record.position().map_or(0, |p| p.line() as usize);

            let mut features = Vec::with_capacity(columns.len());
            let mut label = String::new();
            for (i, field) in record.iter().enumerate() {
                if i == label_idx {
                    label = field.to_string();
                    continue;
                }
                let value: f64 = field.trim().parse().map_err(|_| DatasetError::InvalidCell {
                    line,
                    column: header[i].to_string(),
                    value: field.to_string(),
                })?;
                features.push(u8::from(value != 0.0));
            }
            samples.push(Sample { features, label });
        }

        tracing::debug!(
            rows = samples.len(),
            columns = columns.len(),
            path = %path.display(),
            "dataset loaded"
        );
        Ok(Dataset { columns, samples })
    }
}

/// Row-width mismatches get their own variant; everything else is wrapped.
fn from_csv(err: ::csv::Error) -> DatasetError {
    if let ::csv::ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = err.kind()
    {
        return DatasetError::RaggedRow {
            line: pos.as_ref().map_or(0, |p| p.line() as usize),
            expected: *expected_len as usize,
            found: *len as usize,
        };
    }
    DatasetError::Csv(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tiny() -> Dataset {
        Dataset {
            columns: vec!["cough".into(), "fever".into()],
            samples: vec![
                Sample {
                    features: vec![1, 0],
                    label: "Flu".into(),
                },
                Sample {
                    features: vec![0, 1],
                    label: "Cold, \"mild\"".into(),
                },
            ],
        }
    }

    #[test]
    fn write_then_read_keeps_columns_and_labels() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data.csv");
        let ds = tiny();
        ds.write_csv(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("cough,fever,Disease\n"));
        assert!(text.contains(r#""Cold, ""mild""""#));

        let back = Dataset::read_csv(&path).unwrap();
        assert_eq!(back, ds);
    }

    #[test]
    fn labels_with_line_breaks_survive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let ds = Dataset {
            columns: vec!["fever".into()],
            samples: vec![
                Sample {
                    features: vec![1],
                    label: "Flu\nSevere".into(),
                },
                Sample {
                    features: vec![0],
                    label: "Cold\r\nMild".into(),
                },
            ],
        };
        ds.write_csv(&path).unwrap();

        assert_eq!(Dataset::read_csv(&path).unwrap(), ds);
    }

    #[test]
    fn label_column_may_come_first() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "Disease,b,a\nFlu,1,0\nCold,0,1\n").unwrap();

        let ds = Dataset::read_csv(&path).unwrap();
        assert_eq!(ds.columns, vec!["b", "a"]);
        assert_eq!(ds.samples[1].features, vec![0, 1]);
        assert_eq!(ds.samples[1].label, "Cold");
    }

    #[test]
    fn missing_label_column_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "a,b\n1,0\n").unwrap();

        assert!(matches!(
            Dataset::read_csv(&path),
            Err(DatasetError::MissingLabelColumn { column }) if column == "Disease"
        ));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Dataset::read_csv(dir.path().join("absent.csv")),
            Err(DatasetError::NotFound { .. })
        ));
    }

    #[test]
    fn ragged_and_non_numeric_rows_are_rejected() {
        let dir = tempdir().unwrap();
        let ragged = dir.path().join("ragged.csv");
        fs::write(&ragged, "a,Disease\n1,Flu,extra\n").unwrap();
        assert!(matches!(
            Dataset::read_csv(&ragged),
            Err(DatasetError::RaggedRow { line: 2, expected: 2, found: 3 })
        ));

        let bad = dir.path().join("bad.csv");
        fs::write(&bad, "a,Disease\nyes,Flu\n").unwrap();
        assert!(matches!(
            Dataset::read_csv(&bad),
            Err(DatasetError::InvalidCell { line: 2, .. })
        ));
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        assert!(matches!(Dataset::read_csv(&path), Err(DatasetError::Empty)));
    }
}
