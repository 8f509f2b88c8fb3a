use crate::config::GeneratorConfig;
use crate::error::DatasetError;
use crate::profile::{vocabulary, DiseaseProfile};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One labeled row: a binary symptom vector plus its disease.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sample {
    /// `1` when the symptom in the matching column is present.
    pub features: Vec<u8>,
    pub label: String,
}

/// A labeled tabular dataset over a fixed symptom column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dataset {
    /// Feature column names, in file order. The label column is not included.
    pub columns: Vec<String>,
    pub samples: Vec<Sample>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Distinct labels in sorted order.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .samples
            .iter()
            .map(|s| s.label.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        labels.sort();
        labels
    }
}

/// Synthesize a shuffled dataset from disease profiles.
///
/// Every profile contributes `samples_per_disease` rows. A core symptom is
/// set with `core_probability`; any other vocabulary symptom is set with
/// `noise_probability`.
pub fn generate(
    profiles: &[DiseaseProfile],
    config: &GeneratorConfig,
) -> Result<Dataset, DatasetError> {
    config.validate()?;
    if profiles.is_empty() {
        return Err(DatasetError::NoProfiles);
    }

    let columns = vocabulary(profiles);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut samples = Vec::with_capacity(profiles.len() * config.samples_per_disease);
    for profile in profiles {
        let core: HashSet<&str> = profile.core_symptoms.iter().map(String::as_str).collect();
        for _ in 0..config.samples_per_disease {
            let features = columns
                .iter()
                .map(|symptom| {
                    let p = if core.contains(symptom.as_str()) {
                        config.core_probability
                    } else {
                        config.noise_probability
                    };
                    u8::from(rng.gen_bool(p))
                })
                .collect();
            samples.push(Sample {
                features,
                label: profile.name.clone(),
            });
        }
    }

    samples.shuffle(&mut rng);

    tracing::debug!(
        rows = samples.len(),
        columns = columns.len(),
        diseases = profiles.len(),
        "generated synthetic dataset"
    );

    Ok(Dataset { columns, samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::default_profiles;

    fn seeded(samples: usize) -> GeneratorConfig {
        GeneratorConfig::new()
            .with_samples_per_disease(samples)
            .with_seed(7)
    }

    #[test]
    fn every_sample_matches_vocabulary_width() {
        let profiles = default_profiles();
        let ds = generate(&profiles, &seeded(20)).unwrap();
        let vocab = vocabulary(&profiles);

        assert_eq!(ds.columns, vocab);
        assert_eq!(ds.len(), profiles.len() * 20);
        for sample in &ds.samples {
            assert_eq!(sample.features.len(), vocab.len());
            assert!(sample.features.iter().all(|&v| v <= 1));
            assert!(profiles.iter().any(|p| p.name == sample.label));
        }
    }

    #[test]
    fn rows_per_disease_are_exact() {
        let profiles = default_profiles();
        let ds = generate(&profiles, &seeded(13)).unwrap();
        for profile in &profiles {
            let count = ds.samples.iter().filter(|s| s.label == profile.name).count();
            assert_eq!(count, 13, "{}", profile.name);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let profiles = default_profiles();
        let a = generate(&profiles, &seeded(10)).unwrap();
        let b = generate(&profiles, &seeded(10)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rows_are_not_grouped_by_label() {
        let profiles = default_profiles();
        let ds = generate(&profiles, &seeded(50)).unwrap();
        let first_block: HashSet<&str> = ds.samples[..50]
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert!(first_block.len() > 1);
    }

    #[test]
    fn symptom_rates_track_configured_probabilities() {
        let profiles = default_profiles();
        let ds = generate(&profiles, &seeded(400)).unwrap();

        let (mut core_hits, mut core_total) = (0usize, 0usize);
        let (mut noise_hits, mut noise_total) = (0usize, 0usize);
        for sample in &ds.samples {
            let profile = profiles.iter().find(|p| p.name == sample.label).unwrap();
            for (col, &value) in ds.columns.iter().zip(&sample.features) {
                if profile.is_core(col) {
                    core_total += 1;
                    core_hits += value as usize;
                } else {
                    noise_total += 1;
                    noise_hits += value as usize;
                }
            }
        }

        let core_rate = core_hits as f64 / core_total as f64;
        let noise_rate = noise_hits as f64 / noise_total as f64;
        assert!((core_rate - 0.9).abs() < 0.02, "core rate {core_rate}");
        assert!((noise_rate - 0.02).abs() < 0.005, "noise rate {noise_rate}");
    }

    #[test]
    fn empty_profiles_are_rejected() {
        assert!(matches!(
            generate(&[], &GeneratorConfig::default()),
            Err(DatasetError::NoProfiles)
        ));
    }

    #[test]
    fn labels_are_sorted_and_distinct() {
        let ds = generate(&default_profiles(), &seeded(3)).unwrap();
        let labels = ds.labels();
        assert_eq!(labels.len(), 15);
        assert_eq!(labels[0], "Allergy");
    }
}
