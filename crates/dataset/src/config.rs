//! Generator configuration.

use crate::error::DatasetError;
use serde::{Deserialize, Serialize};

/// Knobs for synthetic sample generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    /// Rows emitted for every disease profile.
    pub samples_per_disease: usize,
    /// Probability that a core symptom is present in a sample.
    pub core_probability: f64,
    /// Probability that a non-core symptom shows up as noise.
    pub noise_probability: f64,
    /// Seed for reproducible output. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_samples_per_disease(mut self, samples: usize) -> Self {
        self.samples_per_disease = samples;
        self
    }

    pub fn with_core_probability(mut self, probability: f64) -> Self {
        self.core_probability = probability;
        self
    }

    pub fn with_noise_probability(mut self, probability: f64) -> Self {
        self.noise_probability = probability;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.samples_per_disease == 0 {
            return Err(DatasetError::InvalidConfig(
                "samples_per_disease must be at least 1".into(),
            ));
        }
        for (name, p) in [
            ("core_probability", self.core_probability),
            ("noise_probability", self.noise_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(DatasetError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            samples_per_disease: 100,
            core_probability: 0.9,
            noise_probability: 0.02,
            seed: None,
        }
    }
}
