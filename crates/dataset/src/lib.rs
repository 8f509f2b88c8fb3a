//! Synthetic symptom dataset layer.
//!
//! This crate owns everything that happens before a model sees data: the
//! hand-authored disease profiles, the symptom vocabulary derived from them,
//! noisy sample generation, and the CSV file the trainer reads back.
//!
//! ## What we do
//!
//! - Build the symptom vocabulary as the sorted union of every profile's
//!   core symptoms
//! - Emit `samples_per_disease` rows per disease; core symptoms fire with
//!   high probability, every other symptom fires rarely as noise
//! - Shuffle rows so the file is never ordered by label
//! - Read and write the dataset as comma-separated values with a `Disease`
//!   label column
//!
//! Seeded generation is reproducible: same profiles + same config = same file.

mod config;
mod file;
mod error;
mod generator;
mod profile;

pub use crate::config::GeneratorConfig;
pub use crate::file::LABEL_COLUMN;
pub use crate::error::DatasetError;
pub use crate::generator::{generate, Dataset, Sample};
pub use crate::profile::{default_profiles, vocabulary, DiseaseProfile};
