//! Command-line arguments for `symptomatch`.

use clap::{Parser, Subcommand};
use predictor::PredictorConfig;
use std::path::PathBuf;

/// Symptom-to-disease prediction from the command line
#[derive(Parser, Debug)]
#[command(name = "symptomatch")]
#[command(version)]
#[command(about = "Generate data, train and query the symptom-to-disease model", long_about = None)]
pub struct Args {
    /// Directory holding the dataset CSV
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory holding the model artifacts
    #[arg(long, global = true, default_value = "model")]
    pub model_dir: PathBuf,

    /// Trees in the forest when training
    #[arg(long, global = true, default_value_t = 100)]
    pub n_estimators: usize,

    /// Verbosity: default warn, -v info, -vv debug
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a synthetic dataset
    Generate {
        /// Output file (defaults to the dataset path under --data-dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, default_value_t = 100)]
        samples_per_disease: usize,

        /// Seed for a reproducible dataset
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Train the model from the dataset and persist it
    Train,

    /// Predict a disease and print the result as JSON
    Predict {
        #[arg(value_name = "SYMPTOM", required = true, num_args = 1..)]
        symptoms: Vec<String>,
    },

    /// Report on the persisted model and schema artifacts
    Inspect,
}

impl Args {
    pub fn predictor_config(&self) -> PredictorConfig {
        PredictorConfig::from_dirs(&self.data_dir, &self.model_dir)
            .with_n_estimators(self.n_estimators)
    }

    /// Filter directive for the log subscriber. `RUST_LOG` is not consulted.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
