//! symptomatch: symptom-to-disease prediction.
//!
//! The workspace is split by concern:
//!
//! - [`dataset`]: synthetic symptom/disease data and its CSV file format
//! - [`forest`]: the random forest classifier
//! - [`predictor`]: training, artifact persistence and prediction
//!
//! The HTTP API lives in the `symptom-server` crate. This crate glues the
//! pieces together for the `symptomatch` command-line tool.

pub use dataset;
pub use forest;
pub use predictor;

pub mod cli;
mod pipeline;

pub use pipeline::{
    generate_dataset, run_self_test, PipelineError, SelfTest, SELF_TEST_SYMPTOMS,
};
