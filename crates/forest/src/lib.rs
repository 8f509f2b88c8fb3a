//! Random-forest classification for dense feature matrices.
//!
//! The forest is a bag of CART trees. Each tree is grown on a bootstrap
//! sample, splits on Gini impurity, and considers a random subset of
//! features at every node. Leaves keep the class distribution of the
//! training rows that reached them, so [`RandomForestClassifier::predict_proba`]
//! is the mean of per-tree leaf distributions and [`RandomForestClassifier::predict`]
//! its argmax.
//!
//! Labels are dense class indices `0..n_classes`. Mapping indices to names is
//! the caller's business.
//!
//! ```
//! use forest::{Matrix, RandomForestClassifier};
//!
//! let x = Matrix::from_vec(4, 2, vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0]).unwrap();
//! let y = vec![0, 0, 1, 1];
//!
//! let mut rf = RandomForestClassifier::new(10).with_random_state(42);
//! rf.fit(&x, &y).unwrap();
//! let proba = rf.predict_proba(&x).unwrap();
//! assert_eq!(proba.shape(), (4, 2));
//! ```

mod error;
mod matrix;
mod metrics;
mod random_forest;
mod split;
mod tree;

pub use crate::error::ForestError;
pub use crate::matrix::Matrix;
pub use crate::metrics::accuracy;
pub use crate::random_forest::RandomForestClassifier;
pub use crate::split::train_test_split;
pub use crate::tree::{DecisionTreeClassifier, MaxFeatures};

pub type Result<T> = std::result::Result<T, ForestError>;
