use crate::error::ForestError;
use crate::matrix::Matrix;
use crate::tree::{argmax, check_inputs, DecisionTreeClassifier, MaxFeatures};
use crate::Result;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Random Forest classifier - an ensemble of decision trees.
///
/// Each tree is trained on a bootstrap sample with random feature selection
/// at every split. With `random_state` set, tree `i` is seeded with
/// `random_state + i`, so fits are reproducible regardless of how rayon
/// schedules them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    trees: Vec<DecisionTreeClassifier>,
    n_estimators: usize,
    max_depth: Option<usize>,
    max_features: MaxFeatures,
    random_state: Option<u64>,
    n_features: Option<usize>,
    n_classes: Option<usize>,
}

impl RandomForestClassifier {
    /// Creates a forest of `n_estimators` trees using `sqrt(n_features)`
    /// candidates per split.
    pub fn new(n_estimators: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators,
            max_depth: None,
            max_features: MaxFeatures::Sqrt,
            random_state: None,
            n_features: None,
            n_classes: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    /// Sets the random state for reproducibility.
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    /// Number of fitted trees; zero before `fit`.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    pub fn n_classes(&self) -> Option<usize> {
        self.n_classes
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Fits the forest on `x` with class-index labels `y`.
    ///
    /// The class count is `max(y) + 1`; classes absent from a bootstrap
    /// sample get zero mass in that tree's leaves.
    pub fn fit(&mut self, x: &Matrix, y: &[usize]) -> Result<()> {
        check_inputs(x, y)?;
        if self.n_estimators == 0 {
            return Err(ForestError::InvalidParameter(
                "n_estimators must be at least 1".into(),
            ));
        }

        let n_samples = x.n_rows();
        let n_classes = y.iter().max().map_or(0, |m| m + 1);
        let base_seed = self.random_state.unwrap_or_else(rand::random);
        let (max_features, max_depth) = (self.max_features, self.max_depth);

        let trees = (0..self.n_estimators)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
                let indices = bootstrap_sample(n_samples, &mut rng);
                let mut tree = DecisionTreeClassifier::new()
                    .with_max_features(max_features)
                    .with_max_depth_opt(max_depth);
                tree.fit_indices(x, y, indices, n_classes, &mut rng)?;
                Ok(tree)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            trees = trees.len(),
            samples = n_samples,
            features = x.n_cols(),
            classes = n_classes,
            "random forest fitted"
        );

        self.trees = trees;
        self.n_features = Some(x.n_cols());
        self.n_classes = Some(n_classes);
        Ok(())
    }

    /// Class probabilities per row: the mean of every tree's leaf
    /// distribution. Shape is `(n_samples, n_classes)`; rows sum to 1.
    pub fn predict_proba(&self, x: &Matrix) -> Result<Matrix> {
        let (Some(n_features), Some(n_classes)) = (self.n_features, self.n_classes) else {
            return Err(ForestError::NotFitted);
        };
        if self.trees.is_empty() {
            return Err(ForestError::NotFitted);
        }
        if x.n_cols() != n_features {
            return Err(ForestError::FeatureMismatch {
                expected: n_features,
                found: x.n_cols(),
            });
        }

        let n_trees = self.trees.len() as f32;
        let mut proba = Matrix::zeros(x.n_rows(), n_classes);
        for r in 0..x.n_rows() {
            let row = x.row(r);
            let mut sums = vec![0.0f32; n_classes];
            for tree in &self.trees {
                for (acc, p) in sums.iter_mut().zip(tree.predict_proba_row(row)?) {
                    *acc += p;
                }
            }
            for (c, sum) in sums.into_iter().enumerate() {
                proba.set(r, c, sum / n_trees);
            }
        }
        Ok(proba)
    }

    /// Most probable class per row; ties resolve to the lowest class index.
    pub fn predict(&self, x: &Matrix) -> Result<Vec<usize>> {
        let proba = self.predict_proba(x)?;
        Ok((0..proba.n_rows()).map(|r| argmax(proba.row(r))).collect())
    }

    /// Accuracy on `(x, y)`.
    pub fn score(&self, x: &Matrix, y: &[usize]) -> Result<f32> {
        let predictions = self.predict(x)?;
        Ok(crate::metrics::accuracy(y, &predictions))
    }
}

/// Draw `n_samples` row indices with replacement.
fn bootstrap_sample(n_samples: usize, rng: &mut StdRng) -> Vec<usize> {
    let dist = Uniform::from(0..n_samples);
    (0..n_samples).map(|_| dist.sample(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three well-separated classes on four binary features, with a little
    /// label-independent noise in the last column.
    fn blobs() -> (Matrix, Vec<usize>) {
        let mut data = Vec::new();
        let mut labels = Vec::new();
        for i in 0..60 {
            let class = i % 3;
            let noise = if i % 7 == 0 { 1.0 } else { 0.0 };
            let row = match class {
                0 => [1.0, 0.0, 0.0, noise],
                1 => [0.0, 1.0, 0.0, noise],
                _ => [0.0, 0.0, 1.0, noise],
            };
            data.extend_from_slice(&row);
            labels.push(class);
        }
        (Matrix::from_vec(60, 4, data).unwrap(), labels)
    }

    #[test]
    fn separable_data_is_learned() {
        let (x, y) = blobs();
        let mut rf = RandomForestClassifier::new(25).with_random_state(42);
        rf.fit(&x, &y).unwrap();

        assert!(rf.is_fitted());
        assert_eq!(rf.n_trees(), 25);
        assert_eq!(rf.n_classes(), Some(3));
        assert!(rf.score(&x, &y).unwrap() > 0.95);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let (x, y) = blobs();
        let mut rf = RandomForestClassifier::new(15).with_random_state(7);
        rf.fit(&x, &y).unwrap();

        let proba = rf.predict_proba(&x).unwrap();
        assert_eq!(proba.shape(), (60, 3));
        for r in 0..proba.n_rows() {
            let sum: f32 = proba.row(r).iter().sum();
            assert!((sum - 1.0).abs() < 1e-4, "row {r} sums to {sum}");
        }
    }

    #[test]
    fn predict_is_argmax_of_proba() {
        let (x, y) = blobs();
        let mut rf = RandomForestClassifier::new(10).with_random_state(3);
        rf.fit(&x, &y).unwrap();

        let proba = rf.predict_proba(&x).unwrap();
        let predictions = rf.predict(&x).unwrap();
        for (r, &pred) in predictions.iter().enumerate() {
            let row = proba.row(r);
            assert!(row.iter().all(|&p| p <= row[pred]));
        }
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let (x, y) = blobs();
        let mut a = RandomForestClassifier::new(12).with_random_state(99);
        let mut b = RandomForestClassifier::new(12).with_random_state(99);
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();
        assert_eq!(a.predict_proba(&x).unwrap(), b.predict_proba(&x).unwrap());
    }

    #[test]
    fn unfitted_forest_refuses_to_predict() {
        let rf = RandomForestClassifier::new(5);
        assert_eq!(
            rf.predict_proba(&Matrix::zeros(1, 4)).unwrap_err(),
            ForestError::NotFitted
        );
    }

    #[test]
    fn feature_count_must_match() {
        let (x, y) = blobs();
        let mut rf = RandomForestClassifier::new(3).with_random_state(1);
        rf.fit(&x, &y).unwrap();
        assert_eq!(
            rf.predict(&Matrix::zeros(1, 3)).unwrap_err(),
            ForestError::FeatureMismatch {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn zero_estimators_is_invalid() {
        let (x, y) = blobs();
        let mut rf = RandomForestClassifier::new(0);
        assert!(matches!(
            rf.fit(&x, &y),
            Err(ForestError::InvalidParameter(_))
        ));
    }

    #[test]
    fn bootstrap_draws_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let sample = bootstrap_sample(10, &mut rng);
        assert_eq!(sample.len(), 10);
        assert!(sample.iter().all(|&i| i < 10));
    }

    #[test]
    fn survives_serde_round_trip() {
        let (x, y) = blobs();
        let mut rf = RandomForestClassifier::new(5).with_random_state(11);
        rf.fit(&x, &y).unwrap();

        let config = bincode::config::standard();
        let bytes = bincode::serde::encode_to_vec(&rf, config).unwrap();
        let (back, _): (RandomForestClassifier, usize) =
            bincode::serde::decode_from_slice(&bytes, config).unwrap();
        assert_eq!(back.predict_proba(&x).unwrap(), rf.predict_proba(&x).unwrap());
    }
}
