//! CART decision tree with Gini impurity and per-node feature sampling.

use crate::error::ForestError;
use crate::matrix::Matrix;
use crate::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Splits must lower impurity by more than this to be kept.
const MIN_IMPURITY_DECREASE: f32 = 1e-7;

/// How many candidate features a node looks at before settling on a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MaxFeatures {
    All,
    #[default]
    Sqrt,
    Log2,
    Count(usize),
}

impl MaxFeatures {
    /// Number of candidates for a matrix with `n_features` columns, at least 1.
    pub fn resolve(self, n_features: usize) -> usize {
        let k = match self {
            MaxFeatures::All => n_features,
            MaxFeatures::Sqrt => (n_features as f64).sqrt() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2() as usize,
            MaxFeatures::Count(k) => k,
        };
        k.clamp(1, n_features.max(1))
    }
}

/// Internal split: rows with `x[feature_idx] <= threshold` go left.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitNode {
    pub feature_idx: usize,
    pub threshold: f32,
    pub left: Box<TreeNode>,
    pub right: Box<TreeNode>,
}

/// Terminal node holding the class distribution of its training rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    /// Probability per class index; sums to 1.
    pub distribution: Vec<f32>,
    pub n_samples: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Split(SplitNode),
    Leaf(Leaf),
}

impl TreeNode {
    /// Leaves have depth 0.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Split(s) => 1 + s.left.depth().max(s.right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Split(s) => s.left.n_leaves() + s.right.n_leaves(),
        }
    }
}

/// Decision tree classifier using the CART algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    root: Option<TreeNode>,
    max_depth: Option<usize>,
    min_samples_split: usize,
    max_features: MaxFeatures,
    random_state: Option<u64>,
    n_features: Option<usize>,
    n_classes: Option<usize>,
}

impl DecisionTreeClassifier {
    /// A tree that considers every feature at each node.
    pub fn new() -> Self {
        Self {
            root: None,
            max_depth: None,
            min_samples_split: 2,
            max_features: MaxFeatures::All,
            random_state: None,
            n_features: None,
            n_classes: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub(crate) fn with_max_depth_opt(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples.max(2);
        self
    }

    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    pub fn n_classes(&self) -> Option<usize> {
        self.n_classes
    }

    /// Fit on every row of `x`. Labels are class indices; the class count is
    /// `max(y) + 1`.
    pub fn fit(&mut self, x: &Matrix, y: &[usize]) -> Result<()> {
        check_inputs(x, y)?;
        let n_classes = y.iter().max().map_or(0, |m| m + 1);
        let indices: Vec<usize> = (0..x.n_rows()).collect();
        let mut rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.fit_indices(x, y, indices, n_classes, &mut rng)
    }

    /// Fit on the rows named by `indices` (repeats allowed, as in a bootstrap
    /// sample).
    pub(crate) fn fit_indices(
        &mut self,
        x: &Matrix,
        y: &[usize],
        indices: Vec<usize>,
        n_classes: usize,
        rng: &mut StdRng,
    ) -> Result<()> {
        if indices.is_empty() {
            return Err(ForestError::EmptyInput);
        }
        let n_features = x.n_cols();
        let mut builder = Builder {
            x,
            y,
            n_classes,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            n_candidates: self.max_features.resolve(n_features),
            rng,
        };
        self.root = Some(builder.build(indices, 0));
        self.n_features = Some(n_features);
        self.n_classes = Some(n_classes);
        Ok(())
    }

    /// Class distribution of the leaf reached by `row`.
    pub fn predict_proba_row(&self, row: &[f32]) -> Result<&[f32]> {
        let root = self.root.as_ref().ok_or(ForestError::NotFitted)?;
        if let Some(expected) = self.n_features {
            if row.len() != expected {
                return Err(ForestError::FeatureMismatch {
                    expected,
                    found: row.len(),
                });
            }
        }

        let mut node = root;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return Ok(&leaf.distribution),
                TreeNode::Split(split) => {
                    node = if row[split.feature_idx] <= split.threshold {
                        &split.left
                    } else {
                        &split.right
                    };
                }
            }
        }
    }

    /// Most probable class per row.
    pub fn predict(&self, x: &Matrix) -> Result<Vec<usize>> {
        (0..x.n_rows())
            .map(|r| self.predict_proba_row(x.row(r)).map(argmax))
            .collect()
    }
}

impl Default for DecisionTreeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn check_inputs(x: &Matrix, y: &[usize]) -> Result<()> {
    if x.n_rows() != y.len() {
        return Err(ForestError::ShapeMismatch {
            rows: x.n_rows(),
            labels: y.len(),
        });
    }
    if x.n_rows() == 0 {
        return Err(ForestError::EmptyInput);
    }
    Ok(())
}

/// Index of the largest value; ties go to the lowest index.
pub(crate) fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

fn gini(counts: &[usize], total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    let n = total as f32;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f32 / n;
            p * p
        })
        .sum::<f32>()
}

struct Builder<'a> {
    x: &'a Matrix,
    y: &'a [usize],
    n_classes: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
    n_candidates: usize,
    rng: &'a mut StdRng,
}

struct BestSplit {
    feature_idx: usize,
    threshold: f32,
    decrease: f32,
}

impl Builder<'_> {
    fn build(&mut self, indices: Vec<usize>, depth: usize) -> TreeNode {
        let counts = self.class_counts(&indices);
        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let depth_reached = self.max_depth.is_some_and(|max| depth >= max);

        if pure || depth_reached || indices.len() < self.min_samples_split {
            return self.leaf(&counts, indices.len());
        }

        let Some(best) = self.best_split(&indices, &counts) else {
            return self.leaf(&counts, indices.len());
        };

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| self.x.get(i, best.feature_idx) <= best.threshold);

        let left = self.build(left, depth + 1);
        let right = self.build(right, depth + 1);
        TreeNode::Split(SplitNode {
            feature_idx: best.feature_idx,
            threshold: best.threshold,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in indices {
            counts[self.y[i]] += 1;
        }
        counts
    }

    fn leaf(&self, counts: &[usize], n_samples: usize) -> TreeNode {
        let n = n_samples.max(1) as f32;
        TreeNode::Leaf(Leaf {
            distribution: counts.iter().map(|&c| c as f32 / n).collect(),
            n_samples,
        })
    }

    /// Visit features in random order. Stop once `n_candidates` features have
    /// been examined and a valid split exists; keep going past that budget
    /// while nothing valid has turned up.
    fn best_split(&mut self, indices: &[usize], counts: &[usize]) -> Option<BestSplit> {
        let parent = gini(counts, indices.len());
        let mut features: Vec<usize> = (0..self.x.n_cols()).collect();
        features.shuffle(&mut *self.rng);

        let mut best: Option<BestSplit> = None;
        for (visited, &feature_idx) in features.iter().enumerate() {
            if visited >= self.n_candidates && best.is_some() {
                break;
            }
            if let Some((threshold, decrease)) = self.best_threshold(indices, feature_idx, parent)
            {
                if best.as_ref().is_none_or(|b| decrease > b.decrease) {
                    best = Some(BestSplit {
                        feature_idx,
                        threshold,
                        decrease,
                    });
                }
            }
        }
        best
    }

    fn best_threshold(
        &self,
        indices: &[usize],
        feature_idx: usize,
        parent: f32,
    ) -> Option<(f32, f32)> {
        let mut column: Vec<(f32, usize)> = indices
            .iter()
            .map(|&i| (self.x.get(i, feature_idx), self.y[i]))
            .collect();
        column.sort_by(|a, b| a.0.total_cmp(&b.0));

        let total = column.len();
        if total < 2 {
            return None;
        }
        let mut left = vec![0usize; self.n_classes];
        let mut right = self.class_counts(indices);
        let mut best: Option<(f32, f32)> = None;

        for i in 0..total - 1 {
            let (value, label) = column[i];
            left[label] += 1;
            right[label] -= 1;

            let next = column[i + 1].0;
            if next <= value {
                continue;
            }

            let n_left = i + 1;
            let n_right = total - n_left;
            let weighted = (n_left as f32 * gini(&left, n_left)
                + n_right as f32 * gini(&right, n_right))
                / total as f32;
            let decrease = parent - weighted;

            if decrease > MIN_IMPURITY_DECREASE && best.is_none_or(|(_, d)| decrease > d) {
                best = Some(((value + next) / 2.0, decrease));
            }
        }
        best
    }
}
