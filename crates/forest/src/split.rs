use crate::error::ForestError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffle `0..n_samples` with `seed` and cut it into `(train, test)` index
/// sets.
///
/// The test set takes `ceil(n_samples * test_fraction)` rows. Both sides must
/// end up non-empty.
pub fn train_test_split(
    n_samples: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>), ForestError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(ForestError::InvalidParameter(format!(
            "test_fraction must be within (0, 1), got {test_fraction}"
        )));
    }

    let n_test = (n_samples as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(ForestError::InvalidParameter(format!(
            "cannot split {n_samples} samples with test_fraction {test_fraction}"
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok((train, indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sizes_follow_ceiling_rule() {
        let (train, test) = train_test_split(1500, 0.2, 42).unwrap();
        assert_eq!(test.len(), 300);
        assert_eq!(train.len(), 1200);

        let (train, test) = train_test_split(11, 0.2, 42).unwrap();
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 8);
    }

    #[test]
    fn partitions_are_disjoint_and_complete() {
        let (train, test) = train_test_split(100, 0.25, 1).unwrap();
        let all: HashSet<usize> = train.iter().chain(&test).copied().collect();
        assert_eq!(all.len(), 100);
        assert!(train.iter().all(|i| !test.contains(i)));
    }

    #[test]
    fn same_seed_same_split() {
        assert_eq!(
            train_test_split(50, 0.2, 42).unwrap(),
            train_test_split(50, 0.2, 42).unwrap()
        );
        assert_ne!(
            train_test_split(50, 0.2, 42).unwrap(),
            train_test_split(50, 0.2, 43).unwrap()
        );
    }

    #[test]
    fn degenerate_requests_fail() {
        assert!(train_test_split(10, 0.0, 0).is_err());
        assert!(train_test_split(10, 1.0, 0).is_err());
        assert!(train_test_split(1, 0.5, 0).is_err());
        assert!(train_test_split(0, 0.2, 0).is_err());
    }
}
