//! Deterministic seeded train/test splitting

use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dataset::Dataset;
use crate::error::{MlError, Result};

/// A disjoint, covering partition of a dataset's rows.
#[derive(Debug, Clone)]
pub struct SplitSets {
    pub train: Dataset,
    pub test: Dataset,
}

/// Partitions the dataset into train and test subsets.
///
/// Row indices are shuffled with a generator seeded by `seed`; the first
/// `round(n * test_fraction)` permuted indices become the test set. The
/// same seed and fraction on the same dataset ordering always produce the
/// same partition.
pub fn train_test_split(dataset: &Dataset, test_fraction: f64, seed: u64) -> Result<SplitSets> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(MlError::InvalidArgument(format!(
            "test_fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let n = dataset.n_samples();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = ((n as f64) * test_fraction).round() as usize;
    let (test_idx, train_idx) = indices.split_at(test_len);

    Ok(SplitSets {
        train: dataset.select_rows(train_idx),
        test: dataset.select_rows(test_idx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    fn dataset_of(n: usize) -> Dataset {
        let features = Array2::from_shape_fn((n, 3), |(i, j)| (i * 3 + j) as f64);
        let labels = Array1::from_shape_fn(n, |i| (i % 2) as u8);
        Dataset::new(features, labels, vec!["a".into(), "b".into(), "c".into()]).unwrap()
    }

    #[test]
    fn split_is_deterministic_for_a_fixed_seed() {
        let data = dataset_of(40);
        let first = train_test_split(&data, 0.25, 7).unwrap();
        let second = train_test_split(&data, 0.25, 7).unwrap();
        assert_eq!(first.train.features(), second.train.features());
        assert_eq!(first.test.features(), second.test.features());
        assert_eq!(first.train.labels(), second.train.labels());
    }

    #[test]
    fn different_seeds_give_different_partitions() {
        let data = dataset_of(40);
        let a = train_test_split(&data, 0.25, 7).unwrap();
        let b = train_test_split(&data, 0.25, 8).unwrap();
        assert_ne!(a.test.features(), b.test.features());
    }

    #[test]
    fn partition_is_disjoint_and_covering() {
        let data = dataset_of(31);
        let split = train_test_split(&data, 0.3, 3).unwrap();
        assert_eq!(
            split.train.n_samples() + split.test.n_samples(),
            data.n_samples()
        );

        // Each row carries a unique first-column value, so membership can
        // be checked through the data itself.
        let mut seen: Vec<i64> = split
            .train
            .features()
            .column(0)
            .iter()
            .chain(split.test.features().column(0).iter())
            .map(|v| *v as i64)
            .collect();
        seen.sort_unstable();
        let expected: Vec<i64> = (0..31).map(|i| (i * 3) as i64).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn reference_dataset_sizes_match_the_upstream_workflow() {
        // 569 rows at a 0.2 test fraction gives the familiar 455/114 split.
        let data = dataset_of(569);
        let split = train_test_split(&data, 0.2, 2).unwrap();
        assert_eq!(split.train.n_samples(), 455);
        assert_eq!(split.test.n_samples(), 114);
    }

    #[test]
    fn boundary_fractions_are_rejected() {
        let data = dataset_of(10);
        for fraction in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            let err = train_test_split(&data, fraction, 1).unwrap_err();
            assert!(matches!(err, MlError::InvalidArgument(_)));
        }
    }
}
