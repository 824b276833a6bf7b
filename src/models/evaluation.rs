//! Accuracy scoring

#![allow(non_snake_case)]

use ndarray::{Array1, Array2};

use crate::error::{MlError, Result};
use crate::models::logistic::LogisticModel;

/// Fraction of rows whose predicted label matches the ground truth.
///
/// Pure function of its inputs; called identically on the training and
/// testing subsets so the two scores can be compared for overfitting.
pub fn accuracy(model: &LogisticModel, X: &Array2<f64>, y: &Array1<u8>) -> Result<f64> {
    if X.nrows() == 0 {
        return Err(MlError::InvalidArgument("empty evaluation matrix".into()));
    }
    if X.nrows() != y.len() {
        return Err(MlError::InvalidArgument(format!(
            "evaluation matrix has {} rows but {} labels were given",
            X.nrows(),
            y.len()
        )));
    }
    if X.ncols() != model.n_features() {
        return Err(MlError::InvalidArgument(format!(
            "model expects {} features but matrix has {} columns",
            model.n_features(),
            X.ncols()
        )));
    }

    let correct = X
        .rows()
        .into_iter()
        .zip(y.iter())
        .filter(|(row, truth)| model.label_for(row.view()) == **truth)
        .count();
    Ok(correct as f64 / y.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn accuracy_counts_exact_label_matches() {
        // Single positive weight: label is 1 iff the feature is >= 0.
        let model = LogisticModel::new(array![1.0], 0.0).unwrap();
        let X = array![[-3.0], [-1.0], [2.0], [4.0]];

        let y = array![0, 0, 1, 1];
        assert_abs_diff_eq!(accuracy(&model, &X, &y).unwrap(), 1.0, epsilon = 1e-12);

        let y = array![0, 1, 1, 0];
        assert_abs_diff_eq!(accuracy(&model, &X, &y).unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn shape_mismatches_are_rejected() {
        let model = LogisticModel::new(array![1.0, 1.0], 0.0).unwrap();
        let err = accuracy(&model, &array![[1.0], [2.0]], &array![0, 1]).unwrap_err();
        assert!(matches!(err, MlError::InvalidArgument(_)));

        let err = accuracy(&model, &array![[1.0, 2.0]], &array![0, 1]).unwrap_err();
        assert!(matches!(err, MlError::InvalidArgument(_)));
    }
}
