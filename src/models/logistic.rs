//! Binary logistic regression fit by gradient descent

#![allow(non_snake_case)]

use ndarray::{Array1, Array2, ArrayView1};

use crate::error::{MlError, Result};
use crate::preprocessing::StandardScaler;
use crate::types::{Diagnosis, PredictionResult};

/// Training hyperparameters.
///
/// There is deliberately no `Default`: the iteration budget has no canonical
/// value here, so callers must choose one.
#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    pub max_iterations: usize,
    pub learning_rate: f64,
    pub l2: f64,
    /// Stop once the gradient max-norm falls below this.
    pub tolerance: f64,
}

impl FitOptions {
    pub fn new(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            learning_rate: 0.1,
            l2: 1e-4,
            tolerance: 1e-4,
        }
    }
}

/// A fitted binary classifier. Immutable once created; weights live in raw
/// feature space, so inference needs no scaler.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    weights: Array1<f64>,
    intercept: f64,
}

impl LogisticModel {
    pub fn new(weights: Array1<f64>, intercept: f64) -> Result<Self> {
        if weights.is_empty() {
            return Err(MlError::InvalidArgument("empty weight vector".into()));
        }
        if weights.iter().any(|w| !w.is_finite()) || !intercept.is_finite() {
            return Err(MlError::InvalidArgument(
                "model parameters must be finite".into(),
            ));
        }
        Ok(Self { weights, intercept })
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Probability of class 1 for a row of already-validated width.
    pub(crate) fn probability_of_benign(&self, row: ArrayView1<'_, f64>) -> f64 {
        sigmoid(self.weights.dot(&row) + self.intercept)
    }

    pub(crate) fn label_for(&self, row: ArrayView1<'_, f64>) -> u8 {
        if self.probability_of_benign(row) >= 0.5 {
            1
        } else {
            0
        }
    }

    /// Classifies a single feature vector given in training column order.
    pub fn predict(&self, features: &[f64]) -> Result<PredictionResult> {
        if features.len() != self.weights.len() {
            return Err(MlError::InvalidArgument(format!(
                "expected {} feature values, got {}",
                self.weights.len(),
                features.len()
            )));
        }
        if let Some(bad) = features.iter().find(|v| !v.is_finite()) {
            return Err(MlError::InvalidArgument(format!(
                "feature vector contains non-finite value {bad}"
            )));
        }

        let p_benign = self.probability_of_benign(ArrayView1::from(features));
        let label = if p_benign >= 0.5 { 1 } else { 0 };
        Ok(PredictionResult {
            label,
            probabilities: [1.0 - p_benign, p_benign],
            diagnosis: Diagnosis::from_label(label),
        })
    }
}

/// Result of a training run. A model is always returned; `converged` is
/// false when the iteration budget ran out before the gradient tolerance
/// was reached, which callers surface as a warning.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    pub model: LogisticModel,
    pub converged: bool,
    pub iterations_run: usize,
}

/// Fits a binary logistic-regression model by minimizing L2-regularized
/// log-loss with batch gradient descent.
///
/// The matrix is standardized internally so one learning rate works across
/// feature scales; the fitted mean/std are folded back into the returned
/// coefficients afterwards.
pub fn fit(X: &Array2<f64>, y: &Array1<u8>, options: &FitOptions) -> Result<FitOutcome> {
    if X.nrows() == 0 || X.ncols() == 0 {
        return Err(MlError::InvalidArgument("empty training matrix".into()));
    }
    if X.nrows() != y.len() {
        return Err(MlError::InvalidArgument(format!(
            "training matrix has {} rows but {} labels were given",
            X.nrows(),
            y.len()
        )));
    }
    if options.max_iterations == 0 {
        return Err(MlError::InvalidArgument(
            "max_iterations must be at least 1".into(),
        ));
    }
    if let Some(bad) = y.iter().find(|&&l| l > 1) {
        return Err(MlError::InvalidArgument(format!(
            "training labels must be 0 or 1, found {bad}"
        )));
    }
    let positives = y.iter().filter(|&&l| l == 1).count();
    if positives == 0 || positives == y.len() {
        return Err(MlError::DegenerateTraining(format!(
            "single-class training set ({} of {} labels are benign)",
            positives,
            y.len()
        )));
    }

    let mut scaler = StandardScaler::new();
    let Xs = scaler.fit_transform(X)?;
    let targets = y.mapv(|l| l as f64);

    let n_samples = Xs.nrows() as f64;
    let n_features = Xs.ncols();
    let mut weights = Array1::<f64>::zeros(n_features);
    let mut bias = 0.0;

    let mut converged = false;
    let mut iterations_run = 0;

    for _ in 0..options.max_iterations {
        iterations_run += 1;

        let scores = Xs.dot(&weights) + bias;
        let probabilities = scores.mapv(sigmoid);
        let errors = &probabilities - &targets;

        let mut grad_w = Xs.t().dot(&errors) / n_samples;
        grad_w = grad_w + &weights * options.l2;
        let grad_b = errors.sum() / n_samples;

        let grad_norm = grad_w
            .iter()
            .fold(grad_b.abs(), |acc, g| acc.max(g.abs()));
        if grad_norm < options.tolerance {
            converged = true;
            break;
        }

        weights = weights - &grad_w * options.learning_rate;
        bias -= options.learning_rate * grad_b;
    }

    // Fold the standardization back so the weights apply to raw features:
    // w_raw = w / std, b_raw = b - sum(w * mean / std).
    let (mean, std) = scaler.parameters()?;
    let raw_weights = &weights / std;
    let raw_intercept = bias - raw_weights.dot(mean);

    let model = LogisticModel::new(raw_weights, raw_intercept)?;
    Ok(FitOutcome {
        model,
        converged,
        iterations_run,
    })
}

/// Numerically stable sigmoid.
pub fn sigmoid(value: f64) -> f64 {
    if value >= 0.0 {
        let z = (-value).exp();
        1.0 / (1.0 + z)
    } else {
        let z = value.exp();
        z / (1.0 + z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    /// Two well-separated clusters on the first feature; the second feature
    /// has a deliberately large scale to exercise the internal scaler.
    fn separable_data(n_per_class: usize) -> (Array2<f64>, Array1<u8>) {
        let n = n_per_class * 2;
        let X = Array2::from_shape_fn((n, 2), |(i, j)| {
            let offset = (i % n_per_class) as f64 * 0.01;
            match (i < n_per_class, j) {
                (true, 0) => -2.0 + offset,
                (false, 0) => 2.0 + offset,
                (true, _) => 900.0 + offset,
                (false, _) => 1100.0 + offset,
            }
        });
        let y = Array1::from_shape_fn(n, |i| u8::from(i >= n_per_class));
        (X, y)
    }

    #[test]
    fn fit_separates_clustered_data() {
        let (X, y) = separable_data(25);
        let outcome = fit(&X, &y, &FitOptions::new(5000)).unwrap();

        assert_eq!(outcome.model.n_features(), 2);
        assert!(outcome.model.intercept().is_finite());
        assert!(outcome.model.predict(&[-2.0, 900.0]).unwrap().label == 0);
        assert!(outcome.model.predict(&[2.0, 1100.0]).unwrap().label == 1);
    }

    #[test]
    fn exhausted_budget_still_returns_a_model() {
        let (X, y) = separable_data(10);
        let outcome = fit(&X, &y, &FitOptions::new(1)).unwrap();
        assert!(!outcome.converged);
        assert_eq!(outcome.iterations_run, 1);
        assert!(outcome.model.weights().iter().all(|w| w.is_finite()));
    }

    #[test]
    fn single_class_labels_are_rejected() {
        let X = array![[1.0, 2.0], [3.0, 4.0]];
        let err = fit(&X, &array![0, 0], &FitOptions::new(100)).unwrap_err();
        assert!(matches!(err, MlError::DegenerateTraining(_)));

        let err = fit(&X, &array![1, 1], &FitOptions::new(100)).unwrap_err();
        assert!(matches!(err, MlError::DegenerateTraining(_)));
    }

    #[test]
    fn out_of_range_labels_are_rejected() {
        let X = array![[1.0, 2.0], [3.0, 4.0]];
        let err = fit(&X, &array![0, 2], &FitOptions::new(100)).unwrap_err();
        assert!(matches!(err, MlError::InvalidArgument(_)));
    }

    #[test]
    fn probabilities_sum_to_one() {
        let model = LogisticModel::new(array![0.8, -1.3], 0.2).unwrap();
        let result = model.predict(&[0.5, 1.5]).unwrap();
        assert_abs_diff_eq!(
            result.probabilities[0] + result.probabilities[1],
            1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn label_threshold_sits_at_one_half() {
        // Zero score means probability exactly 0.5, which classifies as 1.
        let model = LogisticModel::new(array![1.0], 0.0).unwrap();
        let result = model.predict(&[0.0]).unwrap();
        assert_eq!(result.label, 1);
        assert_eq!(result.diagnosis, crate::types::Diagnosis::Benign);

        let below = model.predict(&[-0.1]).unwrap();
        assert_eq!(below.label, 0);
        assert_eq!(below.diagnosis, crate::types::Diagnosis::Malignant);
    }

    #[test]
    fn predict_validates_its_input() {
        let model = LogisticModel::new(array![1.0, 2.0], 0.0).unwrap();
        assert!(matches!(
            model.predict(&[1.0]).unwrap_err(),
            MlError::InvalidArgument(_)
        ));
        assert!(matches!(
            model.predict(&[1.0, f64::INFINITY]).unwrap_err(),
            MlError::InvalidArgument(_)
        ));
    }

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert_abs_diff_eq!(sigmoid(0.0), 0.5, epsilon = 1e-12);
        assert!(sigmoid(1000.0) <= 1.0 && sigmoid(1000.0) > 0.999);
        assert!(sigmoid(-1000.0) >= 0.0 && sigmoid(-1000.0) < 0.001);
    }
}
