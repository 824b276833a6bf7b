//! Feature normalization and per-feature statistics

#![allow(non_snake_case)]

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{MlError, Result};

/// Standardizes features to zero mean and unit variance.
///
/// Used internally by the trainer; the fitted mean/std stay in the scaler
/// and are folded back into the model coefficients after optimization.
pub struct StandardScaler {
    mean: Option<Array1<f64>>,
    std: Option<Array1<f64>>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
        }
    }

    pub fn fit(&mut self, X: &Array2<f64>) -> Result<()> {
        if X.nrows() == 0 {
            return Err(MlError::InvalidArgument("empty feature matrix".into()));
        }

        let mean = X
            .mean_axis(Axis(0))
            .ok_or_else(|| MlError::InvalidArgument("failed to compute column means".into()))?;
        let mut std = X.std_axis(Axis(0), 0.0);

        // Constant columns would divide by zero
        for value in std.iter_mut() {
            if *value < 1e-10 {
                *value = 1.0;
            }
        }

        self.mean = Some(mean);
        self.std = Some(std);
        Ok(())
    }

    pub fn transform(&self, X: &Array2<f64>) -> Result<Array2<f64>> {
        let (mean, std) = self.parameters()?;

        let mut scaled = X.clone();
        for mut row in scaled.rows_mut() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (*value - mean[j]) / std[j];
            }
        }
        Ok(scaled)
    }

    pub fn fit_transform(&mut self, X: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(X)?;
        self.transform(X)
    }

    pub fn parameters(&self) -> Result<(&Array1<f64>, &Array1<f64>)> {
        match (self.mean.as_ref(), self.std.as_ref()) {
            (Some(mean), Some(std)) => Ok((mean, std)),
            _ => Err(MlError::InvalidArgument("scaler not fitted".into())),
        }
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-feature mean and sample standard deviation, persisted alongside the
/// model for auditing and future normalization. Read-only after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureStatistics {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl FeatureStatistics {
    /// Sample statistics (ddof = 1) over every row of `X`.
    pub fn from_matrix(X: &Array2<f64>) -> Result<Self> {
        if X.nrows() < 2 {
            return Err(MlError::InvalidArgument(
                "need at least two rows to compute feature statistics".into(),
            ));
        }
        let mean = X
            .mean_axis(Axis(0))
            .ok_or_else(|| MlError::InvalidArgument("failed to compute column means".into()))?;
        let std = X.std_axis(Axis(0), 1.0);
        Ok(Self {
            mean: mean.to_vec(),
            std: std.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn scaler_centers_and_scales() {
        let X = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]];
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&X).unwrap();

        for j in 0..2 {
            let column = scaled.column(j);
            assert_abs_diff_eq!(column.mean().unwrap(), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(column.std(0.0), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn scaler_leaves_constant_columns_finite() {
        let X = array![[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]];
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&X).unwrap();
        assert!(scaled.iter().all(|v| v.is_finite()));
        assert_abs_diff_eq!(scaled[[0, 0]], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn transform_requires_fit() {
        let scaler = StandardScaler::new();
        let err = scaler.transform(&array![[1.0]]).unwrap_err();
        assert!(matches!(err, MlError::InvalidArgument(_)));
    }

    #[test]
    fn statistics_use_sample_std() {
        let X = array![[1.0], [2.0], [3.0]];
        let stats = FeatureStatistics::from_matrix(&X).unwrap();
        assert_abs_diff_eq!(stats.mean[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.std[0], 1.0, epsilon = 1e-12);
    }
}
