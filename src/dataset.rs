//! Tabular dataset with an explicit feature-name ordering

use std::path::Path;

use ndarray::{Array1, Array2, Axis};

use crate::error::{MlError, Result};

/// An immutable feature matrix plus aligned binary labels.
///
/// Column identity is carried by `feature_names`, in the same order as the
/// matrix columns; labels use the fixed encoding 0 = malignant, 1 = benign.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Array2<f64>,
    labels: Array1<u8>,
    feature_names: Vec<String>,
}

impl Dataset {
    pub fn new(
        features: Array2<f64>,
        labels: Array1<u8>,
        feature_names: Vec<String>,
    ) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(MlError::InvalidArgument(format!(
                "feature matrix has {} rows but label vector has {} entries",
                features.nrows(),
                labels.len()
            )));
        }
        if features.ncols() != feature_names.len() {
            return Err(MlError::InvalidArgument(format!(
                "feature matrix has {} columns but {} feature names were given",
                features.ncols(),
                feature_names.len()
            )));
        }
        if let Some(bad) = features.iter().find(|v| !v.is_finite()) {
            return Err(MlError::InvalidArgument(format!(
                "feature matrix contains non-finite value {bad}"
            )));
        }
        if let Some(bad) = labels.iter().find(|&&l| l > 1) {
            return Err(MlError::InvalidArgument(format!(
                "labels must be 0 or 1, found {bad}"
            )));
        }
        Ok(Self {
            features,
            labels,
            feature_names,
        })
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn labels(&self) -> &Array1<u8> {
        &self.labels
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// (malignant, benign) counts.
    pub fn class_counts(&self) -> (usize, usize) {
        let benign = self.labels.iter().filter(|&&l| l == 1).count();
        (self.labels.len() - benign, benign)
    }

    /// Row subset by index, preserving the feature-name ordering.
    pub(crate) fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            features: self.features.select(Axis(0), indices),
            labels: self.labels.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
        }
    }
}

/// Loads a headed CSV where every column but the last is a feature and the
/// last column holds the binary label.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;

    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.len() < 2 {
        return Err(MlError::InvalidArgument(format!(
            "dataset at {} needs at least one feature column and a label column",
            path.display()
        )));
    }
    let n_features = headers.len() - 1;
    let feature_names: Vec<String> = headers
        .iter()
        .take(n_features)
        .map(|h| h.trim().to_string())
        .collect();

    let mut values: Vec<f64> = Vec::new();
    let mut labels: Vec<u8> = Vec::new();

    for (row_idx, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        if record.len() != headers.len() {
            return Err(MlError::InvalidArgument(format!(
                "row {}: expected {} columns, found {}",
                row_idx + 1,
                headers.len(),
                record.len()
            )));
        }
        for field in record.iter().take(n_features) {
            let value: f64 = field.trim().parse().map_err(|_| {
                MlError::InvalidArgument(format!(
                    "row {}: cannot parse feature value {:?}",
                    row_idx + 1,
                    field
                ))
            })?;
            values.push(value);
        }
        let label_field = &record[n_features];
        let label: u8 = label_field.trim().parse().map_err(|_| {
            MlError::InvalidArgument(format!(
                "row {}: cannot parse label {:?}",
                row_idx + 1,
                label_field
            ))
        })?;
        labels.push(label);
    }

    let n_samples = labels.len();
    let features = Array2::from_shape_vec((n_samples, n_features), values)
        .map_err(|e| MlError::InvalidArgument(format!("dataset shape error: {e}")))?;

    Dataset::new(features, Array1::from(labels), feature_names)
}

fn csv_error(err: csv::Error) -> MlError {
    if err.is_io_error() {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => MlError::Io(io),
            other => MlError::InvalidArgument(format!("dataset read error: {other:?}")),
        }
    } else {
        MlError::InvalidArgument(format!("dataset parse error: {err}"))
    }
}
