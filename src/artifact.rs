//! Persisted model artifact: save/load with structural validation

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{MlError, Result};
use crate::models::logistic::LogisticModel;
use crate::preprocessing::FeatureStatistics;

/// Portable record of a training run: everything needed to reproduce
/// inference without the training code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    pub mean_values: Vec<f64>,
    pub std_values: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub model_version: String,
    pub trained_at: DateTime<Utc>,
}

impl ModelArtifact {
    pub fn new(
        model: &LogisticModel,
        statistics: &FeatureStatistics,
        feature_names: Vec<String>,
    ) -> Result<Self> {
        let artifact = Self {
            feature_names,
            mean_values: statistics.mean.clone(),
            std_values: statistics.std.clone(),
            coefficients: model.weights().to_vec(),
            intercept: model.intercept(),
            model_version: env!("CARGO_PKG_VERSION").to_string(),
            trained_at: Utc::now(),
        };
        artifact.validate()?;
        Ok(artifact)
    }

    /// Rebuilds the inference model from the persisted parameters.
    pub fn model(&self) -> Result<LogisticModel> {
        LogisticModel::new(Array1::from(self.coefficients.clone()), self.intercept)
    }

    pub fn statistics(&self) -> FeatureStatistics {
        FeatureStatistics {
            mean: self.mean_values.clone(),
            std: self.std_values.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        let d = self.feature_names.len();
        if d == 0 {
            return Err(MlError::CorruptArtifact("empty feature name list".into()));
        }
        if self.coefficients.len() != d {
            return Err(MlError::CorruptArtifact(format!(
                "{} coefficients for {} feature names",
                self.coefficients.len(),
                d
            )));
        }
        if self.mean_values.len() != d || self.std_values.len() != d {
            return Err(MlError::CorruptArtifact(format!(
                "statistics length mismatch: {} means / {} stds for {} features",
                self.mean_values.len(),
                self.std_values.len(),
                d
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(MlError::CorruptArtifact(
                "non-finite model parameters".into(),
            ));
        }
        Ok(())
    }
}

/// Writes the artifact as pretty JSON, atomically: the bytes land in a
/// temporary file in the destination directory which is then renamed over
/// the target, so a reader never observes a partial write. Overwrites any
/// prior artifact at the path.
pub fn save(artifact: &ModelArtifact, destination: &Path) -> Result<()> {
    artifact.validate()?;

    let parent = match destination.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let mut tmp = NamedTempFile::new_in(&parent)?;
    let encoded = serde_json::to_vec_pretty(artifact)
        .map_err(|e| MlError::CorruptArtifact(format!("serialization failed: {e}")))?;
    tmp.write_all(&encoded)?;
    tmp.flush()?;
    tmp.persist(destination).map_err(|e| MlError::Io(e.error))?;
    Ok(())
}

/// Reads an artifact back, failing with `CorruptArtifact` when the record
/// is missing fields or internally inconsistent.
pub fn load(source: &Path) -> Result<ModelArtifact> {
    let raw = fs::read_to_string(source)?;
    let artifact: ModelArtifact = serde_json::from_str(&raw).map_err(|e| {
        MlError::CorruptArtifact(format!("{} is not a valid artifact: {e}", source.display()))
    })?;
    artifact.validate()?;
    Ok(artifact)
}
