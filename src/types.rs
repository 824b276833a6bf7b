//! Shared value types for the pipeline

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Clinical reading of a binary label. The encoding is fixed by the
/// upstream dataset: 0 = malignant, 1 = benign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnosis {
    Malignant,
    Benign,
}

impl Diagnosis {
    pub fn from_label(label: u8) -> Self {
        if label == 0 {
            Diagnosis::Malignant
        } else {
            Diagnosis::Benign
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnosis::Malignant => write!(f, "MALIGNANT"),
            Diagnosis::Benign => write!(f, "BENIGN"),
        }
    }
}

/// Outcome of a single-sample inference.
///
/// `probabilities[0]` is the probability of class 0 (malignant),
/// `probabilities[1]` of class 1 (benign); the two sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: u8,
    pub probabilities: [f64; 2],
    pub diagnosis: Diagnosis,
}

/// Summary of one full pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub n_samples: usize,
    pub n_features: usize,
    /// (malignant count, benign count) over the full dataset.
    pub class_distribution: (usize, usize),
    pub train_size: usize,
    pub test_size: usize,
    pub training_accuracy: f64,
    pub testing_accuracy: f64,
    pub converged: bool,
    pub sample_prediction: PredictionResult,
    pub artifact_path: PathBuf,
}
