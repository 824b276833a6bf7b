//! End-to-end train/evaluate/persist workflow
//!
//! Strictly sequential: load -> split -> fit -> evaluate -> predict ->
//! persist, each step feeding the next. One run, no retries.

use std::path::PathBuf;

use crate::artifact::{self, ModelArtifact};
use crate::dataset;
use crate::error::{MlError, Result};
use crate::models::logistic::FitOptions;
use crate::models::{accuracy, fit};
use crate::preprocessing::{train_test_split, FeatureStatistics};
use crate::types::PipelineReport;

/// The benign reference record used as the default smoke-test inference
/// input, in dataset column order.
pub const SAMPLE_RECORD: [f64; 30] = [
    13.54, 14.36, 87.46, 566.3, 0.09779, 0.08129, 0.06664, 0.04781, 0.1885, 0.05766, 0.2699,
    0.7886, 2.058, 23.56, 0.008462, 0.0146, 0.02387, 0.01315, 0.0198, 0.0023, 15.11, 19.26, 99.7,
    711.2, 0.144, 0.1773, 0.239, 0.1288, 0.2977, 0.07259,
];

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub dataset_path: PathBuf,
    pub artifact_path: PathBuf,
    pub test_fraction: f64,
    pub seed: u64,
    pub fit_options: FitOptions,
    /// Feature vector for the single-sample prediction; when absent, the
    /// first test-set row is used.
    pub sample: Option<Vec<f64>>,
}

/// Runs the whole workflow and returns its printable summary.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    tracing::info!("loading dataset from {}", config.dataset_path.display());
    let data = dataset::load_csv(&config.dataset_path)?;
    let (malignant, benign) = data.class_counts();
    tracing::info!(
        "dataset: {} samples x {} features ({} malignant / {} benign)",
        data.n_samples(),
        data.n_features(),
        malignant,
        benign
    );

    let split = train_test_split(&data, config.test_fraction, config.seed)?;
    tracing::info!(
        "split: {} training rows, {} testing rows (fraction {}, seed {})",
        split.train.n_samples(),
        split.test.n_samples(),
        config.test_fraction,
        config.seed
    );

    let outcome = fit(split.train.features(), split.train.labels(), &config.fit_options)?;
    if outcome.converged {
        tracing::info!("optimizer converged after {} iterations", outcome.iterations_run);
    } else {
        tracing::warn!(
            "optimizer did not converge within {} iterations; using best parameters found",
            config.fit_options.max_iterations
        );
    }
    let model = outcome.model;

    let training_accuracy = accuracy(&model, split.train.features(), split.train.labels())?;
    let testing_accuracy = accuracy(&model, split.test.features(), split.test.labels())?;
    tracing::info!(
        "accuracy: {:.4} on training data, {:.4} on testing data",
        training_accuracy,
        testing_accuracy
    );

    let sample = match &config.sample {
        Some(values) => values.clone(),
        None => {
            if split.test.n_samples() == 0 {
                return Err(MlError::InvalidArgument(
                    "no sample vector given and the test set is empty".into(),
                ));
            }
            split.test.features().row(0).to_vec()
        }
    };
    let sample_prediction = model.predict(&sample)?;
    tracing::info!(
        "sample prediction: label {} ({}), probabilities [{:.4}, {:.4}]",
        sample_prediction.label,
        sample_prediction.diagnosis,
        sample_prediction.probabilities[0],
        sample_prediction.probabilities[1]
    );

    // Statistics are computed over the full dataset, matching the upstream
    // workflow, and persisted for auditing.
    let statistics = FeatureStatistics::from_matrix(data.features())?;
    let record = ModelArtifact::new(&model, &statistics, data.feature_names().to_vec())?;
    artifact::save(&record, &config.artifact_path)?;
    tracing::info!("artifact written to {}", config.artifact_path.display());

    Ok(PipelineReport {
        n_samples: data.n_samples(),
        n_features: data.n_features(),
        class_distribution: (malignant, benign),
        train_size: split.train.n_samples(),
        test_size: split.test.n_samples(),
        training_accuracy,
        testing_accuracy,
        converged: outcome.converged,
        sample_prediction,
        artifact_path: config.artifact_path.clone(),
    })
}
