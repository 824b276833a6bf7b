//! wdbc-ml - logistic-regression training and serving pipeline

pub mod artifact;
pub mod dataset;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod preprocessing;
pub mod types;

pub use artifact::ModelArtifact;
pub use dataset::Dataset;
pub use error::MlError;
pub use models::{accuracy, fit, FitOptions, FitOutcome, LogisticModel};
pub use pipeline::{PipelineConfig, SAMPLE_RECORD};
pub use preprocessing::{train_test_split, FeatureStatistics, SplitSets, StandardScaler};
pub use types::{Diagnosis, PipelineReport, PredictionResult};
