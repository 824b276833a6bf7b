//! Data preparation: scaling and splitting

pub mod normalization;
pub mod splitting;

pub use normalization::{FeatureStatistics, StandardScaler};
pub use splitting::{train_test_split, SplitSets};
