//! Models and model evaluation

pub mod evaluation;
pub mod logistic;

pub use evaluation::accuracy;
pub use logistic::{fit, FitOptions, FitOutcome, LogisticModel};
