//! CLI entry point for the training pipeline

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use wdbc_ml::models::logistic::FitOptions;
use wdbc_ml::pipeline::{self, PipelineConfig, SAMPLE_RECORD};

#[derive(Parser, Debug)]
#[command(version, about = "Train, evaluate, and persist a logistic-regression classifier")]
struct Cli {
    /// Headed CSV: feature columns followed by a final 0/1 label column
    #[arg(value_name = "DATASET")]
    dataset: PathBuf,

    /// Destination for the serialized model artifact
    #[arg(long, default_value = "model_artifact.json")]
    output: PathBuf,

    /// Fraction of rows held out for testing, exclusive (0, 1)
    #[arg(long, default_value_t = 0.2)]
    test_fraction: f64,

    /// Seed for the reproducible split
    #[arg(long, default_value_t = 2)]
    seed: u64,

    /// Optimizer iteration budget
    #[arg(long, default_value_t = 1000)]
    max_iterations: usize,

    /// Gradient-descent step size
    #[arg(long, default_value_t = 0.1)]
    learning_rate: f64,

    /// L2 regularization strength
    #[arg(long, default_value_t = 1e-4)]
    l2: f64,

    /// Use the first test-set row for the sample prediction instead of the
    /// built-in 30-feature reference record
    #[arg(long)]
    sample_from_test: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut options = FitOptions::new(cli.max_iterations);
    options.learning_rate = cli.learning_rate;
    options.l2 = cli.l2;

    let config = PipelineConfig {
        dataset_path: cli.dataset,
        artifact_path: cli.output,
        test_fraction: cli.test_fraction,
        seed: cli.seed,
        fit_options: options,
        sample: if cli.sample_from_test {
            None
        } else {
            Some(SAMPLE_RECORD.to_vec())
        },
    };

    let report = pipeline::run(&config).context("pipeline run failed")?;

    println!(
        "Dataset shape: {} rows x {} features",
        report.n_samples, report.n_features
    );
    println!(
        "Class distribution: {} malignant / {} benign",
        report.class_distribution.0, report.class_distribution.1
    );
    println!(
        "Split sizes: {} training / {} testing",
        report.train_size, report.test_size
    );
    println!("Accuracy on training data = {:.4}", report.training_accuracy);
    println!("Accuracy on testing data = {:.4}", report.testing_accuracy);
    if !report.converged {
        println!("Warning: optimizer did not converge; reported model is best-effort");
    }

    let prediction = &report.sample_prediction;
    println!(
        "Sample prediction: {} (label {}), probabilities [malignant: {:.4}, benign: {:.4}]",
        prediction.diagnosis, prediction.label, prediction.probabilities[0],
        prediction.probabilities[1]
    );
    println!("THE BREAST CANCER IS {}", prediction.diagnosis);
    println!("Model artifact saved to {}", report.artifact_path.display());

    Ok(())
}
