//! Command-line entry point: load a CSV, split it, fit the pipeline on the
//! training rows and print one predicted label per test row.
//!
//! ```bash
//! tabular-nb --data samples.csv --separator ';' --seed 42 --report run.json
//! ```
//!
//! Set `RUST_LOG=debug` for per-stage diagnostics.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use log::info;

use tabular_nb::backend::CpuBackend;
use tabular_nb::config::{RunConfig, RunReport};
use tabular_nb::dataset::{load_csv, train_test_split, Dataset};
use tabular_nb::pipeline::ClassificationPipeline;

#[derive(Parser, Debug)]
#[command(
    name = "tabular-nb",
    version,
    about = "Binarize, select, standardize and classify a labelled CSV with Gaussian naive Bayes"
)]
struct Cli {
    /// Path to the delimited input file
    #[arg(short, long)]
    data: PathBuf,

    /// Field separator (overrides the config file)
    #[arg(short, long)]
    separator: Option<char>,

    /// Name of the label column (overrides the config file)
    #[arg(short, long)]
    target: Option<String>,

    /// Fraction of rows held out for prediction (overrides the config file)
    #[arg(long)]
    test_size: Option<f64>,

    /// Seed for the train/test split; a random one is drawn if absent
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a JSON run configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RunConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RunConfig::default(),
    };
    config.apply_overrides(cli.separator, cli.target, cli.test_size, cli.seed);
    config.validate().context("invalid run configuration")?;
    let seed = config.resolve_seed();

    let dataset = load_csv(&cli.data, &config.loader_config())
        .with_context(|| format!("failed to load {}", cli.data.display()))?;

    let split = train_test_split::<CpuBackend, _>(&dataset, config.test_size, Some(seed))
        .context("failed to split dataset")?;
    info!(
        "Split {} rows into {} train / {} test (seed {})",
        dataset.len(),
        split.train_indices.len(),
        split.test_indices.len(),
        seed
    );

    let fitted = ClassificationPipeline::<CpuBackend>::from_config(&config.pipeline)
        .fit(&split.x_train, &split.y_train)
        .context("failed to fit pipeline")?;

    let predictions = fitted
        .predict(&split.x_test)
        .context("failed to predict test rows")?;
    let test_accuracy = tabular_nb::metrics::accuracy_score(&split.y_test, &predictions)?;

    let selected_features: Vec<String> = fitted
        .selected_features()
        .iter()
        .map(|&i| dataset.feature_names()[i].clone())
        .collect();
    info!("Selected features: {:?}", selected_features);
    info!("Test accuracy: {:.4}", test_accuracy);

    let predictions = predictions.to_vec();
    for label in &predictions {
        println!("{}", label);
    }

    if let Some(path) = &cli.report {
        let report = RunReport {
            data: cli.data.clone(),
            n_rows: dataset.len(),
            n_features: dataset.n_features(),
            n_train: split.train_indices.len(),
            n_test: split.test_indices.len(),
            seed,
            selected_features,
            classes: fitted.classes().to_vec(),
            test_accuracy,
            predictions,
        };
        report
            .write_json(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}
