//! Synthetic Classification Pipeline
//!
//! Builds a small dataset where two of six columns carry the class in their
//! sign, writes it to a temporary CSV, and runs the full workflow:
//! - CSV loading with a `target` column
//! - Seeded train/test split
//! - Binarizer -> SelectFwe -> StandardScaler -> GaussianNB
//! - Held-out accuracy and class probabilities
//!
//! Run with: cargo run --example synthetic_pipeline

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::fs;
use tabular_nb::{
    backend::CpuBackend,
    dataset::{load_csv, train_test_split, CsvLoaderConfig},
    pipeline::{ClassificationPipeline, PipelineConfig},
};

const N_ROWS: usize = 200;
const INFORMATIVE: [usize; 2] = [1, 4];
const N_FEATURES: usize = 6;

fn synthetic_csv(seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::new();
    let header: Vec<String> = (0..N_FEATURES).map(|j| format!("f{}", j)).collect();
    out.push_str(&header.join(";"));
    out.push_str(";target\n");

    for _ in 0..N_ROWS {
        let label: u8 = rng.gen_range(0..2);
        let sign = if label == 1 { 1.0 } else { -1.0 };
        let row: Vec<String> = (0..N_FEATURES)
            .map(|j| {
                let value = if INFORMATIVE.contains(&j) {
                    // Mostly agrees with the label, flipped 10% of the time
                    let flip = if rng.gen_bool(0.1) { -1.0 } else { 1.0 };
                    flip * sign * rng.gen_range(0.1..2.0)
                } else {
                    rng.gen_range(-1.0..1.0)
                };
                format!("{:.4}", value)
            })
            .collect();
        out.push_str(&row.join(";"));
        out.push_str(&format!(";{}\n", label));
    }
    out
}

fn main() -> Result<(), Box<dyn Error>> {
    let dir = std::env::temp_dir().join("tabular_nb_example");
    fs::create_dir_all(&dir)?;
    let path = dir.join("synthetic.csv");
    fs::write(&path, synthetic_csv(17))?;

    println!("=== Loading {} ===", path.display());
    let dataset = load_csv(&path, &CsvLoaderConfig::new().delimiter(b';'))?;
    println!("Features: {:?}", dataset.feature_names());

    let split = train_test_split::<CpuBackend, _>(&dataset, 0.25, Some(42))?;
    println!(
        "Train rows: {}, test rows: {}",
        split.x_train.nrows(),
        split.x_test.nrows()
    );

    println!("\n=== Fitting pipeline ===");
    let config = PipelineConfig::default();
    let fitted = ClassificationPipeline::<CpuBackend>::from_config(&config)
        .fit(&split.x_train, &split.y_train)?;
    println!("Steps: {:?}", fitted.step_names());
    println!(
        "Selected columns: {:?}",
        fitted
            .selected_features()
            .iter()
            .map(|&i| dataset.feature_names()[i].as_str())
            .collect::<Vec<_>>()
    );

    let nb = fitted.classifier();
    println!("Classes: {:?}, priors: {:?}", nb.classes(), nb.class_prior());

    println!("\n=== Evaluating ===");
    let accuracy = fitted.score(&split.x_test, &split.y_test)?;
    println!("Test accuracy: {:.2}%", accuracy * 100.0);

    let predictions = fitted.predict(&split.x_test)?.to_vec();
    let proba = fitted.predict_proba(&split.x_test)?.to_rows();
    println!("\nFirst test rows (true / predicted / P(class 1)):");
    for i in 0..5.min(predictions.len()) {
        println!(
            "  {} / {} / {:.3}",
            split.y_test.to_vec()[i],
            predictions[i],
            proba[i][1]
        );
    }

    Ok(())
}
