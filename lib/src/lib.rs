//! # tabular-nb
//!
//! A type-safe tabular classification pipeline in Rust with pluggable backends
//! and strict separation between fitting and inference.
//!
//! The fixed workflow is: load a delimited file with a `target` column, split
//! it into training and test rows, then fit
//!
//! ```text
//! Binarizer(threshold) -> SelectFwe(f_classif, alpha) -> StandardScaler -> GaussianNB
//! ```
//!
//! on the training rows and predict the test rows.
//!
//! ## Core Design Principles
//!
//! - **Stateful Type Safety**: Models and transformers carry their training state
//!   in the type system (`Unfitted` vs `Fitted`), so predicting with an untrained
//!   stage does not compile.
//! - **Fit/Predict Separation**: Fitted stages contain only the parameters needed
//!   at inference; `predict` never refits.
//! - **Backend Agnosticism**: The abstract `Backend` trait lets every stage run on
//!   the built-in CPU backend or on `ndarray`.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabular_nb::backend::{CpuBackend, Tensor1D, Tensor2D};
//! use tabular_nb::pipeline::{ClassificationPipeline, PipelineConfig};
//!
//! let x = Tensor2D::<CpuBackend>::from_rows(&[
//!     vec![1.0, 0.3],
//!     vec![-1.0, 0.2],
//!     vec![2.0, -0.4],
//!     vec![-2.0, 0.1],
//!     vec![0.5, -0.2],
//!     vec![-0.5, 0.6],
//! ]);
//! let y = Tensor1D::<CpuBackend>::new(vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
//!
//! let config = PipelineConfig::default().with_alpha(0.05);
//! let fitted = ClassificationPipeline::<CpuBackend>::from_config(&config)
//!     .fit(&x, &y)
//!     .unwrap();
//!
//! assert_eq!(fitted.selected_features(), &[0]);
//! let new = Tensor2D::<CpuBackend>::from_rows(&[vec![3.0, 0.0], vec![-3.0, 0.0]]);
//! assert_eq!(fitted.predict(&new).unwrap().to_vec(), vec![1.0, 0.0]);
//! ```
//!
//! ## Module Structure
//!
//! - `backend` — Tensor abstractions and computation primitives (`Tensor1D`, `Tensor2D`)
//! - `dataset` — CSV loading and train/test splitting
//! - `preprocessing` — Binarizer, SelectFwe, StandardScaler and the transformer chain
//! - `model` — Gaussian naive Bayes with stateful type parameters
//! - `pipeline` — The full preprocessing + classifier workflow
//! - `config` — JSON run configuration for the `tabular-nb` binary
//! - `metrics` — Accuracy scoring
//! - `stats` — Special functions behind the F-test p-values

pub mod backend;

/// JSON run configuration.
pub mod config;

/// Data loading utilities and dataset abstractions.
pub mod dataset;

/// Error type shared by every stage.
pub mod error;

/// Classification metrics.
pub mod metrics;

/// Classifiers with compile-time state safety.
pub mod model;

/// End-to-end classification pipeline.
pub mod pipeline;

/// Data preprocessing transformers for classification pipelines.
pub mod preprocessing;

/// Gamma, incomplete beta and F-distribution functions.
pub mod stats;

/// Re-export of core types for convenient usage.
#[cfg(feature = "cpu")]
pub use backend::CpuBackend;
pub use backend::{Backend, Tensor1D, Tensor2D};
pub use error::PipelineError;

#[cfg(all(test, feature = "cpu"))]
mod tests {
    use super::*;
    use crate::dataset::{train_test_split, InMemoryDataset};
    use crate::pipeline::{ClassificationPipeline, PipelineConfig};

    // Two columns whose sign carries the class, one that is always positive
    fn make_dataset(n: usize) -> InMemoryDataset {
        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        for i in 0..n {
            let label = (i % 2) as f64;
            let sign = if label == 1.0 { 1.0 } else { -1.0 };
            let noise = 0.25 + ((i * 7) % 13) as f64 / 52.0;
            x.push(vec![sign * (1.0 + i as f64 / n as f64), noise, sign * (0.5 + noise * 0.1)]);
            y.push(label);
        }
        InMemoryDataset::new(x, y).unwrap()
    }

    #[test]
    fn test_end_to_end_split_fit_predict() {
        let dataset = make_dataset(80);
        let split = train_test_split::<CpuBackend, _>(&dataset, 0.25, Some(7)).unwrap();
        assert_eq!(split.x_test.nrows(), 20);

        let fitted = ClassificationPipeline::<CpuBackend>::from_config(&PipelineConfig::default())
            .fit(&split.x_train, &split.y_train)
            .unwrap();

        assert_eq!(fitted.selected_features(), &[0, 2]);
        let accuracy = fitted.score(&split.x_test, &split.y_test).unwrap();
        assert_eq!(accuracy, 1.0);
    }

    #[test]
    fn test_end_to_end_is_deterministic_for_seed() {
        let dataset = make_dataset(40);
        let run = |seed| {
            let split = train_test_split::<CpuBackend, _>(&dataset, 0.25, Some(seed)).unwrap();
            ClassificationPipeline::<CpuBackend>::new()
                .fit(&split.x_train, &split.y_train)
                .unwrap()
                .predict(&split.x_test)
                .unwrap()
                .to_vec()
        };
        assert_eq!(run(3), run(3));
    }
}
