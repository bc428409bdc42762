//! Data preprocessing transformers for classification pipelines.
//!
//! Transformers follow the same type-state pattern as models in this library:
//! an unfitted transformer only holds hyperparameters, and `fit` returns a
//! distinct fitted type that owns the learned parameters.
//!
//! # Core Traits
//!
//! - [`Transformer`]: Unfitted transformer learning from features only
//! - [`SupervisedTransformer`]: Unfitted transformer learning from features and labels
//! - [`FittedTransformer`]: Fitted transformer ready for inference
//! - [`StatelessTransformer`]: Transformer usable without fitting
//!
//! # Available Transformers
//!
//! - [`Binarizer`]: Threshold features to 0/1
//! - [`SelectFwe`]: ANOVA F-test selection with family-wise error control
//! - [`StandardScaler`]: Z-score normalization
//!
//! ## Pipeline
//! - [`Pipeline`]: Chain multiple transformers together
//!
//! # Example
//!
//! ```
//! use tabular_nb::backend::{CpuBackend, Tensor2D};
//! use tabular_nb::preprocessing::{Binarizer, FittedTransformer, Transformer};
//!
//! let data = Tensor2D::<CpuBackend>::new(vec![-0.5, 2.0], 1, 2);
//! let fitted = Binarizer::<CpuBackend>::new().fit(&data).unwrap();
//! assert_eq!(fitted.transform(&data).unwrap().ravel().to_vec(), vec![0.0, 1.0]);
//! ```

pub mod binarizer;
pub mod feature_selection;
pub mod pipeline;
pub mod scaling;
pub mod traits;

// Re-export main types
pub use binarizer::{Binarizer, BinarizerConfig, FittedBinarizer};
pub use feature_selection::{f_classif, FClassifResult, FittedSelectFwe, SelectFwe, SelectFweConfig};
pub use pipeline::{FittedPipeline, Pipeline, PipelineStep, PipelineStepEnum};
pub use scaling::{FittedStandardScaler, StandardScaler, StandardScalerConfig};
pub use traits::{FittedTransformer, StatelessTransformer, SupervisedTransformer, Transformer};
