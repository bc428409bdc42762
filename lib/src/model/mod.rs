//! Classifiers and the traits shared by trained models.

pub mod naive_bayes;
pub mod state;

pub use naive_bayes::{GaussianNB, GaussianNbConfig, DEFAULT_VAR_SMOOTHING};
pub use state::{Fitted, Unfitted};

use crate::backend::Backend;
use crate::error::PipelineError;

/// Prediction interface of a trained model.
///
/// Only `Fitted` models implement this trait, so predicting with an untrained
/// model does not compile.
pub trait InferenceModel<B: Backend> {
    type InputSingle;
    type OutputSingle;
    type InputBatch;
    type OutputBatch;

    /// Predict on a single sample (feature vector).
    fn predict(&self, input: &Self::InputSingle) -> Result<Self::OutputSingle, PipelineError>;

    /// Predict on every row of a batch.
    fn predict_batch(&self, input: &Self::InputBatch) -> Result<Self::OutputBatch, PipelineError>;
}
