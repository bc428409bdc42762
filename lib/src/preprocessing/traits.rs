//! Core traits for preprocessing transformers.
//!
//! This module defines the central traits:
//! - [`Transformer`]: Unfitted, unsupervised; learns from features only.
//! - [`SupervisedTransformer`]: Unfitted; learns from features and labels
//!   (e.g. univariate feature selection).
//! - [`FittedTransformer`]: After fitting; ready for inference.

use crate::backend::{Backend, Tensor1D};
use crate::error::PipelineError;

/// Trait for unfitted transformers with hyperparameters.
///
/// A transformer learns parameters from training data and can then transform
/// new data using those learned parameters. This trait represents the
/// configurable, unfitted state.
///
/// # Type Parameters
/// - `B`: The backend (e.g., `CpuBackend`) used for computation.
/// - `Input`: Input data type (typically `Tensor2D<B>`).
/// - `Output`: Output data type (typically `Tensor2D<B>`).
/// - `Fitted`: The corresponding fitted transformer type.
///
/// # Example
/// ```
/// use tabular_nb::backend::{CpuBackend, Tensor2D};
/// use tabular_nb::preprocessing::{FittedTransformer, StandardScaler, Transformer};
///
/// let data = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
/// let fitted = StandardScaler::<CpuBackend>::new().fit(&data).unwrap();
/// let scaled = fitted.transform(&data).unwrap();
/// assert_eq!(scaled.ravel().to_vec(), vec![-1.0, -1.0, 1.0, 1.0]);
/// ```
pub trait Transformer<B: Backend>: Clone {
    /// Input data type for transformation.
    type Input;
    /// Output data type after transformation.
    type Output;
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer<B, Input = Self::Input, Output = Self::Output>;

    /// Fit the transformer to the training data.
    ///
    /// # Errors
    /// Returns [`PipelineError`] if:
    /// - Data is empty
    /// - Shape is incompatible with the transformer
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PipelineError>;

    /// Fit the transformer and transform the data in one step.
    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PipelineError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Trait for unfitted transformers that need the labels to learn.
pub trait SupervisedTransformer<B: Backend>: Clone {
    type Input;
    type Output;
    type Fitted: FittedTransformer<B, Input = Self::Input, Output = Self::Output>;

    /// Fit the transformer to features and their labels.
    ///
    /// # Errors
    /// Returns [`PipelineError`] if the data is empty, the number of labels
    /// differs from the number of rows, or the labels are unusable.
    fn fit(&self, data: &Self::Input, targets: &Tensor1D<B>)
        -> Result<Self::Fitted, PipelineError>;

    fn fit_transform(
        &self,
        data: &Self::Input,
        targets: &Tensor1D<B>,
    ) -> Result<Self::Output, PipelineError> {
        let fitted = self.fit(data, targets)?;
        fitted.transform(data)
    }
}

/// Trait for fitted transformers ready for inference.
///
/// After fitting, a transformer contains learned parameters (e.g., mean and
/// scale for StandardScaler) that never change; transforming takes `&self`.
pub trait FittedTransformer<B: Backend>: Clone {
    /// Input data type for transformation.
    type Input;
    /// Output data type after transformation.
    type Output;

    /// Transform data using learned parameters.
    ///
    /// # Errors
    /// Returns [`PipelineError::FeatureMismatch`] if the input width differs
    /// from the width seen during fit.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PipelineError>;

    /// Reverse the transformation (if supported).
    ///
    /// Not all transformers support inverse transformation.
    /// For example, Binarizer cannot be inverted.
    fn inverse_transform(&self, data: &Self::Output) -> Result<Self::Input, PipelineError>;

    /// Returns the number of features seen during fit.
    fn n_features_in(&self) -> usize;

    /// Returns the number of features produced by `transform`.
    fn n_features_out(&self) -> usize {
        self.n_features_in()
    }
}

/// Marker trait for transformers that don't require fitting.
///
/// Stateless transformers (like Binarizer) can transform data without
/// learning any parameters. They implement both `Transformer` and this trait.
pub trait StatelessTransformer<B: Backend>: Transformer<B> {
    /// Transform data without fitting.
    ///
    /// Equivalent to `fit_transform`, but communicates that no learning occurs.
    fn transform_direct(&self, data: &Self::Input) -> Result<Self::Output, PipelineError>;
}
