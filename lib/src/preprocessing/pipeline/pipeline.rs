//! Pipeline for chaining transformers.
//!
//! A Pipeline allows chaining multiple transformers together, where the output
//! of one transformer becomes the input to the next. Fitting is supervised:
//! the labels are passed to every step, and steps that do not need them
//! (scalers, binarizers) ignore them.
//!
//! # Example
//! ```
//! use tabular_nb::backend::{CpuBackend, Tensor1D, Tensor2D};
//! use tabular_nb::preprocessing::{
//!     Binarizer, FittedTransformer, Pipeline, SelectFwe, StandardScaler, SupervisedTransformer,
//! };
//!
//! let x = Tensor2D::<CpuBackend>::new(vec![1.0, 0.3, -1.0, 0.3, 1.0, 0.3, -1.0, 0.3], 4, 2);
//! let y = Tensor1D::<CpuBackend>::new(vec![1.0, 0.0, 1.0, 0.0]);
//!
//! let pipeline = Pipeline::<CpuBackend>::new()
//!     .add_binarizer(Binarizer::new())
//!     .add_select_fwe(SelectFwe::new())
//!     .add_standard_scaler(StandardScaler::new());
//!
//! let fitted = pipeline.fit(&x, &y).unwrap();
//! assert_eq!(fitted.feature_indices(), &[0]);
//! assert_eq!(fitted.transform(&x).unwrap().shape(), (4, 1));
//! ```

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::error::PipelineError;
use crate::preprocessing::binarizer::{Binarizer, FittedBinarizer};
use crate::preprocessing::feature_selection::{FittedSelectFwe, SelectFwe};
use crate::preprocessing::scaling::{FittedStandardScaler, StandardScaler};
use crate::preprocessing::traits::{FittedTransformer, SupervisedTransformer, Transformer};
use log::debug;
use std::marker::PhantomData;

/// A trait for fitted transformers that can be part of a pipeline.
pub trait PipelineStep<B: Backend>: Clone {
    /// Transform the data.
    fn transform_step(&self, data: &Tensor2D<B>) -> Result<Tensor2D<B>, PipelineError>;
    /// Inverse transform the data (if supported).
    fn inverse_transform_step(&self, data: &Tensor2D<B>) -> Result<Tensor2D<B>, PipelineError>;
    /// Get the step name for debugging.
    fn step_name(&self) -> &'static str;
}

/// A fitted step of the pipeline.
#[derive(Clone, Debug)]
pub enum PipelineStepEnum<B: Backend> {
    /// Binarizer step.
    Binarizer(FittedBinarizer<B>),
    /// SelectFwe step.
    SelectFwe(FittedSelectFwe<B>),
    /// StandardScaler step.
    StandardScaler(FittedStandardScaler<B>),
}

impl<B: Backend> PipelineStep<B> for PipelineStepEnum<B> {
    fn transform_step(&self, data: &Tensor2D<B>) -> Result<Tensor2D<B>, PipelineError> {
        match self {
            PipelineStepEnum::Binarizer(t) => t.transform(data),
            PipelineStepEnum::SelectFwe(t) => t.transform(data),
            PipelineStepEnum::StandardScaler(t) => t.transform(data),
        }
    }

    fn inverse_transform_step(&self, data: &Tensor2D<B>) -> Result<Tensor2D<B>, PipelineError> {
        match self {
            PipelineStepEnum::Binarizer(t) => t.inverse_transform(data),
            PipelineStepEnum::SelectFwe(t) => t.inverse_transform(data),
            PipelineStepEnum::StandardScaler(t) => t.inverse_transform(data),
        }
    }

    fn step_name(&self) -> &'static str {
        match self {
            PipelineStepEnum::Binarizer(_) => "Binarizer",
            PipelineStepEnum::SelectFwe(_) => "SelectFwe",
            PipelineStepEnum::StandardScaler(_) => "StandardScaler",
        }
    }
}

/// Builder for a fitted step (used during pipeline construction).
trait FittedStepBuilder<B: Backend>: Clone {
    type Fitted: PipelineStep<B>;
    fn fit(&self, data: &Tensor2D<B>, targets: &Tensor1D<B>)
        -> Result<Self::Fitted, PipelineError>;
}

/// A step in the unfitted pipeline.
#[derive(Clone, Debug)]
pub enum UnfittedStepEnum<B: Backend> {
    Binarizer(Binarizer<B>),
    SelectFwe(SelectFwe<B>),
    StandardScaler(StandardScaler<B>),
}

impl<B: Backend> FittedStepBuilder<B> for UnfittedStepEnum<B> {
    type Fitted = PipelineStepEnum<B>;

    fn fit(
        &self,
        data: &Tensor2D<B>,
        targets: &Tensor1D<B>,
    ) -> Result<Self::Fitted, PipelineError> {
        match self {
            UnfittedStepEnum::Binarizer(t) => t.fit(data).map(PipelineStepEnum::Binarizer),
            UnfittedStepEnum::SelectFwe(t) => t.fit(data, targets).map(PipelineStepEnum::SelectFwe),
            UnfittedStepEnum::StandardScaler(t) => {
                t.fit(data).map(PipelineStepEnum::StandardScaler)
            }
        }
    }
}

/// Pipeline transformer (unfitted).
///
/// Chains multiple transformers together.
#[derive(Clone, Debug)]
pub struct Pipeline<B: Backend> {
    steps: Vec<UnfittedStepEnum<B>>,
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for Pipeline<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Pipeline<B> {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            _backend: PhantomData,
        }
    }

    /// Add a Binarizer to the pipeline.
    pub fn add_binarizer(mut self, binarizer: Binarizer<B>) -> Self {
        self.steps.push(UnfittedStepEnum::Binarizer(binarizer));
        self
    }

    /// Add a SelectFwe feature selector to the pipeline.
    pub fn add_select_fwe(mut self, selector: SelectFwe<B>) -> Self {
        self.steps.push(UnfittedStepEnum::SelectFwe(selector));
        self
    }

    /// Add a StandardScaler to the pipeline.
    pub fn add_standard_scaler(mut self, scaler: StandardScaler<B>) -> Self {
        self.steps.push(UnfittedStepEnum::StandardScaler(scaler));
        self
    }

    /// Get the number of steps in the pipeline.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<B: Backend> Pipeline<B> {
    /// Fits each step on the output of the previous one and returns the fitted
    /// pipeline together with the fully transformed training data.
    ///
    /// # Errors
    /// Besides the errors of the individual steps, returns
    /// [`PipelineError::Configuration`] if a step leaves no features.
    pub fn fit_with_output(
        &self,
        data: &Tensor2D<B>,
        targets: &Tensor1D<B>,
    ) -> Result<(FittedPipeline<B>, Tensor2D<B>), PipelineError> {
        if self.steps.is_empty() {
            return Err(PipelineError::InvalidParameter(
                "Cannot fit an empty pipeline".to_string(),
            ));
        }

        let (rows, cols) = data.shape();
        if rows == 0 {
            return Err(PipelineError::EmptyData(
                "Cannot fit pipeline on empty data".to_string(),
            ));
        }

        let mut fitted_steps = Vec::with_capacity(self.steps.len());
        let mut current_data = data.clone();
        let mut feature_indices: Vec<usize> = (0..cols).collect();

        for step in &self.steps {
            let fitted = step.fit(&current_data, targets)?;
            current_data = fitted.transform_step(&current_data)?;

            if let PipelineStepEnum::SelectFwe(selector) = &fitted {
                feature_indices = selector
                    .selected_indices()
                    .iter()
                    .map(|&i| feature_indices[i])
                    .collect();
            }

            if current_data.ncols() == 0 {
                return Err(PipelineError::Configuration(format!(
                    "{} left no features to pass on (input had {})",
                    fitted.step_name(),
                    cols
                )));
            }
            debug!(
                "Pipeline step {} -> {} features",
                fitted.step_name(),
                current_data.ncols()
            );
            fitted_steps.push(fitted);
        }

        let fitted = FittedPipeline {
            steps: fitted_steps,
            n_features: cols,
            feature_indices,
            _backend: PhantomData,
        };
        Ok((fitted, current_data))
    }
}

impl<B: Backend> SupervisedTransformer<B> for Pipeline<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Fitted = FittedPipeline<B>;

    /// Fits each step on the output of the previous one.
    fn fit(
        &self,
        data: &Self::Input,
        targets: &Tensor1D<B>,
    ) -> Result<Self::Fitted, PipelineError> {
        self.fit_with_output(data, targets).map(|(fitted, _)| fitted)
    }

    fn fit_transform(
        &self,
        data: &Self::Input,
        targets: &Tensor1D<B>,
    ) -> Result<Self::Output, PipelineError> {
        self.fit_with_output(data, targets).map(|(_, output)| output)
    }
}

/// Fitted Pipeline ready for inference.
#[derive(Clone, Debug)]
pub struct FittedPipeline<B: Backend> {
    steps: Vec<PipelineStepEnum<B>>,
    n_features: usize,
    feature_indices: Vec<usize>,
    _backend: PhantomData<B>,
}

impl<B: Backend> FittedPipeline<B> {
    /// Get the number of steps in the pipeline.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Get the names of all steps in the pipeline.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.step_name()).collect()
    }

    /// Fitted steps, in application order.
    pub fn steps(&self) -> &[PipelineStepEnum<B>] {
        &self.steps
    }

    /// Input columns that reach the output, as indices into the original
    /// feature matrix, in output order.
    pub fn feature_indices(&self) -> &[usize] {
        &self.feature_indices
    }
}

impl<B: Backend> FittedTransformer<B> for FittedPipeline<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PipelineError> {
        let cols = data.ncols();

        if cols != self.n_features {
            return Err(PipelineError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: cols,
            });
        }

        let mut result = data.clone();
        for step in &self.steps {
            result = step.transform_step(&result)?;
        }
        Ok(result)
    }

    fn inverse_transform(&self, data: &Self::Output) -> Result<Self::Input, PipelineError> {
        let cols = data.ncols();

        if cols != self.n_features_out() {
            return Err(PipelineError::FeatureMismatch {
                expected_features: self.n_features_out(),
                got_features: cols,
            });
        }

        let mut result = data.clone();
        // Apply inverse transforms in reverse order
        for step in self.steps.iter().rev() {
            result = step.inverse_transform_step(&result)?;
        }
        Ok(result)
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }

    fn n_features_out(&self) -> usize {
        self.feature_indices.len()
    }
}
