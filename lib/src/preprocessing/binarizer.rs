//! Binarizer: thresholds every feature to 0/1.
//!
//! ```text
//! y = 1.0 if x > threshold else 0.0
//! ```
//!
//! The mapping is applied element-wise and nothing is learned from the data,
//! apart from the input width used to validate later calls.

use crate::backend::{Backend, Tensor2D};
use crate::error::PipelineError;
use crate::preprocessing::traits::{FittedTransformer, StatelessTransformer, Transformer};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Configuration for Binarizer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizerConfig {
    /// Values strictly above this become 1.0, the rest 0.0.
    pub threshold: f64,
}

impl Default for BinarizerConfig {
    fn default() -> Self {
        Self { threshold: 0.0 }
    }
}

/// Binarizer transformer (unfitted).
#[derive(Clone, Debug)]
pub struct Binarizer<B: Backend> {
    config: BinarizerConfig,
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for Binarizer<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Binarizer<B> {
    /// Create a Binarizer with threshold 0.0.
    pub fn new() -> Self {
        Self::from_config(BinarizerConfig::default())
    }

    pub fn from_config(config: BinarizerConfig) -> Self {
        Self {
            config,
            _backend: PhantomData,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    fn check_threshold(&self) -> Result<(), PipelineError> {
        if self.config.threshold.is_nan() {
            return Err(PipelineError::InvalidParameter(
                "Binarizer threshold must not be NaN".to_string(),
            ));
        }
        Ok(())
    }
}

impl<B: Backend> Transformer<B> for Binarizer<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Fitted = FittedBinarizer<B>;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PipelineError> {
        self.check_threshold()?;
        Ok(FittedBinarizer {
            config: self.config.clone(),
            n_features: data.ncols(),
            _backend: PhantomData,
        })
    }
}

impl<B: Backend> StatelessTransformer<B> for Binarizer<B> {
    fn transform_direct(&self, data: &Self::Input) -> Result<Self::Output, PipelineError> {
        self.check_threshold()?;
        Ok(binarize(data, self.config.threshold))
    }
}

/// Fitted Binarizer ready for inference.
#[derive(Clone, Debug)]
pub struct FittedBinarizer<B: Backend> {
    config: BinarizerConfig,
    n_features: usize,
    _backend: PhantomData<B>,
}

impl<B: Backend> FittedBinarizer<B> {
    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }
}

impl<B: Backend> FittedTransformer<B> for FittedBinarizer<B> {
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
        Ok(binarize(data, self.config.threshold))
    }

    fn inverse_transform(&self, _data: &Self::Output) -> Result<Self::Input, PipelineError> {
        Err(PipelineError::InvalidParameter(
            "Binarizer does not support inverse_transform".to_string(),
        ))
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}

fn binarize<B: Backend>(data: &Tensor2D<B>, threshold: f64) -> Tensor2D<B> {
    Tensor2D {
        data: B::binarize_2d(&data.data, threshold),
        backend: PhantomData,
    }
}
