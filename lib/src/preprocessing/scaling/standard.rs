//! Standard Scaler (Z-score normalization).
//!
//! Transforms features by removing the mean and scaling to unit variance.
//!
//! The standard score of a sample `x` is calculated as:
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the mean of the training samples, and `s` is the population
//! standard deviation (ddof = 0).
//!
//! A feature whose standard deviation is zero up to rounding
//! (`s <= 10 * f64::EPSILON * max(|u|, 1)`) is treated as constant and always
//! transforms to `0.0`, including on rows never seen during fit.
//!
//! # Example
//! ```
//! use tabular_nb::backend::{CpuBackend, Tensor2D};
//! use tabular_nb::preprocessing::{FittedTransformer, StandardScaler, Transformer};
//!
//! let data = Tensor2D::<CpuBackend>::new(vec![5.0, 0.0, 5.0, 2.0], 2, 2);
//! let fitted = StandardScaler::<CpuBackend>::new().fit(&data).unwrap();
//!
//! // The constant first column maps to 0 even for unseen values.
//! let unseen = Tensor2D::<CpuBackend>::new(vec![9.0, 1.0], 1, 2);
//! assert_eq!(fitted.transform(&unseen).unwrap().ravel().to_vec(), vec![0.0, 0.0]);
//! ```

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::error::PipelineError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Configuration for StandardScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardScalerConfig {
    /// If True, center the data before scaling.
    pub with_mean: bool,
    /// If True, scale the data to unit variance.
    pub with_std: bool,
}

impl Default for StandardScalerConfig {
    fn default() -> Self {
        Self {
            with_mean: true,
            with_std: true,
        }
    }
}

/// StandardScaler transformer (unfitted).
///
/// Transforms features by removing the mean and scaling to unit variance.
#[derive(Clone, Debug)]
pub struct StandardScaler<B: Backend> {
    config: StandardScalerConfig,
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for StandardScaler<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> StandardScaler<B> {
    /// Create a new StandardScaler with default configuration.
    pub fn new() -> Self {
        Self::from_config(StandardScalerConfig::default())
    }

    pub fn from_config(config: StandardScalerConfig) -> Self {
        Self {
            config,
            _backend: PhantomData,
        }
    }

    /// Set whether to center data by mean.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.config.with_mean = with_mean;
        self
    }

    /// Set whether to scale data to unit variance.
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.config.with_std = with_std;
        self
    }
}

/// Returns `true` if `std` is zero up to floating-point noise relative to `mean`.
fn is_constant(std: f64, mean: f64) -> bool {
    std <= 10.0 * f64::EPSILON * mean.abs().max(1.0)
}

impl<B: Backend> Transformer<B> for StandardScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Fitted = FittedStandardScaler<B>;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PipelineError> {
        let (rows, cols) = data.shape();

        if rows == 0 {
            return Err(PipelineError::EmptyData(
                "Cannot fit StandardScaler on empty data".to_string(),
            ));
        }

        let raw_mean = data.col_mean().to_vec();
        let raw_std = data.col_std(0).to_vec(); // population std (ddof=0)

        let mean = if self.config.with_mean {
            raw_mean.clone()
        } else {
            vec![0.0; cols]
        };

        let (scale, mask): (Vec<f64>, Vec<f64>) = if self.config.with_std {
            raw_std
                .iter()
                .zip(raw_mean.iter())
                .map(|(&s, &m)| if is_constant(s, m) { (1.0, 0.0) } else { (s, 1.0) })
                .unzip()
        } else {
            (vec![1.0; cols], vec![1.0; cols])
        };

        let n_constant = mask.iter().filter(|&&m| m == 0.0).count();
        if n_constant > 0 {
            warn!(
                "StandardScaler: {} of {} features have zero variance and will map to 0",
                n_constant, cols
            );
        }
        debug!("StandardScaler fitted on {} rows x {} features", rows, cols);

        Ok(FittedStandardScaler {
            config: self.config.clone(),
            mean: Tensor1D::new(mean),
            scale: Tensor1D::new(scale),
            mask: Tensor1D::new(mask),
            n_features: cols,
        })
    }
}

/// Fitted StandardScaler ready for inference.
#[derive(Clone, Debug)]
pub struct FittedStandardScaler<B: Backend> {
    config: StandardScalerConfig,
    mean: Tensor1D<B>,
    scale: Tensor1D<B>,
    /// 0.0 for constant features, 1.0 otherwise.
    mask: Tensor1D<B>,
    n_features: usize,
}

impl<B: Backend> FittedStandardScaler<B> {
    /// Get the mean values for each feature (zeros if `with_mean` is off).
    pub fn mean(&self) -> &Tensor1D<B> {
        &self.mean
    }

    /// Get the divisor for each feature.
    ///
    /// This is the population standard deviation, with 1.0 substituted for
    /// constant features (and everywhere if `with_std` is off).
    pub fn std(&self) -> &Tensor1D<B> {
        &self.scale
    }

    /// Flags, per feature, whether it was treated as constant.
    pub fn constant_features(&self) -> Vec<bool> {
        self.mask.to_vec().iter().map(|&m| m == 0.0).collect()
    }

    fn check_width(&self, data: &Tensor2D<B>) -> Result<(), PipelineError> {
        let cols = data.ncols();
        if cols != self.n_features {
            return Err(PipelineError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: cols,
            });
        }
        Ok(())
    }
}

impl<B: Backend> FittedTransformer<B> for FittedStandardScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PipelineError> {
        self.check_width(data)?;

        let mut result_data = data.data.clone();

        if self.config.with_mean {
            result_data = B::broadcast_sub_1d_to_2d_rows(&result_data, &self.mean.data);
        }

        if self.config.with_std {
            result_data = B::broadcast_div_1d_to_2d_rows(&result_data, &self.scale.data);
            result_data = B::broadcast_mul_1d_to_2d_rows(&result_data, &self.mask.data);
        }

        Ok(Tensor2D {
            data: result_data,
            backend: PhantomData,
        })
    }

    /// Maps scaled values back to the input space; constant features come
    /// back as their training mean.
    fn inverse_transform(&self, data: &Self::Output) -> Result<Self::Input, PipelineError> {
        self.check_width(data)?;

        let mut result_data = data.data.clone();

        if self.config.with_std {
            result_data = B::broadcast_mul_1d_to_2d_rows(&result_data, &self.mask.data);
            result_data = B::broadcast_mul_1d_to_2d_rows(&result_data, &self.scale.data);
        }

        if self.config.with_mean {
            result_data = B::broadcast_add_1d_to_2d_rows(&result_data, &self.mean.data);
        }

        Ok(Tensor2D {
            data: result_data,
            backend: PhantomData,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}
