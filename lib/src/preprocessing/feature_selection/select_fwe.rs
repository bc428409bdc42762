//! Family-wise error rate feature selection.
//!
//! Scores every feature with [`f_classif`] and keeps those whose p-value is
//! below `alpha / n_features` (Bonferroni correction). Kept columns retain
//! their original relative order.

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::error::PipelineError;
use crate::preprocessing::feature_selection::univariate::f_classif;
use crate::preprocessing::traits::{FittedTransformer, SupervisedTransformer};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Family-wise error rate used when none is configured.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Configuration for SelectFwe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectFweConfig {
    /// Highest uncorrected p-value for features to be kept, in `(0, 1]`.
    pub alpha: f64,
}

impl Default for SelectFweConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}

/// Univariate selector controlling the family-wise error rate (unfitted).
///
/// # Example
/// ```
/// use tabular_nb::backend::{CpuBackend, Tensor1D, Tensor2D};
/// use tabular_nb::preprocessing::{SelectFwe, SupervisedTransformer};
///
/// // Column 0 separates the classes, column 1 is noise.
/// let x = Tensor2D::<CpuBackend>::new(
///     vec![0.0, 1.0, 0.1, 5.0, 0.2, 3.0, 5.0, 2.0, 5.1, 4.0, 5.2, 1.0],
///     6,
///     2,
/// );
/// let y = Tensor1D::<CpuBackend>::new(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
///
/// let fitted = SelectFwe::<CpuBackend>::new().with_alpha(0.01).fit(&x, &y).unwrap();
/// assert_eq!(fitted.selected_indices(), &[0]);
/// ```
#[derive(Clone, Debug)]
pub struct SelectFwe<B: Backend> {
    config: SelectFweConfig,
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for SelectFwe<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> SelectFwe<B> {
    pub fn new() -> Self {
        Self::from_config(SelectFweConfig::default())
    }

    pub fn from_config(config: SelectFweConfig) -> Self {
        Self {
            config,
            _backend: PhantomData,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.config.alpha
    }
}

impl<B: Backend> SupervisedTransformer<B> for SelectFwe<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Fitted = FittedSelectFwe<B>;

    fn fit(
        &self,
        data: &Self::Input,
        targets: &Tensor1D<B>,
    ) -> Result<Self::Fitted, PipelineError> {
        let alpha = self.config.alpha;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(PipelineError::InvalidParameter(format!(
                "SelectFwe alpha must be in (0, 1], got {}",
                alpha
            )));
        }

        let result = f_classif(data, targets)?;
        let n_features = result.pvalues.len();
        let cutoff = alpha / n_features.max(1) as f64;

        // NaN compares false, so undefined p-values are never kept
        let support: Vec<bool> = result.pvalues.iter().map(|&p| p < cutoff).collect();
        let selected: Vec<usize> = support
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();

        if selected.is_empty() {
            warn!(
                "SelectFwe: no feature has p < {:.3e} (alpha={} over {} features)",
                cutoff, alpha, n_features
            );
        }
        debug!(
            "SelectFwe kept {} of {} features: {:?}",
            selected.len(),
            n_features,
            selected
        );

        Ok(FittedSelectFwe {
            scores: result.scores,
            pvalues: result.pvalues,
            support,
            selected,
            n_features,
            _backend: PhantomData,
        })
    }
}

/// Fitted SelectFwe ready for inference.
#[derive(Clone, Debug)]
pub struct FittedSelectFwe<B: Backend> {
    scores: Vec<f64>,
    pvalues: Vec<f64>,
    support: Vec<bool>,
    selected: Vec<usize>,
    n_features: usize,
    _backend: PhantomData<B>,
}

impl<B: Backend> FittedSelectFwe<B> {
    /// ANOVA F statistic per input feature.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Uncorrected p-value per input feature.
    pub fn pvalues(&self) -> &[f64] {
        &self.pvalues
    }

    /// Boolean mask over input features, `true` if kept.
    pub fn support(&self) -> &[bool] {
        &self.support
    }

    /// Indices of kept features, ascending.
    pub fn selected_indices(&self) -> &[usize] {
        &self.selected
    }
}

impl<B: Backend> FittedTransformer<B> for FittedSelectFwe<B> {
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
        Ok(data.select_columns(&self.selected))
    }

    /// Restores the input width, with removed features set to 0.0.
    fn inverse_transform(&self, data: &Self::Output) -> Result<Self::Input, PipelineError> {
        let (rows, cols) = data.shape();
        if cols != self.selected.len() {
            return Err(PipelineError::FeatureMismatch {
                expected_features: self.selected.len(),
                got_features: cols,
            });
        }

        let mut restored = vec![0.0; rows * self.n_features];
        for (i, row) in data.to_rows().iter().enumerate() {
            let out = &mut restored[i * self.n_features..(i + 1) * self.n_features];
            for (&value, &j) in row.iter().zip(self.selected.iter()) {
                out[j] = value;
            }
        }
        Ok(Tensor2D::new(restored, rows, self.n_features))
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }

    fn n_features_out(&self) -> usize {
        self.selected.len()
    }
}
