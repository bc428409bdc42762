//! Gaussian naive Bayes classifier.
//!
//! Each class `c` is modelled by a prior `P(c)` and, per feature `j`, a normal
//! distribution with mean `theta[c, j]` and variance `var[c, j]`. Prediction
//! returns the class maximizing the joint log-likelihood
//!
//! ```text
//! log P(c) - 0.5 * Σ_j [ ln(2π var[c, j]) + (x_j - theta[c, j])² / var[c, j] ]
//! ```
//!
//! Variances are the per-class population variances plus
//! `epsilon = var_smoothing * max_j Var(X[:, j])`, so they stay strictly
//! positive even for features that are constant within a class.

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::error::PipelineError;
use crate::model::state::{Fitted, Unfitted};
use crate::model::InferenceModel;
use crate::preprocessing::feature_selection::univariate::encode_classes;
use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::marker::PhantomData;

/// Fraction of the largest feature variance added to every class variance.
pub const DEFAULT_VAR_SMOOTHING: f64 = 1e-9;

const PRIOR_SUM_TOLERANCE: f64 = 1e-8;

/// Hyperparameters of [`GaussianNB`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianNbConfig {
    /// Portion of the largest feature variance added to variances; must be > 0.
    pub var_smoothing: f64,
    /// Class priors in ascending class order. `None` uses class frequencies.
    pub priors: Option<Vec<f64>>,
}

impl Default for GaussianNbConfig {
    fn default() -> Self {
        Self {
            var_smoothing: DEFAULT_VAR_SMOOTHING,
            priors: None,
        }
    }
}

#[derive(Clone, Debug)]
struct NbParams<B: Backend> {
    classes: Vec<f64>,
    class_count: Vec<usize>,
    class_prior: Vec<f64>,
    /// Per-class feature means, shape `(n_classes, n_features)`.
    theta: Tensor2D<B>,
    /// Per-class feature variances (smoothed), shape `(n_classes, n_features)`.
    var: Tensor2D<B>,
    epsilon: f64,
}

impl<B: Backend> NbParams<B> {
    fn empty() -> Self {
        Self {
            classes: Vec::new(),
            class_count: Vec::new(),
            class_prior: Vec::new(),
            theta: Tensor2D::zeros(0, 0),
            var: Tensor2D::zeros(0, 0),
            epsilon: 0.0,
        }
    }
}

/// Gaussian naive Bayes classifier in type-state form.
///
/// # Example
/// ```
/// use tabular_nb::backend::{CpuBackend, Tensor1D, Tensor2D};
/// use tabular_nb::model::{GaussianNB, InferenceModel};
///
/// let x = Tensor2D::<CpuBackend>::new(vec![1.0, 1.2, 0.9, 5.0, 5.3, 4.8], 6, 1);
/// let y = Tensor1D::<CpuBackend>::new(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
///
/// let model = GaussianNB::<CpuBackend>::new().fit(&x, &y).unwrap();
/// assert_eq!(model.predict(&Tensor1D::new(vec![4.5])).unwrap(), 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct GaussianNB<B: Backend, S = Unfitted> {
    config: GaussianNbConfig,
    params: NbParams<B>,
    _state: PhantomData<S>,
}

impl<B: Backend> Default for GaussianNB<B, Unfitted> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> GaussianNB<B, Unfitted> {
    pub fn new() -> Self {
        Self::from_config(GaussianNbConfig::default())
    }

    pub fn from_config(config: GaussianNbConfig) -> Self {
        Self {
            config,
            params: NbParams::empty(),
            _state: PhantomData,
        }
    }

    pub fn with_var_smoothing(mut self, var_smoothing: f64) -> Self {
        self.config.var_smoothing = var_smoothing;
        self
    }

    pub fn with_priors(mut self, priors: Vec<f64>) -> Self {
        self.config.priors = Some(priors);
        self
    }

    pub fn config(&self) -> &GaussianNbConfig {
        &self.config
    }

    /// Estimates class priors, per-class feature means and smoothed variances.
    ///
    /// Classes are the distinct label values in ascending order.
    ///
    /// # Errors
    /// - [`PipelineError::InvalidShape`] if `x` and `y` differ in row count.
    /// - [`PipelineError::EmptyData`] if there are no rows.
    /// - [`PipelineError::Configuration`] if `x` has no columns.
    /// - [`PipelineError::MissingValues`] for non-finite features or labels.
    /// - [`PipelineError::InvalidParameter`] for a non-positive `var_smoothing`
    ///   or unusable `priors`.
    pub fn fit(
        &self,
        x: &Tensor2D<B>,
        y: &Tensor1D<B>,
    ) -> Result<GaussianNB<B, Fitted>, PipelineError> {
        let (n_samples, n_features) = x.shape();
        if y.len() != n_samples {
            return Err(PipelineError::InvalidShape {
                expected: format!("{} labels", n_samples),
                got: format!("{} labels", y.len()),
            });
        }
        if n_samples == 0 {
            return Err(PipelineError::EmptyData(
                "Cannot fit GaussianNB on empty data".to_string(),
            ));
        }
        if n_features == 0 {
            return Err(PipelineError::Configuration(
                "GaussianNB needs at least one feature".to_string(),
            ));
        }
        if !x.all_finite() {
            return Err(PipelineError::MissingValues(
                "GaussianNB input contains NaN or infinite values".to_string(),
            ));
        }
        let var_smoothing = self.config.var_smoothing;
        if !(var_smoothing > 0.0 && var_smoothing.is_finite()) {
            return Err(PipelineError::InvalidParameter(format!(
                "var_smoothing must be positive and finite, got {}",
                var_smoothing
            )));
        }

        let (classes, assignment) = encode_classes(&y.to_vec())?;
        let n_classes = classes.len();

        let max_variance = x
            .col_std(0)
            .to_vec()
            .iter()
            .map(|s| s * s)
            .fold(0.0, f64::max);
        let epsilon = if max_variance > 0.0 {
            var_smoothing * max_variance
        } else {
            var_smoothing
        };

        let mut class_count = vec![0usize; n_classes];
        let mut theta = Vec::with_capacity(n_classes * n_features);
        let mut var = Vec::with_capacity(n_classes * n_features);

        for (c, count) in class_count.iter_mut().enumerate() {
            let rows: Vec<usize> = assignment
                .iter()
                .enumerate()
                .filter_map(|(i, &a)| (a == c).then_some(i))
                .collect();
            *count = rows.len();

            let subset = x.select_rows(&rows);
            theta.extend(subset.col_mean().to_vec());
            var.extend(subset.col_std(0).to_vec().iter().map(|s| s * s + epsilon));
        }

        let class_prior = match &self.config.priors {
            Some(priors) => validate_priors(priors, n_classes)?,
            None => class_count
                .iter()
                .map(|&count| count as f64 / n_samples as f64)
                .collect(),
        };

        debug!(
            "GaussianNB fitted: {} classes {:?}, {} features, epsilon={:.3e}",
            n_classes, classes, n_features, epsilon
        );

        Ok(GaussianNB {
            config: self.config.clone(),
            params: NbParams {
                classes,
                class_count,
                class_prior,
                theta: Tensor2D::new(theta, n_classes, n_features),
                var: Tensor2D::new(var, n_classes, n_features),
                epsilon,
            },
            _state: PhantomData,
        })
    }
}

fn validate_priors(priors: &[f64], n_classes: usize) -> Result<Vec<f64>, PipelineError> {
    if priors.len() != n_classes {
        return Err(PipelineError::InvalidParameter(format!(
            "got {} priors for {} classes",
            priors.len(),
            n_classes
        )));
    }
    if priors.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(PipelineError::InvalidParameter(
            "priors must be finite and non-negative".to_string(),
        ));
    }
    let sum: f64 = priors.iter().sum();
    if (sum - 1.0).abs() > PRIOR_SUM_TOLERANCE {
        return Err(PipelineError::InvalidParameter(format!(
            "priors must sum to 1, got {}",
            sum
        )));
    }
    Ok(priors.to_vec())
}

/// Index of the first maximum, so ties go to the lowest class.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

impl<B: Backend> GaussianNB<B, Fitted> {
    /// Class labels in ascending order.
    pub fn classes(&self) -> &[f64] {
        &self.params.classes
    }

    /// Number of training rows per class.
    pub fn class_count(&self) -> &[usize] {
        &self.params.class_count
    }

    /// Prior probability of each class.
    pub fn class_prior(&self) -> &[f64] {
        &self.params.class_prior
    }

    /// Per-class feature means, shape `(n_classes, n_features)`.
    pub fn theta(&self) -> &Tensor2D<B> {
        &self.params.theta
    }

    /// Per-class smoothed feature variances, shape `(n_classes, n_features)`.
    pub fn var(&self) -> &Tensor2D<B> {
        &self.params.var
    }

    /// Amount added to every variance during fit.
    pub fn epsilon(&self) -> f64 {
        self.params.epsilon
    }

    pub fn n_features_in(&self) -> usize {
        self.params.theta.ncols()
    }

    pub fn config(&self) -> &GaussianNbConfig {
        &self.config
    }

    /// Unnormalized log posterior of every class for every row,
    /// shape `(n_samples, n_classes)`.
    pub fn predict_joint_log_likelihood(
        &self,
        x: &Tensor2D<B>,
    ) -> Result<Tensor2D<B>, PipelineError> {
        let (n_samples, n_features) = x.shape();
        if n_features != self.n_features_in() {
            return Err(PipelineError::FeatureMismatch {
                expected_features: self.n_features_in(),
                got_features: n_features,
            });
        }

        let theta = self.params.theta.to_rows();
        let var = self.params.var.to_rows();
        let n_classes = theta.len();

        // log P(c) - 0.5 * Σ ln(2π var) does not depend on the row
        let offsets: Vec<f64> = self
            .params
            .class_prior
            .iter()
            .zip(var.iter())
            .map(|(&prior, v)| {
                prior.ln() - 0.5 * v.iter().map(|&s| (2.0 * PI * s).ln()).sum::<f64>()
            })
            .collect();

        let mut jll = Vec::with_capacity(n_samples * n_classes);
        for row in x.to_rows() {
            for c in 0..n_classes {
                let mahalanobis: f64 = row
                    .iter()
                    .zip(theta[c].iter().zip(var[c].iter()))
                    .map(|(&xj, (&mu, &s))| (xj - mu) * (xj - mu) / s)
                    .sum();
                jll.push(offsets[c] - 0.5 * mahalanobis);
            }
        }
        Ok(Tensor2D::new(jll, n_samples, n_classes))
    }

    /// Log class probabilities, normalized with log-sum-exp.
    pub fn predict_log_proba(&self, x: &Tensor2D<B>) -> Result<Tensor2D<B>, PipelineError> {
        let jll = self.predict_joint_log_likelihood(x)?;
        let (n_samples, n_classes) = jll.shape();
        let normalized = jll
            .to_rows()
            .iter()
            .flat_map(|row| {
                let norm = log_sum_exp(row);
                row.iter().map(move |v| v - norm).collect::<Vec<_>>()
            })
            .collect();
        Ok(Tensor2D::new(normalized, n_samples, n_classes))
    }

    /// Class probabilities; each row sums to 1.
    pub fn predict_proba(&self, x: &Tensor2D<B>) -> Result<Tensor2D<B>, PipelineError> {
        let log_proba = self.predict_log_proba(x)?;
        let (n_samples, n_classes) = log_proba.shape();
        let proba = log_proba.ravel().to_vec().iter().map(|v| v.exp()).collect();
        Ok(Tensor2D::new(proba, n_samples, n_classes))
    }
}

impl<B: Backend> InferenceModel<B> for GaussianNB<B, Fitted> {
    type InputSingle = Tensor1D<B>;
    type OutputSingle = f64;
    type InputBatch = Tensor2D<B>;
    type OutputBatch = Tensor1D<B>;

    fn predict(&self, input: &Self::InputSingle) -> Result<Self::OutputSingle, PipelineError> {
        let row = Tensor2D::new(input.to_vec(), 1, input.len());
        let labels = self.predict_batch(&row)?.to_vec();
        labels.first().copied().ok_or_else(|| {
            PipelineError::NumericalError("prediction produced no label".to_string())
        })
    }

    fn predict_batch(&self, input: &Self::InputBatch) -> Result<Self::OutputBatch, PipelineError> {
        let jll = self.predict_joint_log_likelihood(input)?;
        let labels = jll
            .to_rows()
            .iter()
            .map(|row| self.params.classes[argmax(row)])
            .collect();
        Ok(Tensor1D::new(labels))
    }
}
