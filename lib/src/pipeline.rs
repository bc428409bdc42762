//! The complete classification workflow: preprocessing chain plus classifier.
//!
//! [`ClassificationPipeline::fit`] fits and applies each preprocessing stage in
//! order, feeding every stage the previous stage's output, and then fits the
//! Gaussian naive Bayes classifier on the final matrix. Prediction replays the
//! learned transforms without refitting.

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::error::PipelineError;
use crate::metrics::accuracy_score;
use crate::model::{Fitted, GaussianNB, GaussianNbConfig, InferenceModel, Unfitted};
use crate::preprocessing::{
    Binarizer, BinarizerConfig, FittedPipeline, FittedTransformer, Pipeline, SelectFwe,
    SelectFweConfig, StandardScaler, StandardScalerConfig,
};
use log::info;
use serde::{Deserialize, Serialize};

/// Family-wise error rate of the selection stage in the default pipeline.
pub const DEFAULT_PIPELINE_ALPHA: f64 = 0.008;

/// Hyperparameters of all four stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub binarizer: BinarizerConfig,
    pub selector: SelectFweConfig,
    pub scaler: StandardScalerConfig,
    pub classifier: GaussianNbConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            binarizer: BinarizerConfig::default(),
            selector: SelectFweConfig {
                alpha: DEFAULT_PIPELINE_ALPHA,
            },
            scaler: StandardScalerConfig::default(),
            classifier: GaussianNbConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.binarizer.threshold = threshold;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.selector.alpha = alpha;
        self
    }

    pub fn with_var_smoothing(mut self, var_smoothing: f64) -> Self {
        self.classifier.var_smoothing = var_smoothing;
        self
    }
}

/// Binarizer, SelectFwe and StandardScaler followed by Gaussian naive Bayes.
#[derive(Clone, Debug)]
pub struct ClassificationPipeline<B: Backend> {
    preprocessing: Pipeline<B>,
    classifier: GaussianNB<B, Unfitted>,
}

impl<B: Backend> Default for ClassificationPipeline<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> ClassificationPipeline<B> {
    /// Pipeline with [`PipelineConfig::default`] hyperparameters.
    pub fn new() -> Self {
        Self::from_config(&PipelineConfig::default())
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        let preprocessing = Pipeline::new()
            .add_binarizer(Binarizer::from_config(config.binarizer.clone()))
            .add_select_fwe(SelectFwe::from_config(config.selector.clone()))
            .add_standard_scaler(StandardScaler::from_config(config.scaler.clone()));
        Self {
            preprocessing,
            classifier: GaussianNB::from_config(config.classifier.clone()),
        }
    }

    /// Fits every stage on `x` and `y`.
    ///
    /// Calling `fit` again produces an independent fitted pipeline; nothing is
    /// carried over from earlier fits.
    ///
    /// # Errors
    /// - [`PipelineError::InvalidShape`] if `x` and `y` differ in row count.
    /// - [`PipelineError::MissingValues`] if `x` contains NaN or infinite values.
    /// - [`PipelineError::Configuration`] if selection keeps no feature.
    /// - Any error raised by an individual stage.
    pub fn fit(
        &self,
        x: &Tensor2D<B>,
        y: &Tensor1D<B>,
    ) -> Result<FittedClassificationPipeline<B>, PipelineError> {
        if x.nrows() != y.len() {
            return Err(PipelineError::InvalidShape {
                expected: format!("{} labels", x.nrows()),
                got: format!("{} labels", y.len()),
            });
        }
        check_finite(x)?;

        let (preprocessing, transformed) = self.preprocessing.fit_with_output(x, y)?;
        let classifier = self.classifier.fit(&transformed, y)?;

        info!(
            "Pipeline fitted on {} rows: kept {}/{} features {:?}, classes {:?}",
            x.nrows(),
            preprocessing.n_features_out(),
            x.ncols(),
            preprocessing.feature_indices(),
            classifier.classes()
        );

        Ok(FittedClassificationPipeline {
            preprocessing,
            classifier,
        })
    }
}

fn check_finite<B: Backend>(x: &Tensor2D<B>) -> Result<(), PipelineError> {
    if x.all_finite() {
        Ok(())
    } else {
        Err(PipelineError::MissingValues(
            "feature matrix contains NaN or infinite values".to_string(),
        ))
    }
}

/// A fitted [`ClassificationPipeline`].
#[derive(Clone, Debug)]
pub struct FittedClassificationPipeline<B: Backend> {
    preprocessing: FittedPipeline<B>,
    classifier: GaussianNB<B, Fitted>,
}

impl<B: Backend> FittedClassificationPipeline<B> {
    /// Runs the learned transforms on `x`, without refitting.
    ///
    /// # Errors
    /// [`PipelineError::FeatureMismatch`] if `x` does not have the training
    /// column count, [`PipelineError::MissingValues`] for non-finite input.
    pub fn transform(&self, x: &Tensor2D<B>) -> Result<Tensor2D<B>, PipelineError> {
        if x.ncols() != self.n_features_in() {
            return Err(PipelineError::FeatureMismatch {
                expected_features: self.n_features_in(),
                got_features: x.ncols(),
            });
        }
        check_finite(x)?;
        self.preprocessing.transform(x)
    }

    /// One predicted label per row of `x`, in row order.
    pub fn predict(&self, x: &Tensor2D<B>) -> Result<Tensor1D<B>, PipelineError> {
        let transformed = self.transform(x)?;
        self.classifier.predict_batch(&transformed)
    }

    /// Class probabilities, shape `(n_samples, n_classes)`, columns in
    /// [`classes`](Self::classes) order.
    pub fn predict_proba(&self, x: &Tensor2D<B>) -> Result<Tensor2D<B>, PipelineError> {
        let transformed = self.transform(x)?;
        self.classifier.predict_proba(&transformed)
    }

    /// Accuracy of [`predict`](Self::predict) against `y`.
    pub fn score(&self, x: &Tensor2D<B>, y: &Tensor1D<B>) -> Result<f64, PipelineError> {
        let predictions = self.predict(x)?;
        accuracy_score(y, &predictions)
    }

    pub fn classes(&self) -> &[f64] {
        self.classifier.classes()
    }

    /// Original column indices that survived selection, in ascending order.
    pub fn selected_features(&self) -> &[usize] {
        self.preprocessing.feature_indices()
    }

    pub fn n_features_in(&self) -> usize {
        self.preprocessing.n_features_in()
    }

    /// Stage names in application order, classifier last.
    pub fn step_names(&self) -> Vec<&'static str> {
        let mut names = self.preprocessing.step_names();
        names.push("GaussianNB");
        names
    }

    pub fn preprocessing(&self) -> &FittedPipeline<B> {
        &self.preprocessing
    }

    pub fn classifier(&self) -> &GaussianNB<B, Fitted> {
        &self.classifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    /// Column 0's sign matches the label; column 1 is positive everywhere.
    fn create_test_data() -> (Tensor2D<CpuBackend>, Tensor1D<CpuBackend>) {
        let x = Tensor2D::from_rows(&[
            vec![1.5, 0.2],
            vec![-0.7, 0.9],
            vec![2.0, 0.4],
            vec![-1.1, 0.3],
            vec![0.3, 0.8],
            vec![-2.4, 0.1],
        ]);
        let y = Tensor1D::new(vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        (x, y)
    }

    #[test]
    fn test_default_config_values() {
        let config = PipelineConfig::default();
        assert_eq!(config.binarizer.threshold, 0.0);
        assert_eq!(config.selector.alpha, 0.008);
        assert!(config.scaler.with_mean && config.scaler.with_std);
        assert_eq!(config.classifier.var_smoothing, 1e-9);
        assert!(config.classifier.priors.is_none());
    }

    #[test]
    fn test_config_partial_json() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"selector": {"alpha": 0.05}}"#).unwrap();
        assert_eq!(config.selector.alpha, 0.05);
        // Omitted sections keep their defaults
        assert_eq!(config.binarizer, BinarizerConfig::default());
        assert_eq!(config.classifier, GaussianNbConfig::default());
    }

    #[test]
    fn test_fit_predict_separable() {
        let (x, y) = create_test_data();
        let fitted = ClassificationPipeline::<CpuBackend>::new().fit(&x, &y).unwrap();

        assert_eq!(fitted.selected_features(), &[0]);
        assert_eq!(fitted.classes(), &[0.0, 1.0]);
        assert_eq!(fitted.n_features_in(), 2);
        assert_eq!(
            fitted.step_names(),
            vec!["Binarizer", "SelectFwe", "StandardScaler", "GaussianNB"]
        );
        assert_eq!(fitted.predict(&x).unwrap().to_vec(), y.to_vec());
        assert_eq!(fitted.score(&x, &y).unwrap(), 1.0);
    }

    #[test]
    fn test_predict_proba_shape() {
        let (x, y) = create_test_data();
        let fitted = ClassificationPipeline::<CpuBackend>::new().fit(&x, &y).unwrap();
        let proba = fitted.predict_proba(&x).unwrap();
        assert_eq!(proba.shape(), (6, 2));
        for row in proba.to_rows() {
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_toy_binary_scenario() {
        let x = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0], vec![-1.0], vec![1.0], vec![-1.0]]);
        let y = Tensor1D::<CpuBackend>::new(vec![0.0, 1.0, 0.0, 1.0]);
        let fitted = ClassificationPipeline::<CpuBackend>::from_config(
            &PipelineConfig::default().with_alpha(0.05),
        )
        .fit(&x, &y)
        .unwrap();

        let query = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0], vec![-3.0]]);
        assert_eq!(fitted.predict(&query).unwrap().to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_no_feature_survives_selection() {
        // Binarized column is identical for both classes
        let x = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0], vec![1.0], vec![2.0], vec![3.0]]);
        let y = Tensor1D::<CpuBackend>::new(vec![0.0, 0.0, 1.0, 1.0]);
        let result = ClassificationPipeline::<CpuBackend>::new().fit(&x, &y);
        assert!(matches!(result, Err(PipelineError::Configuration(_))));
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let (x, _) = create_test_data();
        let pipeline = ClassificationPipeline::<CpuBackend>::new();

        let short_y = Tensor1D::<CpuBackend>::new(vec![0.0, 1.0]);
        assert!(matches!(
            pipeline.fit(&x, &short_y),
            Err(PipelineError::InvalidShape { .. })
        ));

        let nan_x = Tensor2D::<CpuBackend>::from_rows(&[vec![f64::NAN], vec![1.0]]);
        let y = Tensor1D::<CpuBackend>::new(vec![0.0, 1.0]);
        assert!(matches!(
            pipeline.fit(&nan_x, &y),
            Err(PipelineError::MissingValues(_))
        ));
    }

    #[test]
    fn test_predict_rejects_bad_input() {
        let (x, y) = create_test_data();
        let fitted = ClassificationPipeline::<CpuBackend>::new().fit(&x, &y).unwrap();

        let wide = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 2.0, 3.0]]);
        assert!(matches!(
            fitted.predict(&wide),
            Err(PipelineError::FeatureMismatch {
                expected_features: 2,
                got_features: 3
            })
        ));

        let inf = Tensor2D::<CpuBackend>::from_rows(&[vec![f64::INFINITY, 0.0]]);
        assert!(matches!(
            fitted.predict(&inf),
            Err(PipelineError::MissingValues(_))
        ));
    }

    #[test]
    fn test_refit_replaces_learned_state() {
        let (x, y) = create_test_data();
        let pipeline = ClassificationPipeline::<CpuBackend>::new();
        let first = pipeline.fit(&x, &y).unwrap();

        // Flip the labels: column 0 now predicts the opposite class
        let flipped = Tensor1D::<CpuBackend>::new(y.to_vec().iter().map(|v| 1.0 - v).collect());
        let second = pipeline.fit(&x, &flipped).unwrap();

        assert_eq!(first.predict(&x).unwrap().to_vec(), y.to_vec());
        assert_eq!(second.predict(&x).unwrap().to_vec(), flipped.to_vec());
    }

    #[test]
    fn test_predict_twice_is_identical() {
        let (x, y) = create_test_data();
        let fitted = ClassificationPipeline::<CpuBackend>::new().fit(&x, &y).unwrap();
        let query = Tensor2D::<CpuBackend>::from_rows(&[vec![0.4, 2.0], vec![-0.1, 0.5]]);

        let first = fitted.predict(&query).unwrap().to_vec();
        let second = fitted.predict(&query).unwrap().to_vec();
        assert_eq!(first, second);
        assert_eq!(
            fitted.predict_proba(&query).unwrap().to_rows(),
            fitted.predict_proba(&query).unwrap().to_rows()
        );
    }

    #[test]
    fn test_grouped_toy_labels_leave_no_feature() {
        // After binarization both classes hold one 1 and one 0
        let x = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0], vec![-1.0], vec![1.0], vec![-1.0]]);
        let y = Tensor1D::<CpuBackend>::new(vec![0.0, 0.0, 1.0, 1.0]);
        match ClassificationPipeline::<CpuBackend>::new().fit(&x, &y) {
            Err(PipelineError::Configuration(msg)) => assert!(msg.contains("SelectFwe")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }
}
