//! Classification metrics.

use crate::backend::{Backend, Tensor1D};
use crate::error::PipelineError;

/// Fraction of predictions that exactly match the true labels.
///
/// # Errors
/// - [`PipelineError::InvalidShape`] if the vectors differ in length.
/// - [`PipelineError::EmptyData`] if both are empty.
///
/// # Example
/// ```
/// use tabular_nb::backend::{CpuBackend, Tensor1D};
/// use tabular_nb::metrics::accuracy_score;
///
/// let y_true = Tensor1D::<CpuBackend>::new(vec![0.0, 1.0, 1.0, 0.0]);
/// let y_pred = Tensor1D::<CpuBackend>::new(vec![0.0, 1.0, 0.0, 0.0]);
/// assert_eq!(accuracy_score(&y_true, &y_pred).unwrap(), 0.75);
/// ```
pub fn accuracy_score<B: Backend>(
    y_true: &Tensor1D<B>,
    y_pred: &Tensor1D<B>,
) -> Result<f64, PipelineError> {
    if y_true.len() != y_pred.len() {
        return Err(PipelineError::InvalidShape {
            expected: format!("{} predictions", y_true.len()),
            got: format!("{} predictions", y_pred.len()),
        });
    }
    if y_true.is_empty() {
        return Err(PipelineError::EmptyData(
            "Cannot score an empty prediction set".to_string(),
        ));
    }

    let correct = y_true
        .to_vec()
        .iter()
        .zip(y_pred.to_vec().iter())
        .filter(|(t, p)| t == p)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}
