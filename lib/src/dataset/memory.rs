use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::dataset::Dataset;
use crate::error::PipelineError;

/// A dataset held entirely in memory, one `Vec<f64>` per row.
///
/// Invariant: every row has the same width, and there is exactly one label per row.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    x: Vec<Vec<f64>>,
    y: Vec<f64>,
    feature_names: Vec<String>,
}

impl InMemoryDataset {
    /// Builds a dataset with generated feature names (`x0`, `x1`, ...).
    ///
    /// # Errors
    /// [`PipelineError::InvalidShape`] if `x` and `y` differ in length or rows
    /// differ in width, [`PipelineError::EmptyData`] if there are no rows.
    pub fn new(x: Vec<Vec<f64>>, y: Vec<f64>) -> Result<Self, PipelineError> {
        let n_features = x.first().map(Vec::len).unwrap_or(0);
        let names = (0..n_features).map(|i| format!("x{}", i)).collect();
        Self::with_feature_names(x, y, names)
    }

    /// Builds a dataset with explicit feature names.
    pub fn with_feature_names(
        x: Vec<Vec<f64>>,
        y: Vec<f64>,
        feature_names: Vec<String>,
    ) -> Result<Self, PipelineError> {
        if x.len() != y.len() {
            return Err(PipelineError::InvalidShape {
                expected: format!("{} labels", x.len()),
                got: format!("{} labels", y.len()),
            });
        }
        if x.is_empty() {
            return Err(PipelineError::EmptyData("Dataset is empty".to_string()));
        }
        let n_features = feature_names.len();
        if let Some((i, row)) = x.iter().enumerate().find(|(_, r)| r.len() != n_features) {
            return Err(PipelineError::InvalidShape {
                expected: format!("{} features", n_features),
                got: format!("{} features in row {}", row.len(), i),
            });
        }
        Ok(Self {
            x,
            y,
            feature_names,
        })
    }

    /// Feature column names, in column order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Labels, in row order.
    pub fn targets(&self) -> &[f64] {
        &self.y
    }

    /// Feature rows, in row order.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.x
    }
}

impl Dataset for InMemoryDataset {
    fn len(&self) -> usize {
        self.x.len()
    }

    fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    fn get_rows<B: Backend>(
        &self,
        indices: &[usize],
    ) -> Result<(Tensor2D<B>, Tensor1D<B>), PipelineError> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.x.len()) {
            return Err(PipelineError::InvalidParameter(format!(
                "row index {} out of range for dataset of {} rows",
                bad,
                self.x.len()
            )));
        }

        let n_features = self.n_features();
        let data = indices
            .iter()
            .flat_map(|&i| self.x[i].iter())
            .copied()
            .collect();
        let x_tensor = Tensor2D::<B>::new(data, indices.len(), n_features);
        let y_tensor = Tensor1D::<B>::new(indices.iter().map(|&i| self.y[i]).collect());

        Ok((x_tensor, y_tensor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    fn sample() -> InMemoryDataset {
        InMemoryDataset::new(
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            vec![0.0, 1.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn test_new_generates_names() {
        let ds = sample();
        assert_eq!(ds.feature_names(), &["x0".to_string(), "x1".to_string()]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.n_features(), 2);
        assert!(!ds.is_empty());
    }

    #[test]
    fn test_length_mismatch() {
        let result = InMemoryDataset::new(vec![vec![1.0]], vec![0.0, 1.0]);
        assert!(matches!(result, Err(PipelineError::InvalidShape { .. })));
    }

    #[test]
    fn test_ragged_rows() {
        let result = InMemoryDataset::new(vec![vec![1.0, 2.0], vec![3.0]], vec![0.0, 1.0]);
        assert!(matches!(result, Err(PipelineError::InvalidShape { .. })));
    }

    #[test]
    fn test_empty() {
        let result = InMemoryDataset::new(vec![], vec![]);
        assert!(matches!(result, Err(PipelineError::EmptyData(_))));
    }

    #[test]
    fn test_get_rows_in_order() {
        let ds = sample();
        let (x, y) = ds.get_rows::<CpuBackend>(&[2, 0]).unwrap();
        assert_eq!(x.to_rows(), vec![vec![5.0, 6.0], vec![1.0, 2.0]]);
        assert_eq!(y.to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_get_rows_out_of_range() {
        let ds = sample();
        let result = ds.get_rows::<CpuBackend>(&[3]);
        assert!(matches!(result, Err(PipelineError::InvalidParameter(_))));
    }

    #[test]
    fn test_to_tensors() {
        let ds = sample();
        let (x, y) = ds.to_tensors::<CpuBackend>().unwrap();
        assert_eq!(x.shape(), (3, 2));
        assert_eq!(y.to_vec(), vec![0.0, 1.0, 0.0]);
    }
}
