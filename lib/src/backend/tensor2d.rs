use crate::backend::Backend;
use std::marker::PhantomData;

use super::tensor1d::Tensor1D;

/// Backend-typed 2D tensor of shape `(rows, cols)`, rows being samples and
/// columns being features.
#[derive(Clone)]
pub struct Tensor2D<B: Backend> {
    pub(crate) data: B::Tensor2D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Tensor2D<B> {
    /// Creates a tensor from row-major values.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        Self {
            data: B::from_vec_2d(data, rows, cols),
            backend: PhantomData,
        }
    }

    /// Creates a tensor from a slice of equally sized rows.
    ///
    /// An empty slice yields a `(0, 0)` tensor.
    ///
    /// # Panics
    /// If rows have different lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let n = rows.len();
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        assert!(
            rows.iter().all(|r| r.len() == cols),
            "All rows must have same length"
        );
        let flat = rows.iter().flatten().copied().collect();
        Self::new(flat, n, cols)
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: B::zeros_2d(rows, cols),
            backend: PhantomData,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        B::shape(&self.data)
    }

    pub fn nrows(&self) -> usize {
        self.shape().0
    }

    pub fn ncols(&self) -> usize {
        self.shape().1
    }

    /// Flattens into a row-major 1D tensor.
    pub fn ravel(&self) -> Tensor1D<B> {
        Tensor1D {
            data: B::ravel_2d(&self.data),
            backend: PhantomData,
        }
    }

    /// Copies the tensor into host rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        let (_, cols) = self.shape();
        let flat = self.ravel().to_vec();
        if cols == 0 {
            return vec![Vec::new(); self.nrows()];
        }
        flat.chunks(cols).map(<[f64]>::to_vec).collect()
    }

    /// Per-column mean.
    pub fn col_mean(&self) -> Tensor1D<B> {
        Tensor1D {
            data: B::col_mean_2d(&self.data),
            backend: PhantomData,
        }
    }

    /// Per-column standard deviation with `ddof` delta degrees of freedom.
    pub fn col_std(&self, ddof: usize) -> Tensor1D<B> {
        Tensor1D {
            data: B::col_std_2d(&self.data, ddof),
            backend: PhantomData,
        }
    }

    /// Keeps the given columns, in the given order.
    pub fn select_columns(&self, columns: &[usize]) -> Self {
        Self {
            data: B::select_columns_2d(&self.data, columns),
            backend: PhantomData,
        }
    }

    /// Keeps the given rows, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            data: B::select_rows_2d(&self.data, rows),
            backend: PhantomData,
        }
    }

    /// Returns `true` if every element is finite.
    pub fn all_finite(&self) -> bool {
        self.ravel().to_vec().iter().all(|x| x.is_finite())
    }
}

impl<B: Backend> std::fmt::Debug for Tensor2D<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor2D")
            .field("shape", &self.shape())
            .field("rows", &self.to_rows())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    #[test]
    fn test_tensor2d_shape() {
        let t = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0], 3, 1);
        assert_eq!(t.shape(), (3, 1));

        let t2 = Tensor2D::<CpuBackend>::zeros(0, 5);
        assert_eq!(t2.shape(), (0, 5));
    }

    #[test]
    fn test_tensor2d_from_rows_roundtrip() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let t = Tensor2D::<CpuBackend>::from_rows(&rows);
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.to_rows(), rows);
    }

    #[test]
    fn test_tensor2d_from_rows_empty() {
        let t = Tensor2D::<CpuBackend>::from_rows(&[]);
        assert_eq!(t.shape(), (0, 0));
        assert!(t.to_rows().is_empty());
    }

    #[test]
    fn test_tensor2d_zero_width_rows() {
        let t = Tensor2D::<CpuBackend>::zeros(2, 0);
        assert_eq!(t.to_rows(), vec![Vec::<f64>::new(), Vec::new()]);
    }

    #[test]
    fn test_tensor2d_selection() {
        let t = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
        assert_eq!(t.select_columns(&[1]).ravel().to_vec(), vec![2.0, 4.0]);
        assert_eq!(t.select_rows(&[1]).ravel().to_vec(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_tensor2d_all_finite() {
        let ok = Tensor2D::<CpuBackend>::new(vec![1.0, -2.0], 1, 2);
        assert!(ok.all_finite());
        let bad = Tensor2D::<CpuBackend>::new(vec![1.0, f64::NAN], 1, 2);
        assert!(!bad.all_finite());
    }
}
