use super::Backend;
use ndarray::{Array1, Array2, Axis};

/// CPU tensor backend implemented on top of the `ndarray` crate.
///
/// # Type mappings
/// - `Tensor1D`: `ndarray::Array1<f64>`
/// - `Tensor2D`: [`NdarrayTensor2D`] wrapper around `ndarray::Array2<f64>`
#[derive(Clone, Debug, Copy)]
pub struct NdarrayBackend;

/// Wrapper type for 2D tensors using ndarray's `Array2<f64>`.
///
/// # Example
/// ```
/// use tabular_nb::backend::NdarrayTensor2D;
/// let tensor = NdarrayTensor2D::from(&[
///     vec![1.0f64, 2.0f64, 3.0f64],
///     vec![4.0f64, 5.0f64, 6.0f64],
/// ][..]);
/// assert_eq!(tensor.0.shape(), &[2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct NdarrayTensor2D(pub Array2<f64>);

impl From<&[Vec<f64>]> for NdarrayTensor2D {
    /// # Panics
    /// Panics if rows have inconsistent lengths.
    fn from(x: &[Vec<f64>]) -> Self {
        let rows = x.len();
        if rows == 0 {
            return NdarrayTensor2D(Array2::zeros((0, 0)));
        }
        let cols = x[0].len();
        assert!(
            x.iter().all(|r| r.len() == cols),
            "All rows must have same length"
        );
        NdarrayTensor2D(Array2::from_shape_fn((rows, cols), |(i, j)| x[i][j]))
    }
}

impl Backend for NdarrayBackend {
    type Tensor1D = Array1<f64>;
    type Tensor2D = NdarrayTensor2D;

    fn zeros_1d(len: usize) -> Self::Tensor1D {
        Array1::zeros(len)
    }

    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D {
        NdarrayTensor2D(Array2::zeros((rows, cols)))
    }

    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D {
        Array1::from_vec(data)
    }

    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D {
        assert_eq!(data.len(), rows * cols, "Inconsistent shape");
        NdarrayTensor2D(Array2::from_shape_fn((rows, cols), |(i, j)| data[i * cols + j]))
    }

    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64> {
        t.to_vec()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        t.0.dim()
    }

    fn ravel_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        // iter() walks in logical (row-major) order regardless of memory layout
        t.0.iter().copied().collect()
    }

    fn col_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        let (rows, cols) = t.0.dim();
        if rows == 0 {
            return Array1::zeros(cols);
        }
        t.0.sum_axis(Axis(0)) / rows as f64
    }

    fn col_std_2d(t: &Self::Tensor2D, ddof: usize) -> Self::Tensor1D {
        let (rows, cols) = t.0.dim();
        if rows <= ddof {
            return Array1::zeros(cols);
        }
        let mean = Self::col_mean_2d(t);
        let centered = &t.0 - &mean;
        let sq = centered.mapv(|x| x * x).sum_axis(Axis(0));
        (sq / (rows - ddof) as f64).mapv(f64::sqrt)
    }

    fn broadcast_sub_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        assert_eq!(t.0.ncols(), v.len(), "Broadcast vector length must match column count");
        NdarrayTensor2D(&t.0 - v)
    }

    fn broadcast_div_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        assert_eq!(t.0.ncols(), v.len(), "Broadcast vector length must match column count");
        NdarrayTensor2D(&t.0 / v)
    }

    fn broadcast_mul_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        assert_eq!(t.0.ncols(), v.len(), "Broadcast vector length must match column count");
        NdarrayTensor2D(&t.0 * v)
    }

    fn broadcast_add_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        assert_eq!(t.0.ncols(), v.len(), "Broadcast vector length must match column count");
        NdarrayTensor2D(&t.0 + v)
    }

    fn binarize_2d(t: &Self::Tensor2D, threshold: f64) -> Self::Tensor2D {
        NdarrayTensor2D(t.0.mapv(|x| if x > threshold { 1.0 } else { 0.0 }))
    }

    fn select_columns_2d(t: &Self::Tensor2D, columns: &[usize]) -> Self::Tensor2D {
        let cols = t.0.ncols();
        for &c in columns {
            assert!(c < cols, "Column index {} out of bounds ({} columns)", c, cols);
        }
        NdarrayTensor2D(t.0.select(Axis(1), columns))
    }

    fn select_rows_2d(t: &Self::Tensor2D, rows: &[usize]) -> Self::Tensor2D {
        let n = t.0.nrows();
        for &r in rows {
            assert!(r < n, "Row index {} out of bounds ({} rows)", r, n);
        }
        NdarrayTensor2D(t.0.select(Axis(0), rows))
    }

    fn select_1d(t: &Self::Tensor1D, indices: &[usize]) -> Self::Tensor1D {
        t.select(Axis(0), indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NdarrayTensor2D {
        NdarrayBackend::from_vec_2d(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2)
    }

    #[test]
    fn test_ravel_is_row_major() {
        assert_eq!(
            NdarrayBackend::ravel_2d(&sample()).to_vec(),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        );
    }

    #[test]
    fn test_col_mean_and_std() {
        let t = sample();
        assert_eq!(NdarrayBackend::col_mean_2d(&t).to_vec(), vec![3.0, 4.0]);
        let std = NdarrayBackend::col_std_2d(&t, 0);
        let expected = (8.0f64 / 3.0).sqrt();
        assert!((std[0] - expected).abs() < 1e-12);
        assert!((std[1] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_broadcast_sub_div() {
        let t = sample();
        let v = Array1::from_vec(vec![1.0, 2.0]);
        let sub = NdarrayBackend::broadcast_sub_1d_to_2d_rows(&t, &v);
        assert_eq!(
            NdarrayBackend::ravel_2d(&sub).to_vec(),
            vec![0.0, 0.0, 2.0, 2.0, 4.0, 4.0]
        );
        let div = NdarrayBackend::broadcast_div_1d_to_2d_rows(&t, &v);
        assert_eq!(
            NdarrayBackend::ravel_2d(&div).to_vec(),
            vec![1.0, 1.0, 3.0, 2.0, 5.0, 3.0]
        );
    }

    #[test]
    fn test_binarize() {
        let t = NdarrayBackend::from_vec_2d(vec![-1.0, 0.0, 0.5, 2.0], 2, 2);
        let b = NdarrayBackend::binarize_2d(&t, 0.0);
        assert_eq!(NdarrayBackend::ravel_2d(&b).to_vec(), vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_select_rows_and_columns() {
        let t = sample();
        let rows = NdarrayBackend::select_rows_2d(&t, &[2, 0]);
        assert_eq!(NdarrayBackend::ravel_2d(&rows).to_vec(), vec![5.0, 6.0, 1.0, 2.0]);
        let cols = NdarrayBackend::select_columns_2d(&t, &[1]);
        assert_eq!(NdarrayBackend::ravel_2d(&cols).to_vec(), vec![2.0, 4.0, 6.0]);
        let none = NdarrayBackend::select_columns_2d(&t, &[]);
        assert_eq!(NdarrayBackend::shape(&none), (3, 0));
    }
}
