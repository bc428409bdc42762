use super::Backend;

/// Pure-Rust backend storing tensors as row-major `Vec<f64>`.
#[derive(Clone, Debug, Copy)]
pub struct CpuBackend;

/// Row-major 2D tensor: `(data, rows, cols)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTensor2D(pub Vec<f64>, pub usize, pub usize);

impl CpuTensor2D {
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols, "Inconsistent shape");
        Self(data, rows, cols)
    }

    fn row(&self, i: usize) -> &[f64] {
        &self.0[i * self.2..(i + 1) * self.2]
    }
}

impl From<&[Vec<f64>]> for CpuTensor2D {
    fn from(x: &[Vec<f64>]) -> Self {
        if x.is_empty() {
            return CpuTensor2D::new(Vec::new(), 0, 0);
        }
        let rows = x.len();
        let cols = x[0].len();
        assert!(
            x.iter().all(|row| row.len() == cols),
            "All rows must have same length"
        );
        let data: Vec<f64> = x.iter().flat_map(|row| row.iter()).copied().collect();
        CpuTensor2D::new(data, rows, cols)
    }
}

fn broadcast_rows(t: &CpuTensor2D, v: &[f64], op: impl Fn(f64, f64) -> f64) -> CpuTensor2D {
    assert_eq!(t.2, v.len(), "Broadcast vector length must match column count");
    let data = t
        .0
        .chunks(t.2.max(1))
        .flat_map(|row| row.iter().zip(v.iter()).map(|(&x, &y)| op(x, y)))
        .collect();
    CpuTensor2D::new(data, t.1, t.2)
}

impl Backend for CpuBackend {
    type Tensor1D = Vec<f64>;
    type Tensor2D = CpuTensor2D;

    fn zeros_1d(len: usize) -> Self::Tensor1D {
        vec![0.; len]
    }

    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D {
        CpuTensor2D::new(vec![0.; rows * cols], rows, cols)
    }

    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D {
        data
    }

    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D {
        CpuTensor2D::new(data, rows, cols)
    }

    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64> {
        t.clone()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        (t.1, t.2)
    }

    fn ravel_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        t.0.clone()
    }

    fn col_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        let (rows, cols) = (t.1, t.2);
        if rows == 0 {
            return vec![0.; cols];
        }
        let mut sums = vec![0.; cols];
        for i in 0..rows {
            for (s, &x) in sums.iter_mut().zip(t.row(i)) {
                *s += x;
            }
        }
        sums.into_iter().map(|s| s / rows as f64).collect()
    }

    fn col_std_2d(t: &Self::Tensor2D, ddof: usize) -> Self::Tensor1D {
        let (rows, cols) = (t.1, t.2);
        if rows <= ddof {
            return vec![0.; cols];
        }
        let means = Self::col_mean_2d(t);
        let mut sq = vec![0.; cols];
        for i in 0..rows {
            for ((s, &x), &m) in sq.iter_mut().zip(t.row(i)).zip(means.iter()) {
                *s += (x - m) * (x - m);
            }
        }
        let denom = (rows - ddof) as f64;
        sq.into_iter().map(|s| (s / denom).sqrt()).collect()
    }

    fn broadcast_sub_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        broadcast_rows(t, v, |x, y| x - y)
    }

    fn broadcast_div_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        broadcast_rows(t, v, |x, y| x / y)
    }

    fn broadcast_mul_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        broadcast_rows(t, v, |x, y| x * y)
    }

    fn broadcast_add_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        broadcast_rows(t, v, |x, y| x + y)
    }

    fn binarize_2d(t: &Self::Tensor2D, threshold: f64) -> Self::Tensor2D {
        let data = t
            .0
            .iter()
            .map(|&x| if x > threshold { 1.0 } else { 0.0 })
            .collect();
        CpuTensor2D::new(data, t.1, t.2)
    }

    fn select_columns_2d(t: &Self::Tensor2D, columns: &[usize]) -> Self::Tensor2D {
        let (rows, cols) = (t.1, t.2);
        for &c in columns {
            assert!(c < cols, "Column index {} out of bounds ({} columns)", c, cols);
        }
        let mut data = Vec::with_capacity(rows * columns.len());
        for i in 0..rows {
            let row = t.row(i);
            data.extend(columns.iter().map(|&c| row[c]));
        }
        CpuTensor2D::new(data, rows, columns.len())
    }

    fn select_rows_2d(t: &Self::Tensor2D, rows: &[usize]) -> Self::Tensor2D {
        let mut data = Vec::with_capacity(rows.len() * t.2);
        for &r in rows {
            assert!(r < t.1, "Row index {} out of bounds ({} rows)", r, t.1);
            data.extend_from_slice(t.row(r));
        }
        CpuTensor2D::new(data, rows.len(), t.2)
    }

    fn select_1d(t: &Self::Tensor1D, indices: &[usize]) -> Self::Tensor1D {
        indices.iter().map(|&i| t[i]).collect()
    }
}
