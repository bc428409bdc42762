//! # Backend Abstraction
//!
//! This module provides a trait-based abstraction over computation backends,
//! so transformers and classifiers run unchanged on any tensor library that
//! implements [`Backend`].
//!
//! ## Design Philosophy
//!
//! - **Minimal trait surface**: Only the operations the preprocessing stages and
//!   the naive-Bayes classifier need are exposed.
//! - **Zero-cost generics**: Backend selection happens at compile time via type
//!   parameters, avoiding runtime dispatch.
//! - **Type-safe tensor handling**: Each backend defines its own tensor types,
//!   wrapped by [`Tensor1D`] and [`Tensor2D`] so that tensors from different
//!   backends cannot be mixed.
//! - **Feature-gated implementations**: Backends are enabled via Cargo features
//!   (`cpu`, `ndarray`).
//!
//! ## Available Backends
//!
//! | Backend          | Feature   | Use Case                          |
//! |------------------|-----------|-----------------------------------|
//! | `CpuBackend`     | `cpu`     | Default, pure-Rust implementation |
//! | `NdarrayBackend` | `ndarray` | Interop with `ndarray` ecosystem  |
//!
//! ## Example
//!
//! ```rust
//! use tabular_nb::backend::{CpuBackend, Tensor2D};
//!
//! let x: Tensor2D<CpuBackend> = Tensor2D::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
//! assert_eq!(x.col_mean().to_vec(), vec![2.0, 3.0]);
//! ```

#[cfg(feature = "cpu")]
pub mod cpu;
#[cfg(feature = "cpu")]
/// Pure-Rust CPU backend implementation with zero external dependencies.
pub use cpu::{CpuBackend, CpuTensor2D};

#[cfg(feature = "ndarray")]
mod ndarray_backend;
#[cfg(feature = "ndarray")]
/// Backend backed by the `ndarray` crate for ecosystem interoperability.
pub use ndarray_backend::{NdarrayBackend, NdarrayTensor2D};

/// One-dimensional tensor abstraction.
pub mod tensor1d;
/// Two-dimensional tensor abstraction.
pub mod tensor2d;

pub use tensor1d::Tensor1D;
pub use tensor2d::Tensor2D;

/// Abstraction over tensor storage and the numeric primitives of the pipeline.
///
/// All values are `f64`. 2D tensors are addressed row-major: row `i`, column
/// `j` of an `(rows, cols)` tensor is element `i * cols + j` of its ravelled
/// form.
///
/// # Panics
///
/// Operations taking two tensors panic on incompatible shapes; the typed
/// wrappers and the transformers validate shapes before calling in.
pub trait Backend: Clone + Copy + 'static {
    /// One-dimensional tensor type.
    type Tensor1D: Clone + Send + Sync;

    /// Two-dimensional tensor type.
    type Tensor2D: Clone + Send + Sync;

    // --- Constructors ---

    /// Creates a 1D tensor filled with zeros of given length.
    fn zeros_1d(len: usize) -> Self::Tensor1D;

    /// Creates a 2D tensor filled with zeros of given dimensions.
    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D;

    /// Constructs a 1D tensor from owned data.
    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D;

    /// Constructs a 2D tensor from row-major ordered data.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D;

    // --- Data access ---

    /// Converts a 1D tensor to a Vec of f64 values.
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64>;

    /// Returns the number of elements in a 1D tensor.
    fn len_1d(t: &Self::Tensor1D) -> usize;

    /// Returns the shape of a 2D tensor as (rows, cols).
    fn shape(t: &Self::Tensor2D) -> (usize, usize);

    /// Flattens a 2D tensor into a row-major 1D tensor.
    fn ravel_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    // --- Column-wise reductions ---

    /// Computes the mean of each column.
    ///
    /// Returns zeros for a tensor with no rows.
    fn col_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    /// Computes the standard deviation of each column.
    ///
    /// # Arguments
    /// * `ddof` - Delta degrees of freedom (1 for sample std, 0 for population std)
    fn col_std_2d(t: &Self::Tensor2D, ddof: usize) -> Self::Tensor1D;

    // --- Broadcasting operations ---

    /// `result[i, j] = t[i, j] - v[j]`
    fn broadcast_sub_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// `result[i, j] = t[i, j] / v[j]`
    fn broadcast_div_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// `result[i, j] = t[i, j] * v[j]`
    fn broadcast_mul_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// `result[i, j] = t[i, j] + v[j]`
    fn broadcast_add_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    // --- Element-wise operations ---

    /// Maps every element to `1.0` if it is strictly greater than `threshold`,
    /// else `0.0`.
    fn binarize_2d(t: &Self::Tensor2D, threshold: f64) -> Self::Tensor2D;

    // --- Row/column manipulation ---

    /// Extract specific columns, in the given order.
    ///
    /// # Panics
    /// If any column index is out of bounds.
    fn select_columns_2d(t: &Self::Tensor2D, columns: &[usize]) -> Self::Tensor2D;

    /// Extract specific rows, in the given order.
    ///
    /// # Panics
    /// If any row index is out of bounds.
    fn select_rows_2d(t: &Self::Tensor2D, rows: &[usize]) -> Self::Tensor2D;

    /// Extract specific elements of a 1D tensor, in the given order.
    ///
    /// # Panics
    /// If any index is out of bounds.
    fn select_1d(t: &Self::Tensor1D, indices: &[usize]) -> Self::Tensor1D;
}
