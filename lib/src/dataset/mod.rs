//! Dataset abstractions, CSV loading and train/test splitting.
//!
//! # Core Concepts
//!
//! - **Dataset** — A source of `(X, y)` pairs where `X` is a feature matrix of shape
//!   `(n_samples, n_features)` and `y` is a label vector of shape `(n_samples,)`.
//! - **Loader** — [`load_csv`] reads a delimited file with a named label column.
//! - **Split** — [`train_test_split`] partitions rows into disjoint training and
//!   testing sets by uniform shuffling.
//!
//! # Example
//!
//! ```rust
//! use tabular_nb::backend::CpuBackend;
//! use tabular_nb::dataset::{train_test_split, Dataset, InMemoryDataset};
//!
//! let x = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
//! let y = vec![0.0, 1.0, 0.0, 1.0];
//! let dataset = InMemoryDataset::new(x, y).unwrap();
//!
//! let split = train_test_split::<CpuBackend, _>(&dataset, 0.25, Some(42)).unwrap();
//! assert_eq!(split.x_train.nrows(), 3);
//! assert_eq!(split.x_test.nrows(), 1);
//! ```

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::error::PipelineError;

pub mod csv;
pub mod memory;
pub mod split;

pub use self::csv::{load_csv, load_csv_from_reader, CsvLoaderConfig};
pub use self::memory::InMemoryDataset;
pub use self::split::{train_test_split, TrainTestSplit, DEFAULT_TEST_SIZE};

/// Abstract interface for a labelled tabular dataset.
///
/// Implementors provide random access to rows so that splitters can gather
/// arbitrary subsets as tensors.
pub trait Dataset {
    /// Number of samples (rows).
    fn len(&self) -> usize;

    /// Checks whether the dataset has no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of feature columns (label excluded).
    fn n_features(&self) -> usize;

    /// Gathers the rows at `indices`, in order, as a feature matrix and label vector.
    ///
    /// # Errors
    /// Returns [`PipelineError::InvalidParameter`] if an index is out of bounds.
    fn get_rows<B: Backend>(
        &self,
        indices: &[usize],
    ) -> Result<(Tensor2D<B>, Tensor1D<B>), PipelineError>;

    /// Loads every row, in file order.
    fn to_tensors<B: Backend>(&self) -> Result<(Tensor2D<B>, Tensor1D<B>), PipelineError> {
        let all: Vec<usize> = (0..self.len()).collect();
        self.get_rows(&all)
    }
}
