use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::dataset::Dataset;
use crate::error::PipelineError;

/// Fraction of rows held out for testing when none is configured.
pub const DEFAULT_TEST_SIZE: f64 = 0.25;

/// Result of [`train_test_split`].
///
/// `train_indices` and `test_indices` point into the source dataset and are
/// disjoint; together they cover every row.
#[derive(Debug, Clone)]
pub struct TrainTestSplit<B: Backend> {
    pub x_train: Tensor2D<B>,
    pub x_test: Tensor2D<B>,
    pub y_train: Tensor1D<B>,
    pub y_test: Tensor1D<B>,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Shuffles the rows of `dataset` and partitions them into training and
/// testing sets.
///
/// The test set gets `ceil(test_size * n)` rows and the training set the rest.
/// With `random_state = Some(seed)` the split is reproducible; with `None` the
/// generator is seeded from system entropy.
///
/// # Errors
/// - [`PipelineError::InvalidParameter`] if `test_size` is not strictly inside
///   `(0, 1)` or either side of the split would be empty.
/// - [`PipelineError::EmptyData`] if the dataset has no rows.
pub fn train_test_split<B: Backend, D: Dataset>(
    dataset: &D,
    test_size: f64,
    random_state: Option<u64>,
) -> Result<TrainTestSplit<B>, PipelineError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(PipelineError::InvalidParameter(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }

    let n_samples = dataset.len();
    if n_samples == 0 {
        return Err(PipelineError::EmptyData(
            "cannot split an empty dataset".to_string(),
        ));
    }

    let n_test = (test_size * n_samples as f64).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);
    if n_train == 0 || n_test == 0 {
        return Err(PipelineError::InvalidParameter(format!(
            "test_size={} with {} samples leaves {} train and {} test rows",
            test_size, n_samples, n_train, n_test
        )));
    }

    let mut rng = match random_state {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(&mut rng);

    let train_indices = indices.split_off(n_test);
    let test_indices = indices;

    let (x_train, y_train) = dataset.get_rows::<B>(&train_indices)?;
    let (x_test, y_test) = dataset.get_rows::<B>(&test_indices)?;

    debug!(
        "Split {} rows into {} train / {} test (seed: {:?})",
        n_samples, n_train, n_test, random_state
    );

    Ok(TrainTestSplit {
        x_train,
        x_test,
        y_train,
        y_test,
        train_indices,
        test_indices,
    })
}
