//! Property-based tests using proptest.
//!
//! These tests verify invariants of the preprocessing stages, the splitter and
//! the classifier on randomly generated data.

use proptest::prelude::*;
use tabular_nb::backend::{CpuBackend, Tensor1D, Tensor2D};
use tabular_nb::dataset::{train_test_split, InMemoryDataset};
use tabular_nb::model::{GaussianNB, InferenceModel};
use tabular_nb::preprocessing::{
    Binarizer, FittedTransformer, SelectFwe, StandardScaler, SupervisedTransformer, Transformer,
};

// Strategy for generating row-major matrices with the given shape bounds
fn matrix_strategy(
    rows: std::ops::Range<usize>,
    cols: std::ops::Range<usize>,
) -> impl Strategy<Value = Tensor2D<CpuBackend>> {
    (rows, cols).prop_flat_map(|(r, c)| {
        proptest::collection::vec(-10.0f64..10.0, r * c)
            .prop_map(move |data| Tensor2D::new(data, r, c))
    })
}

// Alternating labels so both classes are always present
fn alternating_labels(n: usize) -> Tensor1D<CpuBackend> {
    Tensor1D::new((0..n).map(|i| (i % 2) as f64).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn binarizer_output_is_zero_or_one(
        x in matrix_strategy(1..20, 1..6),
        threshold in -5.0f64..5.0,
    ) {
        let fitted = Binarizer::<CpuBackend>::new()
            .with_threshold(threshold)
            .fit(&x)
            .unwrap();
        let out = fitted.transform(&x).unwrap();
        prop_assert_eq!(out.shape(), x.shape());
        for (b, v) in out.ravel().to_vec().iter().zip(x.ravel().to_vec()) {
            prop_assert!(*b == 0.0 || *b == 1.0);
            prop_assert_eq!(*b == 1.0, v > threshold);
        }
    }

    #[test]
    fn select_fwe_keeps_ordered_subset(
        x in matrix_strategy(4..30, 1..8),
        alpha in 0.001f64..1.0,
    ) {
        let y = alternating_labels(x.nrows());
        let fitted = SelectFwe::<CpuBackend>::new().with_alpha(alpha).fit(&x, &y).unwrap();
        let selected = fitted.selected_indices().to_vec();

        prop_assert!(selected.len() <= x.ncols());
        prop_assert!(selected.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(selected.iter().all(|&i| i < x.ncols()));
        for &i in &selected {
            prop_assert!(fitted.pvalues()[i] < alpha / x.ncols() as f64);
        }

        let out = fitted.transform(&x).unwrap();
        prop_assert_eq!(out.ncols(), selected.len());
        prop_assert_eq!(out.ravel().to_vec(), x.select_columns(&selected).ravel().to_vec());
    }

    #[test]
    fn standard_scaler_centers_and_scales(x in matrix_strategy(3..30, 1..5)) {
        let fitted = StandardScaler::<CpuBackend>::new().fit(&x).unwrap();
        let out = fitted.transform(&x).unwrap();
        let constant = fitted.constant_features();

        let means = out.col_mean().to_vec();
        let stds = out.col_std(0).to_vec();
        for j in 0..x.ncols() {
            prop_assert!(means[j].abs() < 1e-9);
            if !constant[j] {
                prop_assert!((stds[j] - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn split_is_deterministic_disjoint_and_exhaustive(
        n in 4usize..60,
        test_size in 0.1f64..0.7,
        seed in any::<u64>(),
    ) {
        let x: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..n).map(|i| (i % 3) as f64).collect();
        let dataset = InMemoryDataset::new(x, y).unwrap();

        let a = train_test_split::<CpuBackend, _>(&dataset, test_size, Some(seed)).unwrap();
        let b = train_test_split::<CpuBackend, _>(&dataset, test_size, Some(seed)).unwrap();
        prop_assert_eq!(&a.train_indices, &b.train_indices);
        prop_assert_eq!(&a.test_indices, &b.test_indices);

        let expected_test = (test_size * n as f64).ceil() as usize;
        prop_assert_eq!(a.test_indices.len(), expected_test);

        let mut all: Vec<usize> = a.train_indices.iter().chain(&a.test_indices).copied().collect();
        all.sort_unstable();
        prop_assert_eq!(all, (0..n).collect::<Vec<_>>());

        // Rows follow their indices
        let test_x: Vec<f64> = a.x_test.ravel().to_vec();
        let idx: Vec<f64> = a.test_indices.iter().map(|&i| i as f64).collect();
        prop_assert_eq!(test_x, idx);
    }

    #[test]
    fn gaussian_nb_probabilities_are_normalized(x in matrix_strategy(4..25, 1..5)) {
        let y = alternating_labels(x.nrows());
        let model = GaussianNB::<CpuBackend>::new().fit(&x, &y).unwrap();

        let proba = model.predict_proba(&x).unwrap();
        for row in proba.to_rows() {
            prop_assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
        for label in model.predict_batch(&x).unwrap().to_vec() {
            prop_assert!(model.classes().contains(&label));
        }
    }
}
