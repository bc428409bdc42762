//! End-to-end tests: CSV on disk -> split -> fit -> predict.

use std::io::Write;

use tabular_nb::backend::{CpuBackend, Tensor2D};
use tabular_nb::dataset::{load_csv, train_test_split, CsvLoaderConfig, Dataset};
use tabular_nb::pipeline::{ClassificationPipeline, PipelineConfig};
use tabular_nb::preprocessing::PipelineStepEnum;
use tabular_nb::PipelineError;

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// `signal` has the sign of the label, `level` is always positive,
/// `mirror` has the opposite sign of the label.
fn separable_csv(n: usize, sep: char) -> String {
    let mut out = format!("signal{s}level{s}target{s}mirror\n", s = sep);
    for i in 0..n {
        let label = i % 2;
        let sign = if label == 1 { 1.0 } else { -1.0 };
        let magnitude = 0.5 + (i % 7) as f64 / 7.0;
        out.push_str(&format!(
            "{:.3}{s}{:.3}{s}{}{s}{:.3}\n",
            sign * magnitude,
            1.0 + (i % 5) as f64,
            label,
            -sign * magnitude * 2.0,
            s = sep
        ));
    }
    out
}

#[test]
fn test_csv_split_fit_predict() {
    let file = write_csv(&separable_csv(60, ';'));
    let config = CsvLoaderConfig::new().delimiter(b';');
    let dataset = load_csv(file.path(), &config).unwrap();
    assert_eq!(dataset.len(), 60);
    assert_eq!(dataset.feature_names(), &["signal", "level", "mirror"]);

    let split = train_test_split::<CpuBackend, _>(&dataset, 0.25, Some(42)).unwrap();
    assert_eq!(split.test_indices.len(), 15);

    let fitted = ClassificationPipeline::<CpuBackend>::new()
        .fit(&split.x_train, &split.y_train)
        .unwrap();
    assert_eq!(fitted.selected_features(), &[0, 2]);

    let predictions = fitted.predict(&split.x_test).unwrap();
    assert_eq!(predictions.len(), 15);
    assert_eq!(predictions.to_vec(), split.y_test.to_vec());
}

#[test]
fn test_same_seed_same_predictions() {
    let file = write_csv(&separable_csv(40, ','));
    let dataset = load_csv(file.path(), &CsvLoaderConfig::default()).unwrap();

    let run = || {
        let split = train_test_split::<CpuBackend, _>(&dataset, 0.3, Some(9)).unwrap();
        let fitted = ClassificationPipeline::<CpuBackend>::new()
            .fit(&split.x_train, &split.y_train)
            .unwrap();
        (split.test_indices, fitted.predict(&split.x_test).unwrap().to_vec())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_toy_scenario_from_csv() {
    let file = write_csv("x,target\n1,0\n-1,1\n1,0\n-1,1\n");
    let dataset = load_csv(file.path(), &CsvLoaderConfig::default()).unwrap();
    let (x, y) = dataset.to_tensors::<CpuBackend>().unwrap();

    let fitted = ClassificationPipeline::<CpuBackend>::new().fit(&x, &y).unwrap();
    let query = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0]]);
    assert_eq!(fitted.predict(&query).unwrap().to_vec(), vec![0.0]);
}

#[test]
fn test_scaler_statistics_come_from_training_rows() {
    let file = write_csv(&separable_csv(40, ','));
    let dataset = load_csv(file.path(), &CsvLoaderConfig::default()).unwrap();
    let split = train_test_split::<CpuBackend, _>(&dataset, 0.25, Some(1)).unwrap();
    let fitted = ClassificationPipeline::<CpuBackend>::new()
        .fit(&split.x_train, &split.y_train)
        .unwrap();

    // After binarization the signal column equals the label
    let train_positive = split.y_train.to_vec().iter().sum::<f64>() / split.y_train.len() as f64;
    let scaler = fitted
        .preprocessing()
        .steps()
        .iter()
        .find_map(|step| match step {
            PipelineStepEnum::StandardScaler(s) => Some(s),
            _ => None,
        })
        .unwrap();
    assert!((scaler.mean().to_vec()[0] - train_positive).abs() < 1e-12);
}

#[test]
fn test_missing_target_column() {
    let file = write_csv("a,b,label\n1,2,0\n");
    let err = load_csv(file.path(), &CsvLoaderConfig::default()).unwrap_err();
    assert!(matches!(err, PipelineError::MissingColumn(ref name) if name == "target"));
    assert!(err.is_parse_error());
}

#[test]
fn test_parse_errors() {
    let file = write_csv("a,target\n1,0\n2,1\nthree,0\n");
    match load_csv(file.path(), &CsvLoaderConfig::default()) {
        Err(PipelineError::Parse { line, .. }) => assert_eq!(line, 4),
        other => panic!("expected parse error, got {:?}", other),
    }

    let ragged = write_csv("a,b,target\n1,2,0\n1,1\n");
    assert!(matches!(
        load_csv(ragged.path(), &CsvLoaderConfig::default()),
        Err(PipelineError::Parse { .. })
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        load_csv("/nonexistent/data.csv", &CsvLoaderConfig::default()),
        Err(PipelineError::Io(_))
    ));
}

#[test]
fn test_no_informative_feature_is_configuration_error() {
    // Every column binarizes to the same value for both classes
    let file = write_csv("a,b,target\n1,2,0\n3,4,1\n5,6,0\n7,8,1\n");
    let dataset = load_csv(file.path(), &CsvLoaderConfig::default()).unwrap();
    let (x, y) = dataset.to_tensors::<CpuBackend>().unwrap();

    let err = ClassificationPipeline::<CpuBackend>::new().fit(&x, &y).unwrap_err();
    assert!(matches!(err, PipelineError::Configuration(_)));
}

#[test]
fn test_strict_alpha_can_reject_weak_feature() {
    // One mismatched row weakens the association
    let file = write_csv("a,target\n1,1\n1,1\n1,1\n1,1\n-1,0\n-1,0\n-1,0\n1,0\n");
    let dataset = load_csv(file.path(), &CsvLoaderConfig::default()).unwrap();
    let (x, y) = dataset.to_tensors::<CpuBackend>().unwrap();

    let loose = PipelineConfig::default().with_alpha(0.1);
    assert!(ClassificationPipeline::<CpuBackend>::from_config(&loose)
        .fit(&x, &y)
        .is_ok());
    assert!(matches!(
        ClassificationPipeline::<CpuBackend>::new().fit(&x, &y),
        Err(PipelineError::Configuration(_))
    ));
}

#[cfg(feature = "ndarray")]
#[test]
fn test_ndarray_backend_matches_cpu() {
    use tabular_nb::backend::NdarrayBackend;

    let file = write_csv(&separable_csv(48, ','));
    let dataset = load_csv(file.path(), &CsvLoaderConfig::default()).unwrap();

    let cpu_split = train_test_split::<CpuBackend, _>(&dataset, 0.25, Some(5)).unwrap();
    let nd_split = train_test_split::<NdarrayBackend, _>(&dataset, 0.25, Some(5)).unwrap();
    assert_eq!(cpu_split.test_indices, nd_split.test_indices);

    let cpu = ClassificationPipeline::<CpuBackend>::new()
        .fit(&cpu_split.x_train, &cpu_split.y_train)
        .unwrap();
    let nd = ClassificationPipeline::<NdarrayBackend>::new()
        .fit(&nd_split.x_train, &nd_split.y_train)
        .unwrap();

    assert_eq!(cpu.selected_features(), nd.selected_features());
    assert_eq!(
        cpu.predict(&cpu_split.x_test).unwrap().to_vec(),
        nd.predict(&nd_split.x_test).unwrap().to_vec()
    );
}
