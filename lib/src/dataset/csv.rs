use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ::csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};

use crate::dataset::InMemoryDataset;
use crate::error::PipelineError;

/// Name of the label column when none is configured.
pub const DEFAULT_TARGET_COLUMN: &str = "target";

/// Options for reading a delimited table with a named label column.
///
/// # Example
/// ```
/// use tabular_nb::dataset::CsvLoaderConfig;
///
/// let config = CsvLoaderConfig::new().delimiter(b'\t').target_column("label");
/// assert_eq!(config.delimiter, b'\t');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLoaderConfig {
    pub delimiter: u8,
    pub target_column: String,
    pub has_headers: bool,
}

impl Default for CsvLoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            target_column: DEFAULT_TARGET_COLUMN.to_string(),
            has_headers: true,
        }
    }
}

impl CsvLoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn target_column(mut self, name: impl Into<String>) -> Self {
        self.target_column = name.into();
        self
    }

    /// The label column is located by name, so headers are required;
    /// `false` is rejected when loading.
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

/// Loads a delimited file into an [`InMemoryDataset`].
///
/// Every field must parse as `f64`. The label column is removed from the
/// features; the remaining columns keep their file order and header names.
///
/// # Errors
/// - [`PipelineError::Io`] if the file cannot be opened.
/// - [`PipelineError::Parse`] for a malformed record or a non-numeric field,
///   carrying the 1-based line number.
/// - [`PipelineError::MissingColumn`] if the header lacks the label column.
/// - [`PipelineError::EmptyData`] if there are no data rows.
pub fn load_csv<P: AsRef<Path>>(
    path: P,
    config: &CsvLoaderConfig,
) -> Result<InMemoryDataset, PipelineError> {
    let path = path.as_ref();
    debug!("Opening {}", path.display());
    let file = File::open(path)?;
    let dataset = load_csv_from_reader(BufReader::new(file), config)?;
    info!(
        "Loaded {} rows x {} features from {}",
        dataset.rows().len(),
        dataset.feature_names().len(),
        path.display()
    );
    Ok(dataset)
}

/// Same as [`load_csv`], reading from any [`Read`] source.
pub fn load_csv_from_reader<R: Read>(
    reader: R,
    config: &CsvLoaderConfig,
) -> Result<InMemoryDataset, PipelineError> {
    if !config.has_headers {
        return Err(PipelineError::InvalidParameter(
            "a header row is required to locate the label column".to_string(),
        ));
    }

    let mut rdr = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let target_idx = headers
        .iter()
        .position(|h| h == config.target_column)
        .ok_or_else(|| PipelineError::MissingColumn(config.target_column.clone()))?;

    let feature_names: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != target_idx)
        .map(|(_, h)| h.to_string())
        .collect();

    let mut features = Vec::new();
    let mut targets = Vec::new();
    let mut record = StringRecord::new();

    while rdr.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let mut row = Vec::with_capacity(feature_names.len());
        for (i, field) in record.iter().enumerate() {
            let value = parse_field(field, line, &headers, i)?;
            if i == target_idx {
                targets.push(value);
            } else {
                row.push(value);
            }
        }
        features.push(row);
    }

    if features.is_empty() {
        return Err(PipelineError::EmptyData(
            "input has a header but no data rows".to_string(),
        ));
    }

    InMemoryDataset::with_feature_names(features, targets, feature_names)
}

fn parse_field(
    field: &str,
    line: u64,
    headers: &StringRecord,
    column: usize,
) -> Result<f64, PipelineError> {
    field.parse::<f64>().map_err(|_| PipelineError::Parse {
        line,
        reason: format!(
            "column '{}': cannot parse {:?} as a number",
            headers.get(column).unwrap_or("?"),
            field
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn load(text: &str, config: &CsvLoaderConfig) -> Result<InMemoryDataset, PipelineError> {
        load_csv_from_reader(text.as_bytes(), config)
    }

    #[test]
    fn test_target_removed_and_order_kept() {
        let text = "a,target,b\n1,0,2\n3,1,4\n";
        let ds = load(text, &CsvLoaderConfig::default()).unwrap();
        assert_eq!(ds.feature_names(), &["a".to_string(), "b".to_string()]);
        assert_eq!(ds.rows(), &[vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(ds.targets(), &[0.0, 1.0]);
    }

    #[test]
    fn test_custom_delimiter_and_whitespace() {
        let text = "x\ty\tlabel\n 1.5\t-2\t1\n0\t3e2\t0\n";
        let config = CsvLoaderConfig::new().delimiter(b'\t').target_column("label");
        let ds = load(text, &config).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[0], vec![1.5, -2.0]);
        assert_eq!(ds.rows()[1], vec![0.0, 300.0]);
    }

    #[test]
    fn test_non_numeric_field_reports_line() {
        let text = "a,target\n1,0\nfoo,1\n";
        match load(text, &CsvLoaderConfig::default()) {
            Err(PipelineError::Parse { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("foo"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_field_count() {
        let text = "a,b,target\n1,2,0\n1,0\n";
        let err = load(text, &CsvLoaderConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_empty_field_is_parse_error() {
        let text = "a,target\n,0\n";
        let err = load(text, &CsvLoaderConfig::default()).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_missing_target() {
        let text = "a,b\n1,2\n";
        let err = load(text, &CsvLoaderConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn(ref c) if c == "target"));
    }

    #[test]
    fn test_header_only() {
        let err = load("a,target\n", &CsvLoaderConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyData(_)));
    }

    #[test]
    fn test_headers_required() {
        let config = CsvLoaderConfig::new().has_headers(false);
        let err = load("1,0\n", &config).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidParameter(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_csv("/definitely/not/here.csv", &CsvLoaderConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
