//! Error type shared by loading, splitting, preprocessing and classification.

use thiserror::Error;

/// Error type for every fallible operation in the crate.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A field could not be parsed as a number, or a record was malformed.
    #[error("Parse error at line {line}: {reason}")]
    Parse { line: u64, reason: String },
    /// A required column is absent from the input header.
    #[error("Missing column: {0}")]
    MissingColumn(String),
    /// I/O error while reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The pipeline cannot run with the configuration and data it was given.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Shape mismatch between expected and actual tensor dimensions.
    #[error("Invalid shape: expected {expected}, got {got}")]
    InvalidShape { expected: String, got: String },
    /// Numerical computation error.
    #[error("Numerical error: {0}")]
    NumericalError(String),
    /// Data contains NaN or infinite values where finite ones are required.
    #[error("Missing values: {0}")]
    MissingValues(String),
    /// Invalid hyperparameter value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// Feature dimension mismatch.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },
}

impl PipelineError {
    /// Returns `true` for errors raised while reading the input table.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, PipelineError::Parse { .. } | PipelineError::MissingColumn(_))
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(io) => PipelineError::Io(io),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => PipelineError::Parse {
                line,
                reason: format!("expected {} fields, found {}", expected_len, len),
            },
            csv::ErrorKind::Utf8 { err, .. } => PipelineError::Parse {
                line,
                reason: format!("invalid UTF-8: {}", err),
            },
            other => PipelineError::Parse {
                line,
                reason: format!("{:?}", other),
            },
        }
    }
}
