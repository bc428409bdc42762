//! Run configuration for the `tabular-nb` binary.
//!
//! Every field has a default, so a JSON file only needs the values it changes:
//!
//! ```json
//! {
//!   "separator": ",",
//!   "test_size": 0.3,
//!   "random_state": 42,
//!   "pipeline": { "selector": { "alpha": 0.01 } }
//! }
//! ```

use crate::dataset::{CsvLoaderConfig, DEFAULT_TEST_SIZE};
use crate::error::PipelineError;
use crate::pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for one load / split / fit / predict run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Field delimiter of the input file.
    pub separator: char,
    /// Name of the label column.
    pub target_column: String,
    /// Fraction of rows held out for prediction.
    pub test_size: f64,
    /// Seed for the split. `None` draws one from the OS.
    pub random_state: Option<u64>,
    pub pipeline: PipelineConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            separator: ',',
            target_column: crate::dataset::csv::DEFAULT_TARGET_COLUMN.to_string(),
            test_size: DEFAULT_TEST_SIZE,
            random_state: None,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl RunConfig {
    /// Reads a JSON run configuration.
    ///
    /// # Errors
    /// [`PipelineError::Io`] if the file cannot be read,
    /// [`PipelineError::Configuration`] if it is not a valid configuration.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            PipelineError::Configuration(format!("{}: {}", path.as_ref().display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.separator.is_ascii() {
            return Err(PipelineError::Configuration(format!(
                "separator must be a single ASCII character, got {:?}",
                self.separator
            )));
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(PipelineError::Configuration(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        Ok(())
    }

    /// Replaces settings with the values given on the command line.
    ///
    /// `None` keeps the configured value.
    pub fn apply_overrides(
        &mut self,
        separator: Option<char>,
        target_column: Option<String>,
        test_size: Option<f64>,
        random_state: Option<u64>,
    ) {
        if let Some(separator) = separator {
            self.separator = separator;
        }
        if let Some(target_column) = target_column {
            self.target_column = target_column;
        }
        if let Some(test_size) = test_size {
            self.test_size = test_size;
        }
        if random_state.is_some() {
            self.random_state = random_state;
        }
    }

    /// The configured seed, or a fresh one from the OS.
    pub fn resolve_seed(&self) -> u64 {
        self.random_state.unwrap_or_else(rand::random::<u64>)
    }

    /// CSV loader settings derived from this run.
    pub fn loader_config(&self) -> CsvLoaderConfig {
        CsvLoaderConfig::new()
            .delimiter(self.separator as u8)
            .target_column(self.target_column.clone())
    }
}

/// Summary of one run, written as pretty JSON by the binary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub data: PathBuf,
    pub n_rows: usize,
    pub n_features: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub seed: u64,
    pub selected_features: Vec<String>,
    pub classes: Vec<f64>,
    pub test_accuracy: f64,
    pub predictions: Vec<f64>,
}

impl RunReport {
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), PipelineError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::Configuration(format!("cannot encode report: {}", e)))?;
        fs::write(path, json)?;
        Ok(())
    }
}
