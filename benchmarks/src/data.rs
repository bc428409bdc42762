use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tabular_nb::backend::{Backend, Tensor1D, Tensor2D};
use tabular_nb::dataset::InMemoryDataset;
use tabular_nb::PipelineError;

/// Synthetic binary classification table.
#[derive(Debug, Clone)]
pub struct SyntheticClassification {
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
    /// Columns that carry the class signal.
    pub informative: Vec<usize>,
}

impl SyntheticClassification {
    /// Generates `n_samples` rows with `n_features` columns, the first
    /// `n_informative` of which agree in sign with the label 90% of the time.
    pub fn generate(n_samples: usize, n_features: usize, n_informative: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let n_informative = n_informative.min(n_features);
        let mut features = Vec::with_capacity(n_samples);
        let mut targets = Vec::with_capacity(n_samples);

        for _ in 0..n_samples {
            let label = rng.gen_range(0..2) as f64;
            let sign = if label == 1.0 { 1.0 } else { -1.0 };
            let row = (0..n_features)
                .map(|j| {
                    if j < n_informative {
                        let flip = if rng.gen_bool(0.1) { -1.0 } else { 1.0 };
                        flip * sign * rng.gen_range(0.1..3.0)
                    } else {
                        rng.gen_range(-3.0..3.0)
                    }
                })
                .collect();
            features.push(row);
            targets.push(label);
        }

        Self {
            features,
            targets,
            informative: (0..n_informative).collect(),
        }
    }

    pub fn n_samples(&self) -> usize {
        self.targets.len()
    }

    pub fn to_tensors<B: Backend>(&self) -> (Tensor2D<B>, Tensor1D<B>) {
        (
            Tensor2D::from_rows(&self.features),
            Tensor1D::new(self.targets.clone()),
        )
    }

    pub fn to_in_memory_dataset(&self) -> Result<InMemoryDataset, PipelineError> {
        InMemoryDataset::new(self.features.clone(), self.targets.clone())
    }

    /// Renders the table as CSV with the label in a `target` column.
    pub fn to_csv(&self, delimiter: char) -> String {
        let n_features = self.features.first().map_or(0, Vec::len);
        let mut header: Vec<String> = (0..n_features).map(|j| format!("x{}", j)).collect();
        header.push("target".to_string());

        let mut out = header.join(&delimiter.to_string());
        out.push('\n');
        for (row, label) in self.features.iter().zip(&self.targets) {
            let mut fields: Vec<String> = row.iter().map(|v| format!("{:.6}", v)).collect();
            fields.push(label.to_string());
            out.push_str(&fields.join(&delimiter.to_string()));
            out.push('\n');
        }
        out
    }
}
