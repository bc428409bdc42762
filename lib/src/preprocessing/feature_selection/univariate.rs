use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::error::PipelineError;
use crate::stats::f_distribution_sf;

/// Per-feature ANOVA results, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct FClassifResult {
    pub scores: Vec<f64>,
    pub pvalues: Vec<f64>,
}

/// Sorted distinct labels and, for every row, the index of its class.
pub(crate) fn encode_classes(labels: &[f64]) -> Result<(Vec<f64>, Vec<usize>), PipelineError> {
    if let Some(bad) = labels.iter().find(|y| !y.is_finite()) {
        return Err(PipelineError::MissingValues(format!(
            "labels must be finite, found {}",
            bad
        )));
    }
    // + 0.0 folds -0.0 into 0.0 so both land in one class
    let labels: Vec<f64> = labels.iter().map(|&y| y + 0.0).collect();
    let mut classes = labels.clone();
    classes.sort_by(f64::total_cmp);
    classes.dedup();

    let assignment = labels
        .iter()
        .map(|y| {
            classes
                .binary_search_by(|c| c.total_cmp(y))
                .map_err(|_| PipelineError::NumericalError(format!("label {} not indexed", y)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((classes, assignment))
}

/// One-way ANOVA F statistic and p-value of every feature against the labels.
///
/// For column `j`, with `k` classes and `n` rows:
/// ```text
/// SSB = Σ_c n_c (mean_c − mean)²         df_b = k − 1
/// SSW = Σ_c Σ_{i∈c} (x_i − mean_c)²      df_w = n − k
/// F   = (SSB / df_b) / (SSW / df_w)      p = P(F(df_b, df_w) > F)
/// ```
/// A column that is constant within every class but differs between classes
/// gets `F = +inf, p = 0`. A column constant overall, or `n == k`, gets NaN.
///
/// # Errors
/// - [`PipelineError::InvalidShape`] if `x` and `y` differ in row count.
/// - [`PipelineError::EmptyData`] if there are no rows.
/// - [`PipelineError::MissingValues`] for non-finite labels.
/// - [`PipelineError::InvalidParameter`] for fewer than two classes.
pub fn f_classif<B: Backend>(
    x: &Tensor2D<B>,
    y: &Tensor1D<B>,
) -> Result<FClassifResult, PipelineError> {
    let (n, cols) = x.shape();
    if y.len() != n {
        return Err(PipelineError::InvalidShape {
            expected: format!("{} labels", n),
            got: format!("{} labels", y.len()),
        });
    }
    if n == 0 {
        return Err(PipelineError::EmptyData(
            "Cannot compute ANOVA F-values on empty data".to_string(),
        ));
    }

    let (classes, assignment) = encode_classes(&y.to_vec())?;
    let k = classes.len();
    if k < 2 {
        return Err(PipelineError::InvalidParameter(format!(
            "ANOVA requires at least 2 classes, got {}",
            k
        )));
    }

    let mut counts = vec![0usize; k];
    for &c in &assignment {
        counts[c] += 1;
    }

    let df_between = (k - 1) as f64;
    let df_within = (n - k) as f64;
    let flat = x.ravel().to_vec();

    let mut scores = Vec::with_capacity(cols);
    let mut pvalues = Vec::with_capacity(cols);

    for j in 0..cols {
        let column = || flat.iter().skip(j).step_by(cols);

        let grand_mean = column().sum::<f64>() / n as f64;
        let mut class_means = vec![0.0; k];
        for (&v, &c) in column().zip(assignment.iter()) {
            class_means[c] += v;
        }
        for (m, &count) in class_means.iter_mut().zip(counts.iter()) {
            *m /= count as f64;
        }

        let ss_between: f64 = class_means
            .iter()
            .zip(counts.iter())
            .map(|(&m, &count)| count as f64 * (m - grand_mean).powi(2))
            .sum();
        let ss_within: f64 = column()
            .zip(assignment.iter())
            .map(|(&v, &c)| (v - class_means[c]).powi(2))
            .sum();

        let (f, p) = if df_within == 0.0 || (ss_within == 0.0 && ss_between == 0.0) {
            (f64::NAN, f64::NAN)
        } else if ss_within == 0.0 {
            (f64::INFINITY, 0.0)
        } else {
            let f = (ss_between / df_between) / (ss_within / df_within);
            (f, f_distribution_sf(f, df_between, df_within))
        };
        scores.push(f);
        pvalues.push(p);
    }

    Ok(FClassifResult { scores, pvalues })
}
