//! Univariate feature selection.
//!
//! - [`f_classif`]: ANOVA F statistic and p-value of each feature against
//!   class labels.
//! - [`SelectFwe`]: keeps features whose p-value passes a Bonferroni-corrected
//!   family-wise error threshold.

pub mod select_fwe;
pub mod univariate;

pub use select_fwe::{FittedSelectFwe, SelectFwe, SelectFweConfig, DEFAULT_ALPHA};
pub use univariate::{f_classif, FClassifResult};
