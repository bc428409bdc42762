//! Scaling transformers for feature normalization.
//!
//! | Transformer | Description |
//! |-------------|-------------|
//! | [`StandardScaler`] | Z-score normalization (mean=0, std=1), constant features map to 0 |

pub mod standard;

pub use standard::{FittedStandardScaler, StandardScaler, StandardScalerConfig};
