//! Benchmark utilities for tabular-nb.
//!
//! Provides a seeded generator of labelled tabular data shaped like the
//! pipeline's inputs: a few columns whose sign tracks the class, the rest noise.

pub mod data;

pub use data::SyntheticClassification;
