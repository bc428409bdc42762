//! Pipeline utilities for chaining transformers.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Pipeline`] | Chain transformers sequentially, fitted with labels |
//! | [`FittedPipeline`] | Apply the learned chain to new data |

#[allow(clippy::module_inception)]
pub mod pipeline;

pub use pipeline::{FittedPipeline, Pipeline, PipelineStep, PipelineStepEnum, UnfittedStepEnum};
