/// A marker type indicating that a model is **not yet trained**.
///
/// This phantom type is used in generic parameters (e.g., `GaussianNB<B, Unfitted>`)
/// to enforce compile-time guarantees:
/// - `fit` is only available on an `Unfitted` model.
/// - Inference methods (`predict`, `predict_proba`) are **not available** until
///   the model is converted to `Fitted`.
///
/// This prevents accidental use of an untrained model for prediction.
#[derive(Debug, Clone, Copy)]
pub struct Unfitted;

/// A marker type indicating that a model has been **fully trained**.
///
/// After training, a model is converted from `Model<Unfitted>` to `Model<Fitted>`,
/// which implements [`InferenceModel`](crate::model::InferenceModel).
///
/// A `Fitted` model contains only inference parameters; its hyperparameters
/// are kept for inspection but never consulted again.
#[derive(Debug, Clone, Copy)]
pub struct Fitted;
