//! Models with compile-time training state.
//!
//! A model is either [`Unfitted`] (its parameters are mutated by a trainer) or
//! [`Fitted`] (a finished value used only for prediction). Converting from one
//! to the other is one-way, through [`TrainableModel::into_fitted`].

pub mod linear;

pub use linear::{LinearModel, LinearParams, LinearRegression, SerializableLinearParams};

use ndarray::{Array1, ArrayView1, ArrayView2};

/// Marker: the model is still being trained.
///
/// Training methods require an `Unfitted` model, and `predict` is not
/// available until the model has been converted to [`Fitted`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Unfitted;

/// Marker: training has finished.
///
/// A `Fitted` model contains only inference parameters, no optimizer state
/// and no hyperparameters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fitted;

/// Element-wise parameter arithmetic needed by the optimizer update rule.
pub trait ParamOps: Clone {
    fn add(&self, other: &Self) -> Self;
    fn scale(&self, factor: f64) -> Self;
    /// `true` when no component is NaN or infinite.
    fn is_finite(&self) -> bool;
}

/// Training-time interface: forward pass, gradient of the prediction, and
/// in-place parameter replacement.
pub trait TrainableModel {
    type Params: ParamOps;
    type Output;

    fn forward(&self, x: ArrayView2<'_, f64>) -> Array1<f64>;

    /// Maps `∂L/∂prediction` to `∂L/∂params`.
    fn backward(&self, x: ArrayView2<'_, f64>, grad_output: &Array1<f64>) -> Self::Params;

    fn params(&self) -> &Self::Params;
    fn update_params(&mut self, params: Self::Params);
    fn into_fitted(self) -> Self::Output;
}

/// Inference-time interface of a trained model.
pub trait InferenceModel {
    fn predict(&self, x: ArrayView1<'_, f64>) -> f64;
    fn predict_batch(&self, x: ArrayView2<'_, f64>) -> Array1<f64>;
    fn n_features(&self) -> usize;
}
