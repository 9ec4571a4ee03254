//! Cost function and its gradient.
//!
//! The training objective is
//!
//! ```text
//! J(w, b) = (1/m) Σ (h(x_i) - y_i)²  +  (λ/m) Σ w_j²
//! ```
//!
//! split into a data term ([`Loss`]) and a penalty term
//! ([`Regularizer`](crate::regularizers::Regularizer)).
//!
//! Gradients follow the convention of omitting the factor 2 of the squared
//! terms; it is absorbed into the learning rate. Every gradient returned here
//! is therefore exactly `½ ∇J`:
//!
//! ```text
//! ∂/∂w_j = (1/m) Σ (h(x_i) - y_i) x_ij + (λ/m) w_j
//! ∂/∂b   = (1/m) Σ (h(x_i) - y_i)
//! ```

use crate::dataset::Dataset;
use crate::model::{LinearParams, LinearRegression, ParamOps, TrainableModel};
use crate::regularizers::{Regularizer, L2};
use ndarray::{Array1, ArrayView1};

/// A differentiable data-fit term.
pub trait Loss {
    /// Scalar loss value for a batch of predictions.
    fn loss(&self, prediction: &Array1<f64>, target: ArrayView1<'_, f64>) -> f64;

    /// `∂L/∂prediction`, passed on to the model's backward pass.
    fn grad_wrt_prediction(
        &self,
        prediction: &Array1<f64>,
        target: ArrayView1<'_, f64>,
    ) -> Array1<f64>;
}

/// Mean squared error: `L = (1/n) Σ (pred_i - target_i)²`.
///
/// Gradient w.r.t. prediction: `(pred - target) / n` (factor 2 omitted).
#[derive(Clone, Copy, Debug, Default)]
pub struct MSELoss;

impl Loss for MSELoss {
    fn loss(&self, pred: &Array1<f64>, target: ArrayView1<'_, f64>) -> f64 {
        let diff = pred - &target;
        diff.dot(&diff) / diff.len() as f64
    }

    fn grad_wrt_prediction(&self, pred: &Array1<f64>, target: ArrayView1<'_, f64>) -> Array1<f64> {
        let n = pred.len() as f64;
        (pred - &target) / n
    }
}

/// Full objective: data loss plus regularization penalty.
pub fn objective<L, R>(loss: &L, regularizer: &R, params: &LinearParams, data: &Dataset) -> f64
where
    L: Loss,
    R: Regularizer,
{
    let preds = params.predict_batch(data.features());
    let (penalty, _) = regularizer.penalty_grad(params, data.len());
    loss.loss(&preds, data.targets()) + penalty
}

/// Gradient of [`objective`] with respect to every weight and the bias.
pub fn objective_gradient<L, R>(
    loss: &L,
    regularizer: &R,
    params: &LinearParams,
    data: &Dataset,
) -> LinearParams
where
    L: Loss,
    R: Regularizer,
{
    let model = LinearRegression::from_params(params.clone());
    let preds = model.forward(data.features());
    let grad_preds = loss.grad_wrt_prediction(&preds, data.targets());
    let grads = model.backward(data.features(), &grad_preds);
    let (_, reg_grad) = regularizer.penalty_grad(params, data.len());
    grads.add(&reg_grad)
}

/// `J(w, b)` with mean squared error and an L2 penalty of strength `lambda`.
pub fn regularized_cost(data: &Dataset, params: &LinearParams, lambda: f64) -> f64 {
    objective(&MSELoss, &L2::new(lambda), params, data)
}

/// Gradient of [`regularized_cost`], flattened with the bias gradient last
/// (length `N + 1`).
pub fn regularized_gradient(data: &Dataset, params: &LinearParams, lambda: f64) -> Vec<f64> {
    objective_gradient(&MSELoss, &L2::new(lambda), params, data).to_flat()
}
