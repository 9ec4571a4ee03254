//! Affine models: `prediction = bias + Σ w[i] * x[i]`.
//!
//! The same type serves the polynomial model (three features `[t, t², t³]`)
//! and the linear baseline (one feature); only the width of the weight
//! vector differs.
//!
//! - [`LinearRegression`] = `LinearModel<Unfitted>` is handed to a trainer.
//! - `LinearModel<Fitted>` is what comes back: inference only.

use super::{Fitted, InferenceModel, ParamOps, TrainableModel, Unfitted};
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Weight vector and bias of an affine model.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearParams {
    pub weights: Array1<f64>,
    pub bias: f64,
}

impl LinearParams {
    /// Zero weights and zero bias.
    pub fn zeros(n_features: usize) -> Self {
        Self {
            weights: Array1::zeros(n_features),
            bias: 0.0,
        }
    }

    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self {
            weights: Array1::from(weights),
            bias,
        }
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Evaluates the hypothesis on one feature vector.
    ///
    /// # Panics
    /// Panics if `x.len() != self.n_features()`. Callers are expected to have
    /// validated shapes through [`Dataset`](crate::dataset::Dataset).
    pub fn evaluate(&self, x: ArrayView1<'_, f64>) -> f64 {
        self.bias + self.weights.dot(&x)
    }

    /// The hypothesis as a reusable closure over these parameters.
    pub fn hypothesis(&self) -> impl Fn(ArrayView1<'_, f64>) -> f64 + '_ {
        move |x| self.evaluate(x)
    }

    /// `X @ w + b` for every row of `x`.
    pub fn predict_batch(&self, x: ArrayView2<'_, f64>) -> Array1<f64> {
        x.dot(&self.weights) + self.bias
    }

    /// Flattened `[w_0, .., w_{N-1}, b]`, bias last.
    pub fn to_flat(&self) -> Vec<f64> {
        self.weights
            .iter()
            .copied()
            .chain(std::iter::once(self.bias))
            .collect()
    }
}

impl ParamOps for LinearParams {
    fn add(&self, other: &Self) -> Self {
        Self {
            weights: &self.weights + &other.weights,
            bias: self.bias + other.bias,
        }
    }

    fn scale(&self, factor: f64) -> Self {
        Self {
            weights: &self.weights * factor,
            bias: self.bias * factor,
        }
    }

    fn is_finite(&self) -> bool {
        self.bias.is_finite() && self.weights.iter().all(|w| w.is_finite())
    }
}

/// Plain-data form of [`LinearParams`] for JSON output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializableLinearParams {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl From<&LinearParams> for SerializableLinearParams {
    fn from(params: &LinearParams) -> Self {
        Self {
            weights: params.weights.to_vec(),
            bias: params.bias,
        }
    }
}

impl From<SerializableLinearParams> for LinearParams {
    fn from(value: SerializableLinearParams) -> Self {
        LinearParams::new(value.weights, value.bias)
    }
}

/// An affine model with its training state encoded in the type.
///
/// You cannot call `predict()` on a `LinearModel<Unfitted>`.
#[derive(Clone, Debug)]
pub struct LinearModel<S> {
    params: LinearParams,
    _state: PhantomData<S>,
}

/// Alias for an **unfitted** model, the input of a trainer.
pub type LinearRegression = LinearModel<Unfitted>;

impl LinearRegression {
    /// Zero-initialized weights and bias.
    pub fn new(n_features: usize) -> Self {
        Self::from_params(LinearParams::zeros(n_features))
    }

    /// Warm start from explicit parameters.
    pub fn from_params(params: LinearParams) -> Self {
        Self {
            params,
            _state: PhantomData,
        }
    }
}

impl LinearModel<Fitted> {
    /// Wraps trained parameters.
    pub fn new(params: LinearParams) -> Self {
        Self {
            params,
            _state: PhantomData,
        }
    }

    pub fn params(&self) -> &LinearParams {
        &self.params
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.params.weights
    }

    pub fn bias(&self) -> f64 {
        self.params.bias
    }

    pub fn extract_params(&self) -> SerializableLinearParams {
        (&self.params).into()
    }

    pub fn from_serialized(params: SerializableLinearParams) -> Self {
        Self::new(params.into())
    }
}

impl InferenceModel for LinearModel<Fitted> {
    fn predict(&self, x: ArrayView1<'_, f64>) -> f64 {
        self.params.evaluate(x)
    }

    fn predict_batch(&self, x: ArrayView2<'_, f64>) -> Array1<f64> {
        self.params.predict_batch(x)
    }

    fn n_features(&self) -> usize {
        self.params.n_features()
    }
}

/// Forward pass: `X @ w + b`.
/// Backward pass: `∇w = Xᵀ · grad`, `∇b = Σ grad`.
impl TrainableModel for LinearModel<Unfitted> {
    type Params = LinearParams;
    type Output = LinearModel<Fitted>;

    fn forward(&self, x: ArrayView2<'_, f64>) -> Array1<f64> {
        self.params.predict_batch(x)
    }

    fn backward(&self, x: ArrayView2<'_, f64>, grad_output: &Array1<f64>) -> LinearParams {
        LinearParams {
            weights: x.t().dot(grad_output),
            bias: grad_output.sum(),
        }
    }

    fn params(&self) -> &LinearParams {
        &self.params
    }

    fn update_params(&mut self, params: LinearParams) {
        self.params = params;
    }

    fn into_fitted(self) -> LinearModel<Fitted> {
        LinearModel::<Fitted>::new(self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    // === ParamOps ===

    #[test]
    fn test_param_ops_add() {
        let p1 = LinearParams::new(vec![1.0, 2.0], 0.5);
        let p2 = LinearParams::new(vec![0.5, 1.0], 0.5);

        let result = p1.add(&p2);

        assert_eq!(result.weights.to_vec(), vec![1.5, 3.0]);
        assert_eq!(result.bias, 1.0);
    }

    #[test]
    fn test_param_ops_scale_negative() {
        let p = LinearParams::new(vec![2.0], 1.0);
        let result = p.scale(-1.0);

        assert_eq!(result.weights.to_vec(), vec![-2.0]);
        assert_eq!(result.bias, -1.0);
    }

    #[test]
    fn test_param_ops_is_finite() {
        assert!(LinearParams::new(vec![1.0, 2.0], 0.0).is_finite());
        assert!(!LinearParams::new(vec![1.0, f64::NAN], 0.0).is_finite());
        assert!(!LinearParams::new(vec![1.0], f64::INFINITY).is_finite());
    }

    // === Hypothesis ===

    #[test]
    fn test_hypothesis_is_affine() {
        let params = LinearParams::new(vec![2.0, -1.0, 0.5], 3.0);
        let model = params.hypothesis();

        // 3 + 2*1 - 1*2 + 0.5*4 = 5
        assert_eq!(model(array![1.0, 2.0, 4.0].view()), 5.0);
        assert_eq!(model(array![0.0, 0.0, 0.0].view()), 3.0);
    }

    #[test]
    fn test_hypothesis_is_reusable() {
        let params = LinearParams::new(vec![1.0], 1.0);
        let model = params.hypothesis();
        let first = model(array![2.0].view());
        let second = model(array![2.0].view());
        assert_eq!(first, second);
        assert_eq!(params.bias, 1.0);
    }

    #[test]
    fn test_to_flat_puts_bias_last() {
        let params = LinearParams::new(vec![1.0, 2.0, 3.0], 4.0);
        assert_eq!(params.to_flat(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    // === LinearRegression (Unfitted) ===

    #[test]
    fn test_linear_regression_new_zero_initialized() {
        let model = LinearRegression::new(3);

        assert_eq!(model.params().weights.to_vec(), vec![0.0, 0.0, 0.0]);
        assert_eq!(model.params().bias, 0.0);
    }

    #[test]
    fn test_linear_regression_forward_batch() {
        let model = LinearRegression::from_params(LinearParams::new(vec![2.0, 3.0], 1.0));
        let x = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();

        let pred = model.forward(x.view());

        // [1 + 2*1 + 3*2, 1 + 2*3 + 3*4] = [9, 19]
        assert_eq!(pred.to_vec(), vec![9.0, 19.0]);
    }

    #[test]
    fn test_linear_regression_backward_batch() {
        let model = LinearRegression::new(2);
        let x = Array2::from_shape_vec((3, 2), vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
        let grad = array![1.0, 2.0, -1.0];

        let grads = model.backward(x.view(), &grad);

        // Xᵀ · grad = [1 - 1, 2 - 1] = [0, 1]
        assert_eq!(grads.weights.to_vec(), vec![0.0, 1.0]);
        assert_eq!(grads.bias, 2.0);
    }

    #[test]
    fn test_linear_regression_update_params() {
        let mut model = LinearRegression::new(1);
        model.update_params(LinearParams::new(vec![4.0], -1.0));
        assert_eq!(model.params().weights.to_vec(), vec![4.0]);
        assert_eq!(model.params().bias, -1.0);
    }

    // === LinearModel<Fitted> ===

    #[test]
    fn test_linear_model_into_fitted_predicts() {
        let model = LinearRegression::from_params(LinearParams::new(vec![2.0], 1.0));
        let fitted = model.into_fitted();

        assert_eq!(fitted.predict(array![3.0].view()), 7.0);
        assert_eq!(fitted.n_features(), 1);
    }

    #[test]
    fn test_linear_model_predict_batch() {
        let fitted = LinearModel::<Fitted>::new(LinearParams::new(vec![1.0, 1.0, 1.0], 0.0));
        let x = Array2::from_shape_vec((2, 3), vec![1.0, 1.0, 1.0, 2.0, 4.0, 8.0]).unwrap();

        assert_eq!(fitted.predict_batch(x.view()).to_vec(), vec![3.0, 14.0]);
    }

    #[test]
    fn test_serialized_params_json_shape() {
        let fitted = LinearModel::<Fitted>::new(LinearParams::new(vec![0.5, 2.0], -1.0));
        let json = serde_json::to_string(&fitted.extract_params()).unwrap();
        assert_eq!(json, r#"{"weights":[0.5,2.0],"bias":-1.0}"#);

        let back: SerializableLinearParams = serde_json::from_str(&json).unwrap();
        let restored = LinearModel::<Fitted>::from_serialized(back);
        assert_eq!(restored.params(), fitted.params());
    }
}
