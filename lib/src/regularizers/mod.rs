use crate::model::LinearParams;
use ndarray::Array1;

/// Penalty term added to the data loss, together with its gradient.
///
/// `n_samples` is the `m` of the objective; the penalty is scaled by `1/m`
/// like the data term.
pub trait Regularizer {
    fn penalty_grad(&self, params: &LinearParams, n_samples: usize) -> (f64, LinearParams);
}

/// Ridge penalty `(λ/m) Σ w_j²` on the weights. The bias is never penalised.
///
/// The returned gradient is `(λ/m) w` (factor 2 omitted, see [`crate::loss`]).
#[derive(Clone, Copy, Debug)]
pub struct L2 {
    lambda: f64,
}

impl L2 {
    pub fn new(lambda: f64) -> Self {
        Self { lambda }
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl Regularizer for L2 {
    fn penalty_grad(&self, params: &LinearParams, n_samples: usize) -> (f64, LinearParams) {
        let scale = self.lambda / n_samples as f64;
        let penalty = scale * params.weights.dot(&params.weights);
        let grad = LinearParams {
            weights: &params.weights * scale,
            bias: 0.0,
        };
        (penalty, grad)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoRegularizer;

impl Regularizer for NoRegularizer {
    fn penalty_grad(&self, params: &LinearParams, _n_samples: usize) -> (f64, LinearParams) {
        let grad = LinearParams {
            weights: Array1::zeros(params.n_features()),
            bias: 0.0,
        };
        (0.0, grad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_penalty_and_grad() {
        let params = LinearParams::new(vec![1.0, -2.0], 7.0);
        let (penalty, grad) = L2::new(2.0).penalty_grad(&params, 4);

        // (2/4) * (1 + 4)
        assert!((penalty - 2.5).abs() < 1e-12);
        assert_eq!(grad.weights.to_vec(), vec![0.5, -1.0]);
        assert_eq!(grad.bias, 0.0);
    }

    #[test]
    fn test_l2_zero_lambda_is_inert() {
        let params = LinearParams::new(vec![3.0], 1.0);
        let (penalty, grad) = L2::new(0.0).penalty_grad(&params, 1);
        assert_eq!(penalty, 0.0);
        assert_eq!(grad.weights.to_vec(), vec![0.0]);
    }

    #[test]
    fn test_no_regularizer() {
        let params = LinearParams::new(vec![3.0, 4.0], 1.0);
        let (penalty, grad) = NoRegularizer.penalty_grad(&params, 10);
        assert_eq!(penalty, 0.0);
        assert_eq!(grad, LinearParams::zeros(2));
    }
}
