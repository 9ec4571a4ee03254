//! Single-feature baseline trainer written with scalar arithmetic.
//!
//! Uses only the first column of `X`. The objective, the update rule and the
//! halving policy are the same as [`Trainer`](super::Trainer) with one
//! feature, so both produce the same parameters on the same data up to
//! floating-point summation order.

use super::TrainingResult;
use crate::{
    config::TrainingConfig,
    dataset::Dataset,
    error::{FitError, Result},
    model::{Fitted, LinearModel, LinearParams},
};
use ndarray::ArrayView1;
use tracing::{debug, info, warn};

/// Scalar `y ≈ w x + b` trainer.
#[derive(Clone, Copy, Debug)]
pub struct SimpleLinearTrainer {
    learning_rate: f64,
    lambda: f64,
    max_steps: usize,
    max_halvings: usize,
    log_every: usize,
}

impl SimpleLinearTrainer {
    /// Reads every hyperparameter except `n_features`, which is always 1 here.
    pub fn from_config(config: &TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            learning_rate: config.learning_rate,
            lambda: config.lambda,
            max_steps: config.max_steps,
            max_halvings: config.max_rate_halvings,
            log_every: config.log_every,
        })
    }

    /// `(1/m) Σ (w x_i + b - y_i)² + (λ/m) w²`
    pub fn cost(&self, xs: ArrayView1<'_, f64>, ys: ArrayView1<'_, f64>, w: f64, b: f64) -> f64 {
        let m = xs.len() as f64;
        let mut sse = 0.0;
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let e = w * x + b - y;
            sse += e * e;
        }
        sse / m + self.lambda / m * (w * w)
    }

    /// `(∂J/∂w, ∂J/∂b)` with the factor 2 omitted.
    pub fn gradient(
        &self,
        xs: ArrayView1<'_, f64>,
        ys: ArrayView1<'_, f64>,
        w: f64,
        b: f64,
    ) -> (f64, f64) {
        let m = xs.len() as f64;
        let mut w_grad = 0.0;
        let mut b_grad = 0.0;
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let e = (w * x + b - y) / m;
            w_grad += e * x;
            b_grad += e;
        }
        (w_grad + w * (self.lambda / m), b_grad)
    }

    /// Trains on the first feature column of `data`.
    pub fn fit(&self, data: &Dataset) -> Result<TrainingResult> {
        let xs = data.first_column();
        let ys = data.targets();

        let mut weight = 0.0;
        let mut bias = 0.0;
        let mut rate = self.learning_rate;
        let mut halvings = 0;
        let mut prev_cost = self.cost(xs, ys, weight, bias);
        if !prev_cost.is_finite() {
            return Err(FitError::Diverged {
                step: 0,
                halvings: 0,
            });
        }

        info!(samples = data.len(), steps = self.max_steps, "Training linear baseline");

        let mut cost_history = Vec::with_capacity(self.max_steps);
        for step in 0..self.max_steps {
            let (w_grad, b_grad) = self.gradient(xs, ys, weight, bias);
            let next_w = weight + w_grad * -rate;
            let next_b = bias + b_grad * -rate;
            let cost = self.cost(xs, ys, next_w, next_b);

            if cost.is_finite() && next_w.is_finite() && next_b.is_finite() && cost <= prev_cost {
                weight = next_w;
                bias = next_b;
                prev_cost = cost;
            } else {
                halvings += 1;
                rate /= 2.0;
                if halvings > self.max_halvings {
                    return Err(FitError::Diverged { step, halvings });
                }
                warn!(step, learning_rate = rate, "Cost increased, halving learning rate");
            }
            cost_history.push(prev_cost);

            if self.log_every > 0 && step % self.log_every == 0 {
                debug!(step, cost = prev_cost, "Linear baseline progress");
            }
        }

        info!(final_cost = prev_cost, halvings, "Linear baseline complete");

        Ok(TrainingResult {
            model: LinearModel::<Fitted>::new(LinearParams::new(vec![weight], bias)),
            final_cost: prev_cost,
            steps: self.max_steps,
            halvings,
            final_learning_rate: rate,
            cost_history,
        })
    }
}
