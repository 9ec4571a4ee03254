//! Fixed-budget gradient descent.
//!
//! Training is a two-state machine, *Descending* → *Terminated*. Each of the
//! `max_steps` iterations:
//!
//! 1. computes the gradient at the current parameters,
//! 2. proposes `θ - η ∇J(θ)` and evaluates its cost,
//! 3. accepts the proposal if the cost did not go up, otherwise discards it
//!    and halves `η`.
//!
//! A rejected proposal still consumes its iteration, so every run performs
//! exactly `max_steps` iterations, and the accepted cost sequence never
//! increases. Running out of halvings, or a non-finite starting cost, ends
//! the run with [`FitError::Diverged`].

pub mod simple;

pub use simple::SimpleLinearTrainer;

use crate::{
    config::TrainingConfig,
    dataset::Dataset,
    error::{FitError, Result},
    loss::{self, Loss, MSELoss},
    model::{Fitted, LinearModel, LinearParams, LinearRegression, ParamOps, TrainableModel},
    optimizer::{GradientDescent, Optimizer},
    regularizers::{Regularizer, L2},
};
use tracing::{debug, info, warn};

/// Terminal snapshot of a training run.
///
/// Owned by the caller; nothing from the run survives outside it.
#[derive(Clone, Debug)]
pub struct TrainingResult {
    pub model: LinearModel<Fitted>,
    /// Cost of `model` on the training data, i.e. the last accepted cost.
    pub final_cost: f64,
    /// Iterations performed (always the configured budget).
    pub steps: usize,
    /// How often the learning rate was halved.
    pub halvings: usize,
    pub final_learning_rate: f64,
    /// Cost after every iteration, `steps` entries.
    pub cost_history: Vec<f64>,
}

/// Orchestrates the training loop for a [`LinearRegression`].
///
/// Combines a loss, an optimizer and a regularizer. Once built it is
/// immutable: `fit` clones the optimizer, so a trainer can be shared between
/// runs and threads.
#[derive(Clone, Debug)]
pub struct Trainer<L, O, R> {
    pub(crate) max_steps: usize,
    pub(crate) log_every: usize,
    pub(crate) loss_fn: L,
    pub(crate) optimizer: O,
    pub(crate) regularizer: R,
}

/// Fluent builder for [`Trainer`].
///
/// Defaults:
/// - `max_steps`: 1500
/// - `log_every`: 300
pub struct TrainerBuilder<L, O, R> {
    max_steps: usize,
    log_every: usize,
    loss_fn: L,
    optimizer: O,
    regularizer: R,
}

impl<L, O, R> TrainerBuilder<L, O, R>
where
    L: Loss,
    O: Optimizer<LinearParams>,
    R: Regularizer,
{
    pub fn new(loss_fn: L, optimizer: O, regularizer: R) -> Self {
        let defaults = TrainingConfig::default();
        Self {
            max_steps: defaults.max_steps,
            log_every: defaults.log_every,
            loss_fn,
            optimizer,
            regularizer,
        }
    }

    pub fn max_steps(mut self, steps: usize) -> Self {
        self.max_steps = steps;
        self
    }

    /// Emit a debug event every `every` steps; 0 silences progress events.
    pub fn log_every(mut self, every: usize) -> Self {
        self.log_every = every;
        self
    }

    pub fn build(self) -> Trainer<L, O, R> {
        Trainer {
            max_steps: self.max_steps,
            log_every: self.log_every,
            loss_fn: self.loss_fn,
            optimizer: self.optimizer,
            regularizer: self.regularizer,
        }
    }
}

/// The trainer used for both sales models: MSE + L2 + halving gradient descent.
pub type RegularizedTrainer = Trainer<MSELoss, GradientDescent, L2>;

impl RegularizedTrainer {
    /// Builds the standard trainer from validated hyperparameters.
    pub fn from_config(config: &TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Trainer::builder(
            MSELoss,
            GradientDescent::new(config.learning_rate, config.max_rate_halvings),
            L2::new(config.lambda),
        )
        .max_steps(config.max_steps)
        .log_every(config.log_every)
        .build())
    }
}

impl<L, O, R> Trainer<L, O, R>
where
    L: Loss,
    O: Optimizer<LinearParams>,
    R: Regularizer,
{
    /// Equivalent to `TrainerBuilder::new(...)`.
    pub fn builder(loss_fn: L, optimizer: O, regularizer: R) -> TrainerBuilder<L, O, R> {
        TrainerBuilder::new(loss_fn, optimizer, regularizer)
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Cost of `params` on `data`: data loss plus penalty.
    pub fn cost(&self, params: &LinearParams, data: &Dataset) -> f64 {
        loss::objective(&self.loss_fn, &self.regularizer, params, data)
    }

    /// Gradient of [`Trainer::cost`] w.r.t. every weight and the bias.
    pub fn gradient(&self, params: &LinearParams, data: &Dataset) -> LinearParams {
        loss::objective_gradient(&self.loss_fn, &self.regularizer, params, data)
    }

    /// Trains `model` on `data` for exactly `max_steps` iterations.
    ///
    /// # Errors
    /// - [`FitError::FeatureMismatch`] if the model width differs from the data width
    /// - [`FitError::Diverged`] if the step size had to be halved too often or
    ///   the starting cost is not finite
    pub fn fit(&self, mut model: LinearRegression, data: &Dataset) -> Result<TrainingResult> {
        let n_features = model.params().n_features();
        if data.n_features() != n_features {
            return Err(FitError::FeatureMismatch {
                row: 0,
                expected: n_features,
                got: data.n_features(),
            });
        }

        let mut optimizer = self.optimizer.clone();
        let mut prev_cost = self.cost(model.params(), data);
        if !prev_cost.is_finite() {
            return Err(FitError::Diverged {
                step: 0,
                halvings: 0,
            });
        }

        info!(
            samples = data.len(),
            features = n_features,
            steps = self.max_steps,
            "Training model"
        );

        let mut cost_history = Vec::with_capacity(self.max_steps);
        for step in 0..self.max_steps {
            let grads = self.gradient(model.params(), data);
            let candidate = optimizer.step(model.params(), &grads);
            let cost = self.cost(&candidate, data);

            if cost.is_finite() && candidate.is_finite() && cost <= prev_cost {
                model.update_params(candidate);
                prev_cost = cost;
            } else {
                if !optimizer.backoff() {
                    return Err(FitError::Diverged {
                        step,
                        halvings: optimizer.backoffs(),
                    });
                }
                warn!(
                    step,
                    learning_rate = optimizer.learning_rate(),
                    "Cost increased, halving learning rate"
                );
            }
            cost_history.push(prev_cost);

            if self.log_every > 0 && step % self.log_every == 0 {
                debug!(step, cost = prev_cost, "Training progress");
            }
        }

        info!(final_cost = prev_cost, halvings = optimizer.backoffs(), "Training complete");

        Ok(TrainingResult {
            model: model.into_fitted(),
            final_cost: prev_cost,
            steps: self.max_steps,
            halvings: optimizer.backoffs(),
            final_learning_rate: optimizer.learning_rate(),
            cost_history,
        })
    }
}
