//! # salesfit
//!
//! Regression engine for weekly sales forecasting. Given feature rows `X` and
//! targets `y` it fits two competing models with batch gradient descent:
//!
//! - a regularized **polynomial** model on every feature column (by default
//!   `[t, t², t³]` of the week index `t`),
//! - a **linear** baseline on the first column only,
//!
//! scores both with R², MAE and RMSE, and recommends the one with the higher R².
//!
//! ## Core Design Principles
//!
//! - **Stateful Type Safety**: models carry their training state in the type
//!   (`Unfitted` vs `Fitted`); only fitted models can predict.
//! - **Fixed budget**: every run performs exactly `max_steps` iterations. The
//!   learning rate is halved whenever an update would raise the cost.
//! - **No hidden state**: hyperparameters live in an immutable
//!   [`TrainingConfig`] value; identical inputs give bit-identical outcomes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use salesfit::{series, train};
//!
//! let weeks = 5;
//! let x: Vec<Vec<f64>> = (0..weeks).map(|t| series::cubic_features(t).to_vec()).collect();
//! let y = vec![10.0, 12.0, 15.0, 14.0, 18.0];
//!
//! let outcome = train(x, y)?;
//! let best = outcome.recommended();
//! println!("{:?}: r2 = {:.3}", best.kind, best.r2_score());
//! # Ok::<(), salesfit::FitError>(())
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: validated `(X, y)` pairs
//! - `model`: affine models with typestate
//! - `loss` / `regularizers`: cost function and its gradient
//! - `optimizer`: gradient descent with a halving step size
//! - `trainer`: fixed-budget training loop, vector and scalar variants
//! - `metrics`: R², MAE, RMSE
//! - `selection`: polynomial vs. linear comparison, `train`, `predict`
//! - `series`: weekly feature rows, gap filling, forecasts, CSV history

/// Immutable training hyperparameters.
pub mod config;

/// Validated training data.
pub mod dataset;

/// Error type shared by every fallible operation.
pub mod error;

/// Subscriber setup for the command line tools.
pub mod logging;

/// Cost function and gradient.
pub mod loss;

/// Regression metrics.
pub mod metrics;

/// Affine models with compile-time state safety.
pub mod model;

/// Parameter update rules.
pub mod optimizer;

/// Weight penalties.
pub mod regularizers;

/// Model comparison and the public train/predict entry points.
pub mod selection;

/// Weekly sales helpers.
pub mod series;

/// Training loop orchestration.
pub mod trainer;

pub use config::TrainingConfig;
pub use dataset::Dataset;
pub use error::{FitError, Result};
pub use metrics::{Metrics, RegressionMetrics};
pub use selection::{
    predict, train, train_with_config, Candidate, ModelKind, ModelSelector, TrainingOutcome,
};
