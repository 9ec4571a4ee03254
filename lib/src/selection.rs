//! Polynomial vs. linear model selection.
//!
//! [`ModelSelector`] fits the regularized polynomial model on every feature
//! column and the scalar baseline on the first column only, scores both on
//! the data they were trained on, and recommends the polynomial model only
//! when its R² is strictly higher. Ties go to the linear baseline.
//!
//! ```rust,no_run
//! let x = vec![
//!     vec![0.0, 0.0, 0.0],
//!     vec![1.0, 1.0, 1.0],
//!     vec![2.0, 4.0, 8.0],
//! ];
//! let outcome = salesfit::train(x, vec![10.0, 12.0, 15.0])?;
//! println!("{:?}", outcome.recommendation);
//! # Ok::<(), salesfit::FitError>(())
//! ```

use crate::{
    config::TrainingConfig,
    dataset::Dataset,
    error::{FitError, Result},
    metrics::{Metrics, RegressionMetrics},
    model::{Fitted, LinearModel, LinearParams, LinearRegression, SerializableLinearParams},
    trainer::{RegularizedTrainer, SimpleLinearTrainer, TrainingResult},
};
use ndarray::ArrayView1;
use serde::{Serialize, Serializer};
use tracing::debug;

/// Which of the two candidates a value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Polynomial,
    Linear,
}

/// One trained candidate with its scores.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub kind: ModelKind,
    pub model: LinearModel<Fitted>,
    pub final_cost: f64,
    pub steps: usize,
    pub halvings: usize,
    pub metrics: RegressionMetrics,
}

impl Candidate {
    fn new(kind: ModelKind, result: TrainingResult, metrics: RegressionMetrics) -> Self {
        Self {
            kind,
            model: result.model,
            final_cost: result.final_cost,
            steps: result.steps,
            halvings: result.halvings,
            metrics,
        }
    }

    pub fn r2_score(&self) -> f64 {
        self.metrics.r_squared
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CandidateJson {
    #[serde(flatten)]
    params: SerializableLinearParams,
    final_cost: f64,
    r2_score: f64,
    mae: f64,
    rmse: f64,
}

impl Serialize for Candidate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        CandidateJson {
            params: self.model.extract_params(),
            final_cost: self.final_cost,
            r2_score: self.metrics.r_squared,
            mae: self.metrics.mae,
            rmse: self.metrics.rmse,
        }
        .serialize(serializer)
    }
}

/// Both candidates plus the recommendation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingOutcome {
    pub polynomial: Candidate,
    pub linear: Candidate,
    pub data_points: usize,
    pub recommendation: ModelKind,
}

impl TrainingOutcome {
    /// The candidate named by `recommendation`.
    pub fn recommended(&self) -> &Candidate {
        match self.recommendation {
            ModelKind::Polynomial => &self.polynomial,
            ModelKind::Linear => &self.linear,
        }
    }
}

fn recommend(polynomial_r2: f64, linear_r2: f64) -> ModelKind {
    if polynomial_r2 > linear_r2 {
        ModelKind::Polynomial
    } else {
        ModelKind::Linear
    }
}

/// Runs both trainers with one configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModelSelector {
    config: TrainingConfig,
}

impl ModelSelector {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Trains, scores and compares both candidates on `data`.
    ///
    /// `data` must have `config.n_features` columns. The two runs share
    /// nothing but the input, so the outcome depends only on `data` and the
    /// configuration.
    ///
    /// # Errors
    /// Shape errors and [`FitError::UndefinedMetric`] (all targets equal)
    /// before training starts, [`FitError::Diverged`] from either run.
    pub fn select(&self, data: &Dataset) -> Result<TrainingOutcome> {
        Metrics::total_sum_of_squares(data.targets())?;

        let polynomial = RegularizedTrainer::from_config(&self.config)?
            .fit(LinearRegression::new(self.config.n_features), data)?;
        let linear = SimpleLinearTrainer::from_config(&self.config)?.fit(data)?;

        let polynomial_metrics = Metrics::evaluate(&polynomial.model, data)?;
        let linear_metrics = Metrics::evaluate(&linear.model, &data.first_feature())?;

        let recommendation = recommend(polynomial_metrics.r_squared, linear_metrics.r_squared);
        debug!(
            polynomial_r2 = polynomial_metrics.r_squared,
            linear_r2 = linear_metrics.r_squared,
            ?recommendation,
            "Model selected"
        );

        Ok(TrainingOutcome {
            polynomial: Candidate::new(ModelKind::Polynomial, polynomial, polynomial_metrics),
            linear: Candidate::new(ModelKind::Linear, linear, linear_metrics),
            data_points: data.len(),
            recommendation,
        })
    }
}

/// Trains both models on `(x, y)` with the default hyperparameters.
pub fn train(x: Vec<Vec<f64>>, y: Vec<f64>) -> Result<TrainingOutcome> {
    train_with_config(x, y, &TrainingConfig::default())
}

/// Like [`train`], with explicit hyperparameters.
pub fn train_with_config(
    x: Vec<Vec<f64>>,
    y: Vec<f64>,
    config: &TrainingConfig,
) -> Result<TrainingOutcome> {
    config.validate()?;
    let data = Dataset::with_features(x, y, config.n_features)?;
    ModelSelector::new(*config).select(&data)
}

/// Applies `bias + Σ weights[i] * row[i]` to every row of `x`.
///
/// # Errors
/// [`FitError::FeatureMismatch`] if a row's width differs from `weights.len()`.
pub fn predict(x: &[Vec<f64>], weights: &[f64], bias: f64) -> Result<Vec<f64>> {
    let params = LinearParams::new(weights.to_vec(), bias);
    let hypothesis = params.hypothesis();
    x.iter()
        .enumerate()
        .map(|(row, features)| {
            if features.len() != weights.len() {
                return Err(FitError::FeatureMismatch {
                    row,
                    expected: weights.len(),
                    got: features.len(),
                });
            }
            Ok(hypothesis(ArrayView1::from(features.as_slice())))
        })
        .collect()
}
