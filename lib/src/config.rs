//! Training hyperparameters.
//!
//! A [`TrainingConfig`] is an immutable value handed to every trainer by
//! reference. Two runs built from equal configs on equal data produce equal
//! results.

use crate::error::{FitError, Result};
use serde::{Deserialize, Serialize};

/// Hyperparameters shared by the polynomial and the linear trainer.
///
/// Defaults:
/// - `n_features`: 3 (`[w, w², w³]`)
/// - `learning_rate`: 0.01
/// - `lambda`: 1.0
/// - `max_steps`: 1500
/// - `max_rate_halvings`: 64
/// - `log_every`: 300
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrainingConfig {
    /// Width of a feature row for the polynomial model.
    pub n_features: usize,
    /// Initial step size.
    pub learning_rate: f64,
    /// L2 regularization strength (weights only).
    pub lambda: f64,
    /// Fixed iteration budget.
    pub max_steps: usize,
    /// How many times the step size may be halved before training is
    /// declared divergent.
    pub max_rate_halvings: usize,
    /// Emit a debug event every `log_every` steps (0 disables).
    pub log_every: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_features: 3,
            learning_rate: 0.01,
            lambda: 1.0,
            max_steps: 1500,
            max_rate_halvings: 64,
            log_every: 300,
        }
    }
}

impl TrainingConfig {
    /// Starts a builder seeded with the defaults.
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder {
            config: Self::default(),
        }
    }

    /// Checks that every hyperparameter is usable.
    pub fn validate(&self) -> Result<()> {
        if self.n_features == 0 {
            return Err(FitError::InvalidConfig(
                "n_features must be at least 1".into(),
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(FitError::InvalidConfig(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(FitError::InvalidConfig(format!(
                "lambda must be non-negative and finite, got {}",
                self.lambda
            )));
        }
        Ok(())
    }

    /// Same config with the feature width replaced.
    pub fn with_n_features(self, n_features: usize) -> Self {
        Self { n_features, ..self }
    }
}

/// Fluent builder for [`TrainingConfig`].
pub struct TrainingConfigBuilder {
    config: TrainingConfig,
}

impl TrainingConfigBuilder {
    pub fn n_features(mut self, n: usize) -> Self {
        self.config.n_features = n;
        self
    }

    pub fn learning_rate(mut self, lr: f64) -> Self {
        self.config.learning_rate = lr;
        self
    }

    pub fn lambda(mut self, lambda: f64) -> Self {
        self.config.lambda = lambda;
        self
    }

    pub fn max_steps(mut self, steps: usize) -> Self {
        self.config.max_steps = steps;
        self
    }

    pub fn max_rate_halvings(mut self, halvings: usize) -> Self {
        self.config.max_rate_halvings = halvings;
        self
    }

    pub fn log_every(mut self, every: usize) -> Self {
        self.config.log_every = every;
        self
    }

    /// Validates and returns the config.
    pub fn build(self) -> Result<TrainingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hyperparameters() {
        let config = TrainingConfig::default();
        assert_eq!(config.n_features, 3);
        assert_eq!(config.learning_rate, 0.01);
        assert_eq!(config.lambda, 1.0);
        assert_eq!(config.max_steps, 1500);
    }

    #[test]
    fn test_builder_chaining() {
        let config = TrainingConfig::builder()
            .n_features(1)
            .learning_rate(0.05)
            .lambda(0.0)
            .max_steps(200)
            .log_every(0)
            .build()
            .unwrap();

        assert_eq!(config.n_features, 1);
        assert_eq!(config.learning_rate, 0.05);
        assert_eq!(config.lambda, 0.0);
        assert_eq!(config.max_steps, 200);
        assert_eq!(config.log_every, 0);
    }

    #[test]
    fn test_builder_rejects_non_positive_rate() {
        let err = TrainingConfig::builder().learning_rate(0.0).build();
        assert!(matches!(err, Err(FitError::InvalidConfig(_))));

        let err = TrainingConfig::builder().learning_rate(f64::NAN).build();
        assert!(matches!(err, Err(FitError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_rejects_negative_lambda() {
        let err = TrainingConfig::builder().lambda(-1.0).build();
        assert!(matches!(err, Err(FitError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_rejects_zero_features() {
        let err = TrainingConfig::builder().n_features(0).build();
        assert!(matches!(err, Err(FitError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: TrainingConfig = serde_json::from_str(r#"{"maxSteps": 10}"#).unwrap();
        assert_eq!(config.max_steps, 10);
        assert_eq!(config.learning_rate, 0.01);
        assert_eq!(config.n_features, 3);
    }

    #[test]
    fn test_with_n_features_keeps_rest() {
        let config = TrainingConfig::default().with_n_features(1);
        assert_eq!(config.n_features, 1);
        assert_eq!(config.max_steps, 1500);
    }
}
