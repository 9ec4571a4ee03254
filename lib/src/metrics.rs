//! Metrics for evaluating regression models.
//!
//! All functions are pure: they read their inputs and return a value, so they
//! can be called repeatedly and from many threads on the same data.

use crate::dataset::Dataset;
use crate::error::{FitError, Result};
use crate::model::InferenceModel;
use ndarray::ArrayView1;
use serde::Serialize;

pub struct Metrics;

impl Metrics {
    fn check(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> Result<()> {
        if y_true.len() != y_pred.len() {
            return Err(FitError::LengthMismatch {
                samples: y_pred.len(),
                targets: y_true.len(),
            });
        }
        if y_true.is_empty() {
            return Err(FitError::EmptyDataset);
        }
        Ok(())
    }

    /// Mean squared error: `mean((y_true - y_pred)²)`.
    pub fn mse(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> Result<f64> {
        Self::check(y_true, y_pred)?;
        let sum_sq: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();
        Ok(sum_sq / y_true.len() as f64)
    }

    /// Root mean squared error: `sqrt(mse)`, in the units of the target.
    pub fn rmse(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> Result<f64> {
        Ok(Self::mse(y_true, y_pred)?.sqrt())
    }

    /// Mean absolute error: `mean(|y_true - y_pred|)`.
    pub fn mae(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> Result<f64> {
        Self::check(y_true, y_pred)?;
        let sum_abs: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).abs())
            .sum();
        Ok(sum_abs / y_true.len() as f64)
    }

    /// Coefficient of determination.
    ///
    /// ```text
    /// R² = 1 - SS_res / SS_tot
    /// SS_res = Σ (y_true - y_pred)²
    /// SS_tot = Σ (y_true - mean(y_true))²
    /// ```
    ///
    /// Negative when the model is worse than predicting the mean.
    ///
    /// # Errors
    /// [`FitError::UndefinedMetric`] when every target is identical
    /// (`SS_tot == 0`).
    pub fn r_squared(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> Result<f64> {
        Self::check(y_true, y_pred)?;
        let ss_tot = Self::total_sum_of_squares(y_true)?;

        let ss_res: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();
        Ok(1.0 - ss_res / ss_tot)
    }

    /// `SS_tot = Σ (y - mean(y))²`, the denominator of [`Metrics::r_squared`].
    ///
    /// Lets callers reject targets R² cannot score before doing any work.
    ///
    /// # Errors
    /// [`FitError::EmptyDataset`] for no targets, [`FitError::UndefinedMetric`]
    /// when the sum is zero.
    pub fn total_sum_of_squares(y: ArrayView1<'_, f64>) -> Result<f64> {
        if y.is_empty() {
            return Err(FitError::EmptyDataset);
        }
        let mean = y.sum() / y.len() as f64;
        let ss_tot: f64 = y.iter().map(|&t| (t - mean).powi(2)).sum();

        if ss_tot == 0.0 {
            return Err(FitError::UndefinedMetric(
                "R² needs targets with non-zero variance",
            ));
        }
        Ok(ss_tot)
    }

    /// All metrics at once.
    pub fn calculate_all(
        y_true: ArrayView1<'_, f64>,
        y_pred: ArrayView1<'_, f64>,
    ) -> Result<RegressionMetrics> {
        let mse = Self::mse(y_true, y_pred)?;
        Ok(RegressionMetrics {
            mse,
            rmse: mse.sqrt(),
            mae: Self::mae(y_true, y_pred)?,
            r_squared: Self::r_squared(y_true, y_pred)?,
        })
    }

    /// Scores a trained model on `data`.
    ///
    /// The model width must match `data.n_features()`; evaluate the linear
    /// baseline on [`Dataset::first_feature`].
    pub fn evaluate<M: InferenceModel>(model: &M, data: &Dataset) -> Result<RegressionMetrics> {
        if model.n_features() != data.n_features() {
            return Err(FitError::FeatureMismatch {
                row: 0,
                expected: model.n_features(),
                got: data.n_features(),
            });
        }
        let preds = model.predict_batch(data.features());
        Self::calculate_all(data.targets(), preds.view())
    }
}

/// R², MAE, RMSE (and MSE) of one model on one dataset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionMetrics {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    #[serde(rename = "r2Score")]
    pub r_squared: f64,
}
