//! Weekly sales series.
//!
//! Week `t` (zero-based) is described by the cubic feature row `[t, t², t³]`;
//! the linear baseline sees only `t`. Observations come from a CSV export
//! with one row per week:
//!
//! ```text
//! created_at,quantity_sold,sold_price_per_unit
//! 2024-01-01T09:00:00Z,120,2.5
//! 2024-01-08T09:00:00Z,,2.5
//! ```
//!
//! An empty `quantity_sold` repeats the previous week's value.

use crate::{
    dataset::Dataset,
    error::{FitError, Result},
    model::InferenceModel,
};
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::{io, path::Path};
use tracing::debug;

/// Number of columns produced by [`cubic_features`].
pub const CUBIC_WIDTH: usize = 3;

/// `[t, t², t³]` for week index `t`.
pub fn cubic_features(week: usize) -> [f64; CUBIC_WIDTH] {
    let t = week as f64;
    [t, t * t, t * t * t]
}

/// Feature matrix for weeks `0..n_weeks`, one [`cubic_features`] row each.
pub fn design_matrix(n_weeks: usize) -> Array2<f64> {
    Array2::from_shape_fn((n_weeks, CUBIC_WIDTH), |(week, j)| cubic_features(week)[j])
}

/// Replaces each gap with the value of the previous week. A gap in the first
/// week becomes 0.
pub fn fill_forward(values: &[Option<f64>]) -> Vec<f64> {
    let mut last = 0.0;
    values
        .iter()
        .map(|value| {
            if let Some(v) = value {
                last = *v;
            }
            last
        })
        .collect()
}

/// Prediction for one future week.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WeeklyForecast {
    /// One-based week number, continuing the observed weeks.
    pub week: usize,
    /// Raw model output.
    pub value: f64,
    /// `value` rounded to whole units, never negative.
    pub units: u64,
}

/// Extrapolates `model` over the `horizon` weeks after `observed_weeks`.
///
/// The model may use any prefix of the cubic features: a three-feature
/// polynomial model or the one-feature baseline.
///
/// # Errors
/// [`FitError::FeatureMismatch`] if the model expects more columns than
/// [`cubic_features`] provides, or none at all. [`FitError::InvalidConfig`]
/// if the last forecast week does not fit in `usize`.
pub fn forecast<M: InferenceModel>(
    model: &M,
    observed_weeks: usize,
    horizon: usize,
) -> Result<Vec<WeeklyForecast>> {
    let width = model.n_features();
    if width == 0 || width > CUBIC_WIDTH {
        return Err(FitError::FeatureMismatch {
            row: 0,
            expected: CUBIC_WIDTH,
            got: width,
        });
    }

    let end = observed_weeks
        .checked_add(horizon)
        .ok_or_else(|| {
            FitError::InvalidConfig(format!(
                "forecast horizon {} after week {} is out of range",
                horizon, observed_weeks
            ))
        })?;

    Ok((observed_weeks..end)
        .map(|week| {
            let features = cubic_features(week);
            let value = model.predict(ArrayView1::from(&features[..width]));
            WeeklyForecast {
                week: week + 1,
                value,
                units: value.round().max(0.0) as u64,
            }
        })
        .collect())
}

/// One exported sales row.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SaleRecord {
    pub created_at: String,
    pub quantity_sold: Option<f64>,
    pub sold_price_per_unit: Option<f64>,
}

/// Weekly observations of one item, oldest first.
#[derive(Clone, Debug, Default)]
pub struct SalesHistory {
    records: Vec<SaleRecord>,
}

impl SalesHistory {
    /// Sorts `records` by `created_at`. Timestamps are compared as strings,
    /// which orders ISO 8601 values chronologically.
    pub fn new(mut records: Vec<SaleRecord>) -> Self {
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Self { records }
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let records = rdr
            .deserialize()
            .collect::<std::result::Result<Vec<SaleRecord>, _>>()?;
        debug!(rows = records.len(), "Loaded sales history");
        Ok(Self::new(records))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        Self::from_reader(io::BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    /// Units sold per week with gaps filled forward.
    pub fn quantities(&self) -> Vec<f64> {
        let raw: Vec<Option<f64>> = self.records.iter().map(|r| r.quantity_sold).collect();
        fill_forward(&raw)
    }

    /// `Σ quantity × price` over rows that carry both values.
    pub fn total_revenue(&self) -> f64 {
        self.records
            .iter()
            .filter_map(|r| Some(r.quantity_sold? * r.sold_price_per_unit?))
            .sum()
    }

    /// Cubic week features against filled weekly quantities.
    pub fn to_training_set(&self) -> Result<Dataset> {
        let y = Array1::from(self.quantities());
        Dataset::from_arrays(design_matrix(self.len()), y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Fitted, LinearModel, LinearParams};

    const CSV: &str = "\
created_at,quantity_sold,sold_price_per_unit
2024-01-15T09:00:00Z,14,2.0
2024-01-01T09:00:00Z,10,2.0
2024-01-08T09:00:00Z,,2.5
2024-01-22T09:00:00Z,18,
";

    #[test]
    fn test_cubic_features() {
        assert_eq!(cubic_features(0), [0.0, 0.0, 0.0]);
        assert_eq!(cubic_features(3), [3.0, 9.0, 27.0]);
    }

    #[test]
    fn test_design_matrix_rows() {
        let x = design_matrix(5);
        assert_eq!(x.dim(), (5, 3));
        assert_eq!(x.row(4).to_vec(), vec![4.0, 16.0, 64.0]);
        assert_eq!(x.row(2).to_vec(), vec![2.0, 4.0, 8.0]);
    }

    #[test]
    fn test_fill_forward() {
        let filled = fill_forward(&[Some(3.0), None, Some(5.0), None, None]);
        assert_eq!(filled, vec![3.0, 3.0, 5.0, 5.0, 5.0]);

        let leading_gap = fill_forward(&[None, Some(2.0)]);
        assert_eq!(leading_gap, vec![0.0, 2.0]);
        assert!(fill_forward(&[]).is_empty());
    }

    #[test]
    fn test_forecast_polynomial_model() {
        // y = 1 + t + t²
        let model = LinearModel::<Fitted>::new(LinearParams::new(vec![1.0, 1.0, 0.0], 1.0));
        let weeks = forecast(&model, 3, 2).unwrap();

        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].week, 4);
        assert_eq!(weeks[0].value, 13.0);
        assert_eq!(weeks[1].week, 5);
        assert_eq!(weeks[1].units, 21);
    }

    #[test]
    fn test_forecast_linear_model_uses_week_index() {
        let model = LinearModel::<Fitted>::new(LinearParams::new(vec![2.0], 0.4));
        let weeks = forecast(&model, 1, 1).unwrap();
        assert!((weeks[0].value - 2.4).abs() < 1e-12);
        assert_eq!(weeks[0].units, 2);
    }

    #[test]
    fn test_forecast_clamps_negative_units() {
        let model = LinearModel::<Fitted>::new(LinearParams::new(vec![-10.0], 5.0));
        let weeks = forecast(&model, 2, 1).unwrap();
        assert!(weeks[0].value < 0.0);
        assert_eq!(weeks[0].units, 0);
    }

    #[test]
    fn test_forecast_rejects_wide_model() {
        let model = LinearModel::<Fitted>::new(LinearParams::zeros(4));
        assert!(matches!(
            forecast(&model, 0, 1),
            Err(FitError::FeatureMismatch { got: 4, .. })
        ));
    }

    #[test]
    fn test_forecast_rejects_overflowing_horizon() {
        let model = LinearModel::<Fitted>::new(LinearParams::new(vec![1.0], 0.0));
        assert!(matches!(
            forecast(&model, 4, usize::MAX),
            Err(FitError::InvalidConfig(_))
        ));
        assert!(matches!(
            forecast(&model, usize::MAX, 1),
            Err(FitError::InvalidConfig(_))
        ));
        assert!(forecast(&model, 4, 0).unwrap().is_empty());
    }

    #[test]
    fn test_history_from_csv_sorted_and_filled() {
        let history = SalesHistory::from_reader(CSV.as_bytes()).unwrap();

        assert_eq!(history.len(), 4);
        assert_eq!(history.records()[0].created_at, "2024-01-01T09:00:00Z");
        assert_eq!(history.quantities(), vec![10.0, 10.0, 14.0, 18.0]);
        // 14 * 2.0 + 10 * 2.0; the other rows miss a value
        assert_eq!(history.total_revenue(), 48.0);
    }

    #[test]
    fn test_history_training_set() {
        let history = SalesHistory::from_reader(CSV.as_bytes()).unwrap();
        let data = history.to_training_set().unwrap();

        assert_eq!(data.len(), 4);
        assert_eq!(data.n_features(), 3);
        assert_eq!(data.features().row(3).to_vec(), vec![3.0, 9.0, 27.0]);
        assert_eq!(data.targets().to_vec(), vec![10.0, 10.0, 14.0, 18.0]);
    }

    #[test]
    fn test_empty_history_has_no_training_set() {
        let header = "created_at,quantity_sold,sold_price_per_unit\n";
        let history = SalesHistory::from_reader(header.as_bytes()).unwrap();
        assert!(history.is_empty());
        assert!(matches!(history.to_training_set(), Err(FitError::EmptyDataset)));
    }

    #[test]
    fn test_malformed_csv_is_an_error() {
        let bad = "created_at,quantity_sold,sold_price_per_unit\n2024-01-01,ten,1.0\n";
        assert!(matches!(
            SalesHistory::from_reader(bad.as_bytes()),
            Err(FitError::Csv(_))
        ));
    }
}
