use salesfit::{
    series::{self, SalesHistory},
    Dataset, FitError,
};

/// Deterministic weekly sales series: a linear trend, a 4-week cycle and a
/// bounded pseudo-random wobble.
///
/// The same parameters always produce the same series, so benchmark runs are
/// comparable across machines.
///
/// ```
/// use benchmarks::data::SyntheticSales;
///
/// let sales = SyntheticSales::new(12);
/// let data = sales.dataset().unwrap();
/// assert_eq!(data.len(), 12);
/// assert_eq!(data.n_features(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticSales {
    pub weeks: usize,
    pub base: f64,
    pub trend: f64,
    pub cycle: f64,
    pub noise: f64,
}

impl SyntheticSales {
    pub fn new(weeks: usize) -> Self {
        Self {
            weeks,
            base: 40.0,
            trend: 1.5,
            cycle: 6.0,
            noise: 3.0,
        }
    }

    /// Units sold in week `t`, never negative.
    pub fn units(&self, week: usize) -> f64 {
        let t = week as f64;
        let phase = (week % 4) as f64 / 4.0 * std::f64::consts::TAU;
        // Knuth multiplicative hash mapped to [-0.5, 0.5)
        let wobble = (week as u64).wrapping_mul(2_654_435_761) % 1000;
        let wobble = wobble as f64 / 1000.0 - 0.5;
        (self.base + self.trend * t + self.cycle * phase.sin() + self.noise * wobble)
            .round()
            .max(0.0)
    }

    pub fn targets(&self) -> Vec<f64> {
        (0..self.weeks).map(|week| self.units(week)).collect()
    }

    /// Cubic feature rows, as a caller of `salesfit::train` would build them.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        (0..self.weeks)
            .map(|week| series::cubic_features(week).to_vec())
            .collect()
    }

    pub fn dataset(&self) -> Result<Dataset, FitError> {
        Dataset::new(self.rows(), self.targets())
    }

    /// The series as an exported sales CSV, one row per ISO week.
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(["created_at", "quantity_sold", "sold_price_per_unit"])?;
        for week in 0..self.weeks {
            let created_at = format!("{:04}-W{:02}", 2024 + week / 52, week % 52 + 1);
            wtr.write_record([
                created_at,
                self.units(week).to_string(),
                "2.5".to_string(),
            ])?;
        }
        let bytes = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn history(&self) -> Result<SalesHistory, FitError> {
        SalesHistory::from_reader(self.to_csv()?.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_is_deterministic() {
        let a = SyntheticSales::new(30).targets();
        let b = SyntheticSales::new(30).targets();
        assert_eq!(a, b);
        assert!(a.iter().all(|&v| v >= 0.0 && v.fract() == 0.0));
    }

    #[test]
    fn test_series_has_variance() {
        let targets = SyntheticSales::new(8).targets();
        assert!(targets.iter().any(|&v| v != targets[0]));
    }

    #[test]
    fn test_csv_round_trips_through_history() {
        let sales = SyntheticSales::new(60);
        let history = sales.history().unwrap();

        assert_eq!(history.len(), 60);
        assert_eq!(history.quantities(), sales.targets());
        assert_eq!(history.to_training_set().unwrap(), sales.dataset().unwrap());
    }
}
