//! Validated training data.
//!
//! A [`Dataset`] owns a feature matrix `X` of shape `(n_samples, n_features)`
//! and a target vector `y` of shape `(n_samples,)`. Construction is the only
//! place where shapes are checked: once a `Dataset` exists, every row has the
//! same width, `len(X) == len(y) >= 1`, and every value is finite.
//!
//! # Example
//!
//! ```rust
//! use salesfit::dataset::Dataset;
//!
//! let x = vec![vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0]];
//! let y = vec![10.0, 12.0];
//! let dataset = Dataset::with_features(x, y, 3).unwrap();
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.first_feature().n_features(), 1);
//! ```

use crate::error::{FitError, Result};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};

/// In-memory `(X, y)` pair with checked shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl Dataset {
    /// Builds a dataset from row vectors, inferring the width from the first row.
    ///
    /// # Errors
    /// - [`FitError::LengthMismatch`] if `x.len() != y.len()`
    /// - [`FitError::EmptyDataset`] if there are no rows
    /// - [`FitError::FeatureMismatch`] if rows are ragged
    /// - [`FitError::NonFiniteInput`] on NaN or infinite values
    pub fn new(x: Vec<Vec<f64>>, y: Vec<f64>) -> Result<Self> {
        let width = x.first().map(Vec::len).unwrap_or(0);
        Self::with_features(x, y, width)
    }

    /// Builds a dataset and requires every row to have exactly `n_features` values.
    pub fn with_features(x: Vec<Vec<f64>>, y: Vec<f64>, n_features: usize) -> Result<Self> {
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch {
                samples: x.len(),
                targets: y.len(),
            });
        }
        if x.is_empty() {
            return Err(FitError::EmptyDataset);
        }
        if let Some((row, got)) = x
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != n_features)
        {
            return Err(FitError::FeatureMismatch {
                row,
                expected: n_features,
                got,
            });
        }

        let n_samples = x.len();
        let data: Vec<f64> = x.into_iter().flatten().collect();
        let x = Array2::from_shape_vec((n_samples, n_features), data).map_err(|_| {
            FitError::FeatureMismatch {
                row: 0,
                expected: n_features,
                got: 0,
            }
        })?;
        Self::from_arrays(x, Array1::from(y))
    }

    /// Wraps arrays that already have a matrix shape.
    pub fn from_arrays(x: Array2<f64>, y: Array1<f64>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(FitError::LengthMismatch {
                samples: x.nrows(),
                targets: y.len(),
            });
        }
        if x.nrows() == 0 {
            return Err(FitError::EmptyDataset);
        }
        if x.ncols() == 0 {
            return Err(FitError::FeatureMismatch {
                row: 0,
                expected: 1,
                got: 0,
            });
        }
        if let Some(row) = (0..x.nrows())
            .find(|&i| !y[i].is_finite() || x.row(i).iter().any(|v| !v.is_finite()))
        {
            return Err(FitError::NonFiniteInput { row });
        }
        Ok(Self { x, y })
    }

    /// Number of samples (`m`).
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Always `false` for a constructed dataset; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Width of each feature row (`N`).
    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn targets(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    /// The first feature column, used by the scalar linear trainer.
    pub fn first_column(&self) -> ArrayView1<'_, f64> {
        self.x.column(0)
    }

    /// Projection onto the first feature only: `X[:, 0:1]` with the same targets.
    pub fn first_feature(&self) -> Dataset {
        Dataset {
            x: self.x.slice(s![.., 0..1]).to_owned(),
            y: self.y.clone(),
        }
    }
}
