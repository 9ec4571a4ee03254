//! Error types for training and evaluation.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FitError>;

/// Everything that can go wrong between receiving `(X, y)` and handing back a
/// trained, scored model.
///
/// Shape problems are detected before the first iteration runs. Numeric
/// problems (divergence, undefined metrics) are reported instead of being
/// smuggled out as `NaN`.
#[derive(Debug, Error)]
pub enum FitError {
    /// No samples were supplied.
    #[error("Empty data: at least one sample is required")]
    EmptyDataset,

    /// `len(X) != len(y)`.
    #[error("Length mismatch: {samples} feature rows but {targets} targets")]
    LengthMismatch { samples: usize, targets: usize },

    /// A feature row has a different width than expected.
    #[error("Feature mismatch in row {row}: expected {expected} features, got {got}")]
    FeatureMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// A feature or target value is NaN or infinite.
    #[error("Non-finite value in row {row}")]
    NonFiniteInput { row: usize },

    /// A metric has no defined value for this data (e.g. R² with constant targets).
    #[error("Metric undefined: {0}")]
    UndefinedMetric(&'static str),

    /// The learning-rate safeguard could not stabilise training.
    #[error("Training diverged at step {step} after {halvings} learning-rate halvings")]
    Diverged { step: usize, halvings: usize },

    /// A hyperparameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidConfig(String),

    /// The sales history could not be read.
    #[error("Failed to read sales history: {0}")]
    Csv(#[from] csv::Error),
}
