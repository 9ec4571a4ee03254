use crate::model::ParamOps;

/// Trait for gradient-based optimizers.
///
/// An optimizer turns `(params, gradients)` into new parameters and owns the
/// step size. The trainer clones its optimizer at the start of every fit, so
/// step-size adaptation in one run never leaks into the next.
pub trait Optimizer<P>: Clone {
    /// Update rule. Does not mutate its inputs.
    fn step(&self, params: &P, gradients: &P) -> P;

    /// Current step size.
    fn learning_rate(&self) -> f64;

    /// Called when a step increased the cost. Returns `false` once the
    /// optimizer has run out of ways to recover.
    fn backoff(&mut self) -> bool;

    /// How many times [`Optimizer::backoff`] has been applied.
    fn backoffs(&self) -> usize;
}

/// Full-batch gradient descent with a halving step size.
///
/// ```text
/// θ ← θ - η · ∇J(θ)
/// ```
///
/// Whenever the trainer reports a cost increase, `η` is halved. After
/// `max_halvings` halvings further backoffs are refused and the trainer
/// reports divergence.
///
/// # Example
/// ```rust
/// use salesfit::optimizer::{GradientDescent, Optimizer};
/// use salesfit::model::LinearParams;
///
/// let mut gd = GradientDescent::new(0.01, 8);
/// let params = LinearParams::new(vec![1.0], 0.0);
/// let grads = LinearParams::new(vec![10.0], 1.0);
/// let next = gd.step(&params, &grads);
/// assert!((next.weights[0] - 0.9).abs() < 1e-12);
///
/// assert!(gd.halve());
/// assert_eq!(gd.learning_rate(), 0.005);
/// ```
#[derive(Clone, Debug)]
pub struct GradientDescent {
    lr: f64,
    halvings: usize,
    max_halvings: usize,
}

impl GradientDescent {
    pub fn new(lr: f64, max_halvings: usize) -> Self {
        Self {
            lr,
            halvings: 0,
            max_halvings,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.lr
    }

    pub fn halvings(&self) -> usize {
        self.halvings
    }

    /// Halves the step size. Returns `false` once the cap is exceeded.
    pub fn halve(&mut self) -> bool {
        self.halvings += 1;
        self.lr /= 2.0;
        self.halvings <= self.max_halvings
    }
}

impl<P: ParamOps> Optimizer<P> for GradientDescent {
    fn step(&self, params: &P, gradients: &P) -> P {
        // params + (-lr) * grads
        params.add(&gradients.scale(-self.lr))
    }

    fn learning_rate(&self) -> f64 {
        GradientDescent::learning_rate(self)
    }

    fn backoff(&mut self) -> bool {
        self.halve()
    }

    fn backoffs(&self) -> usize {
        self.halvings
    }
}
