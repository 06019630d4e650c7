//! Parameter update rules.

use crate::error::Result;
use crate::numeric::Scalar;
use crate::tensors::Tensor;

/// Turns a weight tensor and its gradient into updated weights.
///
/// An optimizer instance may keep per-parameter state, so every parameter
/// gets its own instance via [`Optimizer::fresh`].
pub trait Optimizer<T: Scalar> {
    /// Returns the updated weights; `w` itself is left untouched.
    ///
    /// # Errors
    /// Shape errors if `g` does not broadcast against `w`.
    fn update(&mut self, w: &Tensor<T>, g: &Tensor<T>) -> Result<Tensor<T>>;

    /// A new optimizer with the same hyperparameters and no state.
    fn fresh(&self) -> Box<dyn Optimizer<T>>;
}

/// Stochastic gradient descent with exponential-average momentum.
///
/// ```text
/// v' = momentum * v + (1 - momentum) * g
/// w' = w - lr * v'
/// ```
///
/// `v` starts as zeros shaped like the first weights it sees.
#[derive(Debug, Clone)]
pub struct Sgd<T> {
    lr: f64,
    momentum: f64,
    velocity: Option<Tensor<T>>,
}

impl<T> Sgd<T> {
    /// Plain SGD with no momentum.
    pub fn new(lr: f64) -> Self {
        Self::with_momentum(lr, 0.0)
    }

    /// SGD whose velocity decays by `momentum` each step.
    pub fn with_momentum(lr: f64, momentum: f64) -> Self {
        Self {
            lr,
            momentum,
            velocity: None,
        }
    }

    /// Learning rate.
    pub fn lr(&self) -> f64 {
        self.lr
    }

    /// Momentum coefficient; `0.0` for plain SGD.
    pub fn momentum(&self) -> f64 {
        self.momentum
    }
}

impl<T: Scalar> Optimizer<T> for Sgd<T> {
    fn update(&mut self, w: &Tensor<T>, g: &Tensor<T>) -> Result<Tensor<T>> {
        let decayed = match &self.velocity {
            Some(v) => v.mul_scalar(self.momentum)?,
            None => w.zeros_like(),
        };
        let v = decayed.add(&g.mul_scalar(1.0 - self.momentum)?)?;
        let next = w.sub(&v.mul_scalar(self.lr)?)?;
        self.velocity = Some(v);
        Ok(next)
    }

    fn fresh(&self) -> Box<dyn Optimizer<T>> {
        Box::new(Self::with_momentum(self.lr, self.momentum))
    }
}
