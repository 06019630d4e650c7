//! Loss functions.
//!
//! `y` is always the target and `p` the prediction, both of the same shape.

use crate::error::Result;
use crate::numeric::Scalar;
use crate::tensors::Tensor;

/// Lower clamp bound applied to probabilities before taking logarithms.
const PROB_EPSILON: f64 = 1e-7;

/// A differentiable training objective.
pub trait Loss<T: Scalar> {
    /// Elementwise loss values.
    ///
    /// # Errors
    /// Shape errors from broadcasting, or unsupported scalar math.
    fn loss(&self, y: &Tensor<T>, p: &Tensor<T>) -> Result<Tensor<T>>;

    /// Gradient of the loss with respect to `p`.
    ///
    /// # Errors
    /// As for [`Loss::loss`].
    fn grad(&self, y: &Tensor<T>, p: &Tensor<T>) -> Result<Tensor<T>>;

    /// Accuracy in `[0, 1]`, or `0.0` where it has no meaning.
    ///
    /// # Errors
    /// As for [`Loss::loss`].
    fn accuracy(&self, y: &Tensor<T>, p: &Tensor<T>) -> Result<f64>;
}

/// `0.5 * (y - p)^2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquareLoss;

impl<T: Scalar> Loss<T> for SquareLoss {
    fn loss(&self, y: &Tensor<T>, p: &Tensor<T>) -> Result<Tensor<T>> {
        y.sub(p)?.square().mul_scalar(0.5)
    }

    fn grad(&self, y: &Tensor<T>, p: &Tensor<T>) -> Result<Tensor<T>> {
        Ok(-y.sub(p)?)
    }

    fn accuracy(&self, _: &Tensor<T>, _: &Tensor<T>) -> Result<f64> {
        Ok(0.0)
    }
}

/// Binary cross-entropy `-y log p - (1 - y) log(1 - p)`.
///
/// Predictions are clamped to `[1e-7, 1 - 1e-7]` in both the loss and its
/// gradient.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropy;

impl CrossEntropy {
    fn clamped<T: Scalar>(p: &Tensor<T>) -> Tensor<T> {
        p.clamp(PROB_EPSILON, 1.0 - PROB_EPSILON)
    }
}

impl<T: Scalar> Loss<T> for CrossEntropy {
    fn loss(&self, y: &Tensor<T>, p: &Tensor<T>) -> Result<Tensor<T>> {
        let p = Self::clamped(p);
        let pos = (-y).mul(&p.log()?)?;
        let neg = y.rsub_scalar(1.0)?.mul(&p.rsub_scalar(1.0)?.log()?)?;
        pos.sub(&neg)
    }

    fn grad(&self, y: &Tensor<T>, p: &Tensor<T>) -> Result<Tensor<T>> {
        let p = Self::clamped(p);
        let pos = (-y).div(&p)?;
        let neg = y.rsub_scalar(1.0)?.div(&p.rsub_scalar(1.0)?)?;
        pos.add(&neg)
    }

    /// Fraction of elements where `|y - p| < 0.5`.
    #[allow(clippy::cast_precision_loss)]
    fn accuracy(&self, y: &Tensor<T>, p: &Tensor<T>) -> Result<f64> {
        let ops = T::ops();
        let diff = y.sub(p)?;
        let hits = diff
            .data()
            .iter()
            .filter(|&&d| ops.to_f64(d).abs() < 0.5)
            .count();
        Ok(hits as f64 / diff.element_count() as f64)
    }
}
