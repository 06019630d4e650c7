//! Activation functions and their derivatives.
//!
//! Each activation maps a pre-activation tensor to its output, and reports
//! the elementwise derivative at that same input for the backward pass.

use core::str::FromStr;

use crate::error::{Result, TensorError};
use crate::numeric::Scalar;
use crate::tensors::Tensor;

/// An elementwise (or row-wise) activation.
pub trait Activation<T: Scalar> {
    /// Name shown in network summaries.
    fn name(&self) -> &'static str;

    /// Forward value `f(x)`.
    ///
    /// # Errors
    /// [`TensorError::NotSupported`] when `f` needs transcendental functions
    /// and `T` is an integer type.
    fn function(&self, x: &Tensor<T>) -> Result<Tensor<T>>;

    /// Derivative `f'(x)`, same shape as `x`.
    ///
    /// # Errors
    /// As for [`Activation::function`].
    fn gradient(&self, x: &Tensor<T>) -> Result<Tensor<T>>;
}

/// `f(x) = x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T: Scalar> Activation<T> for Identity {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn function(&self, x: &Tensor<T>) -> Result<Tensor<T>> {
        Ok(x.clone())
    }

    fn gradient(&self, x: &Tensor<T>) -> Result<Tensor<T>> {
        Ok(x.ones_like())
    }
}

/// `f(x) = 1 / (1 + e^-x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmoid;

impl<T: Scalar> Activation<T> for Sigmoid {
    fn name(&self) -> &'static str {
        "sigmoid"
    }

    fn function(&self, x: &Tensor<T>) -> Result<Tensor<T>> {
        x.sigmoid()
    }

    fn gradient(&self, x: &Tensor<T>) -> Result<Tensor<T>> {
        let s = x.sigmoid()?;
        s.mul(&s.rsub_scalar(1.0)?)
    }
}

/// `f(x) = tanh(x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tanh;

impl<T: Scalar> Activation<T> for Tanh {
    fn name(&self) -> &'static str {
        "tanh"
    }

    fn function(&self, x: &Tensor<T>) -> Result<Tensor<T>> {
        x.tanh()
    }

    fn gradient(&self, x: &Tensor<T>) -> Result<Tensor<T>> {
        x.tanh()?.square().rsub_scalar(1.0)
    }
}

/// Softmax over the last axis, shifted by the row maximum for stability.
///
/// The gradient is the diagonal of the Jacobian, `p * (1 - p)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Softmax;

impl<T: Scalar> Activation<T> for Softmax {
    fn name(&self) -> &'static str {
        "softmax"
    }

    fn function(&self, x: &Tensor<T>) -> Result<Tensor<T>> {
        let ops = T::ops();
        let width = x.shape().last().copied().unwrap_or(1);
        let mut data = Vec::with_capacity(x.element_count());
        for row in x.data().chunks(width) {
            let max = row
                .iter()
                .map(|&v| ops.to_f64(v))
                .fold(f64::NEG_INFINITY, f64::max);
            let exps = row
                .iter()
                .map(|&v| ops.exp(ops.sub_scalar(v, max)))
                .collect::<Result<Vec<T>>>()?;
            let total: f64 = exps.iter().map(|&e| ops.to_f64(e)).sum();
            for e in exps {
                data.push(ops.div_scalar(e, total)?);
            }
        }
        Tensor::new(x.shape().to_vec(), data)
    }

    fn gradient(&self, x: &Tensor<T>) -> Result<Tensor<T>> {
        let p = self.function(x)?;
        p.mul(&p.rsub_scalar(1.0)?)
    }
}

/// Named activation, selectable from configuration strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationKind {
    Identity,
    Sigmoid,
    Tanh,
    Softmax,
}

impl ActivationKind {
    /// Boxes the matching activation for scalar type `T`.
    pub fn build<T: Scalar>(self) -> Box<dyn Activation<T>> {
        match self {
            Self::Identity => Box::new(Identity),
            Self::Sigmoid => Box::new(Sigmoid),
            Self::Tanh => Box::new(Tanh),
            Self::Softmax => Box::new(Softmax),
        }
    }
}

impl FromStr for ActivationKind {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "identity" => Ok(Self::Identity),
            "sigmoid" => Ok(Self::Sigmoid),
            "tanh" => Ok(Self::Tanh),
            "softmax" => Ok(Self::Softmax),
            _ => Err(TensorError::UnknownActivation(s.to_owned())),
        }
    }
}
