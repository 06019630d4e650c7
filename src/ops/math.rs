//! Elementwise scalar math.
//!
//! Thin wrappers that push every element through the scalar type's ops
//! table. Transcendental functions fail with
//! [`crate::TensorError::NotSupported`] on integer tensors, before any output
//! is produced.

use crate::error::Result;
use crate::numeric::Scalar;
use crate::tensors::Tensor;

impl<T: Scalar> Tensor<T> {
    /// Elementwise `e^x`.
    ///
    /// # Errors
    /// [`crate::TensorError::NotSupported`] for integer tensors.
    pub fn exp(&self) -> Result<Self> {
        let ops = T::ops();
        self.try_map(|x| ops.exp(x))
    }

    /// Elementwise natural logarithm.
    ///
    /// # Errors
    /// [`crate::TensorError::NotSupported`] for integer tensors.
    pub fn log(&self) -> Result<Self> {
        let ops = T::ops();
        self.try_map(|x| ops.log(x))
    }

    /// Elementwise square root.
    ///
    /// # Errors
    /// [`crate::TensorError::NotSupported`] for integer tensors.
    pub fn sqrt(&self) -> Result<Self> {
        let ops = T::ops();
        self.try_map(|x| ops.sqrt(x))
    }

    /// Elementwise hyperbolic tangent.
    ///
    /// # Errors
    /// [`crate::TensorError::NotSupported`] for integer tensors.
    pub fn tanh(&self) -> Result<Self> {
        let ops = T::ops();
        self.try_map(|x| ops.tanh(x))
    }

    /// Elementwise logistic function `1 / (1 + e^-x)`.
    ///
    /// # Errors
    /// [`crate::TensorError::NotSupported`] for integer tensors.
    pub fn sigmoid(&self) -> Result<Self> {
        let ops = T::ops();
        self.try_map(|x| ops.sigmoid(x))
    }

    pub fn abs(&self) -> Self {
        let ops = T::ops();
        self.map(|x| ops.abs(x))
    }

    pub fn square(&self) -> Self {
        let ops = T::ops();
        self.map(|x| ops.square(x))
    }

    /// Elementwise `min(max, max(min, x))`.
    ///
    /// # Example
    /// ```rust
    /// use tensor_mlp::tensor;
    /// let t = tensor!([-5.0, 0.0, 5.0]).clamp(-1.0, 1.0);
    /// assert_eq!(t.data(), &[-1.0, 0.0, 1.0]);
    /// ```
    pub fn clamp(&self, min: f64, max: f64) -> Self {
        let ops = T::ops();
        self.map(|x| ops.clamp(x, min, max))
    }
}
