//! Broadcasting elementwise engine.
//!
//! [`Tensor::zip_with`] is the single algorithm behind every binary operator:
//! it computes the broadcast result shape, then for each result position maps
//! the coordinate back into both operands and applies a scalar function.
//! Tensor-scalar operators wrap the scalar in a rank-0 tensor and go through
//! the same path.

use core::ops::Neg;

use crate::error::Result;
use crate::numeric::Scalar;
use crate::shape;
use crate::tensors::Tensor;

impl<T: Scalar> Tensor<T> {
    /// Applies `f` pairwise across `self` and `other` under broadcasting.
    ///
    /// # Errors
    /// [`crate::TensorError::IncompatibleShapes`] if the shapes do not
    /// broadcast, or the first error returned by `f`.
    pub fn zip_with<F>(&self, other: &Self, f: F) -> Result<Self>
    where
        F: Fn(T, T) -> Result<T>,
    {
        let out_shape = shape::broadcast_shape(self.shape(), other.shape())?;
        let count = shape::element_count(&out_shape)?;
        let (a, b) = (self.data(), other.data());

        let mut out_idx = vec![0; out_shape.len()];
        let mut a_idx = vec![0; self.rank()];
        let mut b_idx = vec![0; other.rank()];
        let mut data = Vec::with_capacity(count);

        for linear in 0..count {
            shape::linear_to_multi_index(linear, &out_shape, &mut out_idx);
            shape::broadcast_index(&out_idx, self.shape(), &mut a_idx);
            shape::broadcast_index(&out_idx, other.shape(), &mut b_idx);
            let x = a[shape::multi_index_to_linear(&a_idx, self.shape())];
            let y = b[shape::multi_index_to_linear(&b_idx, other.shape())];
            data.push(f(x, y)?);
        }

        Tensor::new(out_shape, data)
    }

    /// Expands the tensor to the broadcast of its shape with `target`.
    ///
    /// # Errors
    /// [`crate::TensorError::IncompatibleShapes`] if the shapes conflict.
    ///
    /// # Example
    /// ```rust
    /// use tensor_mlp::tensor;
    /// let row = tensor!([[1, 2, 3]]);
    /// let grid = row.broadcast_to([2, 3]).unwrap();
    /// assert_eq!(grid.data(), &[1, 2, 3, 1, 2, 3]);
    /// ```
    pub fn broadcast_to(&self, target: impl Into<Vec<usize>>) -> Result<Self> {
        let target = target.into();
        let out_shape = shape::broadcast_shape(self.shape(), &target)?;
        let count = shape::element_count(&out_shape)?;
        let src = self.data();

        let mut out_idx = vec![0; out_shape.len()];
        let mut src_idx = vec![0; self.rank()];
        let data = (0..count)
            .map(|linear| {
                shape::linear_to_multi_index(linear, &out_shape, &mut out_idx);
                shape::broadcast_index(&out_idx, self.shape(), &mut src_idx);
                src[shape::multi_index_to_linear(&src_idx, self.shape())]
            })
            .collect();

        Tensor::new(out_shape, data)
    }

    /// Elementwise `self + other`.
    ///
    /// # Errors
    /// [`crate::TensorError::IncompatibleShapes`] if the shapes do not broadcast.
    pub fn add(&self, other: &Self) -> Result<Self> {
        let ops = T::ops();
        self.zip_with(other, |x, y| Ok(ops.add(x, y)))
    }

    /// Elementwise `self - other`.
    ///
    /// # Errors
    /// [`crate::TensorError::IncompatibleShapes`] if the shapes do not broadcast.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        let ops = T::ops();
        self.zip_with(other, |x, y| Ok(ops.sub(x, y)))
    }

    /// Elementwise `self * other`.
    ///
    /// # Errors
    /// [`crate::TensorError::IncompatibleShapes`] if the shapes do not broadcast.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        let ops = T::ops();
        self.zip_with(other, |x, y| Ok(ops.mul(x, y)))
    }

    /// Elementwise `self / other`.
    ///
    /// # Errors
    /// [`crate::TensorError::IncompatibleShapes`] if the shapes do not
    /// broadcast, or [`crate::TensorError::NotSupported`] for an integer
    /// division by zero.
    pub fn div(&self, other: &Self) -> Result<Self> {
        let ops = T::ops();
        self.zip_with(other, |x, y| ops.div(x, y))
    }

    fn scalar_operand(s: f64) -> Self {
        Self::scalar(T::ops().from_f64(s))
    }

    /// `self + s` for every element.
    ///
    /// # Errors
    /// Never fails for a valid tensor; the `Result` mirrors the tensor-tensor form.
    pub fn add_scalar(&self, s: f64) -> Result<Self> {
        self.add(&Self::scalar_operand(s))
    }

    /// `self - s` for every element.
    ///
    /// # Errors
    /// Never fails for a valid tensor; the `Result` mirrors the tensor-tensor form.
    pub fn sub_scalar(&self, s: f64) -> Result<Self> {
        self.sub(&Self::scalar_operand(s))
    }

    /// `s - self` for every element.
    ///
    /// # Errors
    /// Never fails for a valid tensor; the `Result` mirrors the tensor-tensor form.
    ///
    /// # Example
    /// ```rust
    /// use tensor_mlp::tensor;
    /// let a = tensor!([[1, 2], [3, 4]]);
    /// assert_eq!(a.rsub_scalar(2.0).unwrap(), tensor!([[1, 0], [-1, -2]]));
    /// ```
    pub fn rsub_scalar(&self, s: f64) -> Result<Self> {
        Self::scalar_operand(s).sub(self)
    }

    /// `self * s` for every element.
    ///
    /// # Errors
    /// Never fails for a valid tensor; the `Result` mirrors the tensor-tensor form.
    pub fn mul_scalar(&self, s: f64) -> Result<Self> {
        self.mul(&Self::scalar_operand(s))
    }

    /// `self / s` for every element.
    ///
    /// # Errors
    /// [`crate::TensorError::NotSupported`] for an integer division by zero.
    pub fn div_scalar(&self, s: f64) -> Result<Self> {
        self.div(&Self::scalar_operand(s))
    }

    /// `s / self` for every element.
    ///
    /// # Errors
    /// [`crate::TensorError::NotSupported`] for an integer division by zero.
    pub fn rdiv_scalar(&self, s: f64) -> Result<Self> {
        Self::scalar_operand(s).div(self)
    }

    /// Elementwise negation.
    pub fn neg(&self) -> Self {
        let ops = T::ops();
        self.map(|x| ops.neg(x))
    }
}

impl<T: Scalar> Neg for &Tensor<T> {
    type Output = Tensor<T>;

    fn neg(self) -> Tensor<T> {
        Tensor::neg(self)
    }
}

impl<T: Scalar> Neg for Tensor<T> {
    type Output = Tensor<T>;

    fn neg(self) -> Tensor<T> {
        Tensor::neg(&self)
    }
}
