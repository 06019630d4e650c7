//! Generalized contraction.
//!
//! [`Tensor::dot`] extends matrix multiplication to any rank: the last axis of
//! the left operand is contracted against the second-to-last axis of the right
//! operand, and every other axis survives in order.
//!
//! ```text
//! left  [a0, .., ap, k]
//! right [b0, .., bq, k, n]
//! out   [a0, .., ap, b0, .., bq, n]
//! ```

use std::borrow::Cow;

use crate::error::{Result, TensorError};
use crate::numeric::Scalar;
use crate::shape;
use crate::tensors::Tensor;

impl<T: Scalar> Tensor<T> {
    /// Contracts `self` with `other`.
    ///
    /// A rank-1 left operand is treated as a `1 × n` row and a rank-1 right
    /// operand as an `n × 1` column; the promoted axes stay in the result.
    /// Accumulation uses the scalar type's own `mul` and `add`, so integer
    /// tensors wrap and float tensors round exactly as their type does.
    ///
    /// # Errors
    /// [`TensorError::DimensionMismatch`] if the contracted axes differ, or
    /// [`TensorError::InvalidShape`] for a rank-0 operand.
    ///
    /// # Example
    /// ```rust
    /// use tensor_mlp::tensor;
    /// let a = tensor!([[1, 2], [3, 4]]);
    /// let b = tensor!([[5, 6], [7, 8]]);
    /// assert_eq!(a.dot(&b).unwrap(), tensor!([[19, 22], [43, 50]]));
    /// ```
    pub fn dot(&self, other: &Self) -> Result<Self> {
        let left = promote(self, |n| vec![1, n])?;
        let right = promote(other, |n| vec![n, 1])?;
        let (ls, rs) = (left.shape(), right.shape());

        let k = ls[ls.len() - 1];
        let rk = rs[rs.len() - 2];
        if k != rk {
            return Err(TensorError::DimensionMismatch {
                lhs: self.shape().to_vec(),
                rhs: other.shape().to_vec(),
                left: k,
                right: rk,
            });
        }

        let n = rs[rs.len() - 1];
        let left_outer: usize = ls[..ls.len() - 1].iter().product();
        let right_batch: usize = rs[..rs.len() - 2].iter().product();

        let mut out_shape = ls[..ls.len() - 1].to_vec();
        out_shape.extend_from_slice(&rs[..rs.len() - 2]);
        out_shape.push(n);
        let count = shape::element_count(&out_shape)?;
        tracing::trace!(lhs = ?ls, rhs = ?rs, out = ?out_shape, "contracting");

        let ops = T::ops();
        let (a, b) = (left.data(), right.data());
        let mut data = Vec::with_capacity(count);
        for i in 0..left_outer {
            let row = &a[i * k..(i + 1) * k];
            for batch in 0..right_batch {
                let block = &b[batch * k * n..(batch + 1) * k * n];
                for j in 0..n {
                    let sum = row.iter().enumerate().fold(ops.zero(), |acc, (t, &x)| {
                        ops.add(acc, ops.mul(x, block[t * n + j]))
                    });
                    data.push(sum);
                }
            }
        }

        Ok(Tensor::from_parts(out_shape, data))
    }
}

// Reshapes a rank-1 operand with `lift`; ranks of two or more pass through.
fn promote<T: Scalar>(
    t: &Tensor<T>,
    lift: impl Fn(usize) -> Vec<usize>,
) -> Result<Cow<'_, Tensor<T>>> {
    match t.rank() {
        0 => Err(TensorError::InvalidShape {
            shape: Vec::new(),
            reason: "cannot contract a rank-0 tensor",
        }),
        1 => Ok(Cow::Owned(t.reshape(lift(t.shape()[0]))?)),
        _ => Ok(Cow::Borrowed(t)),
    }
}
