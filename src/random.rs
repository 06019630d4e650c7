//! Random tensor initializers.
//!
//! Generators are always passed in by the caller, so seeding a
//! [`rand::rngs::StdRng`] makes initialization reproducible and concurrent
//! callers never contend on shared state.
//!
//! # Example
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use tensor_mlp::random::uniform;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let w = uniform::<f64, _>(-0.5, 0.5, [3, 2], &mut rng).unwrap();
//! assert!(w.data().iter().all(|&x| (-0.5..0.5).contains(&x)));
//! ```

use rand::Rng;

use crate::error::{Result, TensorError};
use crate::numeric::Scalar;
use crate::tensors::Tensor;

/// Draws a tensor with elements `lo + (hi - lo) * u`, `u ~ U[0, 1)`.
///
/// Samples are drawn in `f64` and converted to `T`, so integer tensors get
/// rounded values. An empty shape yields a single-element `[1]` tensor.
///
/// # Errors
/// [`TensorError::InvalidRange`] unless `lo < hi`, or
/// [`TensorError::InvalidShape`] for a zero dimension.
pub fn uniform<T, R>(lo: f64, hi: f64, shape: impl Into<Vec<usize>>, rng: &mut R) -> Result<Tensor<T>>
where
    T: Scalar,
    R: Rng + ?Sized,
{
    // also rejects NaN bounds
    if !(lo < hi) {
        return Err(TensorError::InvalidRange { lo, hi });
    }
    let mut shape = shape.into();
    if shape.is_empty() {
        shape.push(1);
    }
    let count = crate::shape::element_count(&shape)?;

    let ops = T::ops();
    let data = (0..count)
        .map(|_| ops.from_f64(lo + (hi - lo) * rng.random::<f64>()))
        .collect();
    Tensor::new(shape, data)
}
