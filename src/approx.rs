//! Approximate equality for scalars and tensors.
//!
//! Float arithmetic through different association orders (a contraction
//! versus a hand-written sum, say) rarely agrees bit for bit. These helpers
//! grade the absolute difference against a small ladder of tolerances.

use crate::numeric::Scalar;
use crate::tensors::Tensor;

/// The loosest tolerance still considered equal.
pub const MAX_ERROR: f64 = 1e-3;

/// The tolerance expected of single-precision results.
pub const F32_ERROR: f64 = 1e-5;

/// The tolerance expected of double-precision results.
pub const F64_ERROR: f64 = 1e-12;

/// How close two values are.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ApproxEquality {
    /// Within [`F64_ERROR`].
    Precise = 0,
    /// Within [`F32_ERROR`].
    Partial = 1,
    /// Within [`MAX_ERROR`].
    Relative = 2,
    /// Not equal, or shapes differ.
    Scarce = 3,
}

impl ApproxEquality {
    fn grade(diff: f64) -> Self {
        if diff < F64_ERROR {
            Self::Precise
        } else if diff < F32_ERROR {
            Self::Partial
        } else if diff < MAX_ERROR {
            Self::Relative
        } else {
            Self::Scarce
        }
    }
}

/// Grades the distance between two values.
pub trait RelativeEq<Rhs: ?Sized = Self> {
    fn approx_cmp(&self, rhs: &Rhs) -> ApproxEquality;
}

macro_rules! scalar_relative_eq {
    ($($t:ty),+) => {$(
        impl RelativeEq for $t {
            fn approx_cmp(&self, rhs: &Self) -> ApproxEquality {
                let ops = <$t as Scalar>::ops();
                ApproxEquality::grade((ops.to_f64(*self) - ops.to_f64(*rhs)).abs())
            }
        }
    )+};
}

scalar_relative_eq!(i32, f32, f64);

impl<T: Scalar + RelativeEq> RelativeEq for Tensor<T> {
    /// The worst grade over all element pairs; differing shapes are
    /// [`ApproxEquality::Scarce`].
    fn approx_cmp(&self, rhs: &Self) -> ApproxEquality {
        if self.shape() != rhs.shape() {
            return ApproxEquality::Scarce;
        }
        self.data()
            .iter()
            .zip(rhs.data())
            .map(|(a, b)| a.approx_cmp(b))
            .max()
            .unwrap_or(ApproxEquality::Precise)
    }
}

/// `true` when `a` and `b` agree to at least `level`.
///
/// # Example
/// ```rust
/// use tensor_mlp::approx::{approx_eq, ApproxEquality};
/// use tensor_mlp::tensors::Tensor;
///
/// let a = Tensor::new([2], vec![0.1 + 0.2, 1.0]).unwrap();
/// let b = Tensor::new([2], vec![0.3, 1.0]).unwrap();
/// assert!(approx_eq(&a, &b, ApproxEquality::Precise));
/// ```
pub fn approx_eq<A: RelativeEq + ?Sized>(a: &A, b: &A, level: ApproxEquality) -> bool {
    a.approx_cmp(b) <= level
}
