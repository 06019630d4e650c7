//! Per-scalar-type numeric capability tables.
//!
//! Generic tensor algorithms never use operators on their element type
//! directly. Instead every element type implements [`Scalar`], which hands out
//! a process-wide [`NumOps`] table built lazily on first use. The same
//! broadcast and contraction code therefore runs over `i32`, `f32` and `f64`
//! with the exact rounding behavior of each type.
//!
//! # Integer semantics
//!
//! - `add`, `sub`, `mul`, `neg`, `abs` and `square` wrap on overflow.
//! - `div` truncates toward zero; a zero divisor is [`TensorError::NotSupported`].
//! - Conversions from `f64` round half to even and saturate at the type bounds.
//! - `clamp` is evaluated in `f64` and truncated toward zero.
//! - `exp`, `log`, `sqrt`, `tanh` and `sigmoid` are floating-point only.
//!
//! # Example
//!
//! ```rust
//! use tensor_mlp::numeric::Scalar;
//!
//! let ops = f64::ops();
//! assert_eq!(ops.add(1.5, 2.0), 3.5);
//! assert_eq!(ops.clamp(7.0, -1.0, 1.0), 1.0);
//! assert!(i32::ops().exp(1).is_err());
//! ```

use core::fmt;

use lazy_static::lazy_static;

use crate::error::{Result, TensorError};

/// Arithmetic and transcendental primitives for one scalar type.
///
/// Implementations are stateless; exactly one instance per type lives for the
/// whole process.
pub trait NumOps<T: Copy>: Send + Sync {
    /// Name of the scalar type, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Additive identity.
    fn zero(&self) -> T;

    /// Multiplicative identity.
    fn one(&self) -> T;

    /// Converts an `f64` into this scalar type.
    fn from_f64(&self, v: f64) -> T;

    /// Widens a scalar to `f64`.
    fn to_f64(&self, v: T) -> f64;

    fn neg(&self, a: T) -> T;
    fn add(&self, a: T, b: T) -> T;
    fn sub(&self, a: T, b: T) -> T;
    fn mul(&self, a: T, b: T) -> T;

    /// Divides `a` by `b`.
    ///
    /// # Errors
    /// Integer tables reject a zero divisor.
    fn div(&self, a: T, b: T) -> Result<T>;

    fn exp(&self, x: T) -> Result<T>;
    fn log(&self, x: T) -> Result<T>;
    fn sqrt(&self, x: T) -> Result<T>;
    fn tanh(&self, x: T) -> Result<T>;
    fn sigmoid(&self, x: T) -> Result<T>;
    fn abs(&self, x: T) -> T;

    fn square(&self, x: T) -> T {
        self.mul(x, x)
    }

    /// Computes `min(max, max(min, x))`.
    fn clamp(&self, x: T, min: f64, max: f64) -> T;

    // The mixed-type helpers below serve per-element code outside the
    // broadcast engine (softmax rows, external optimizers). Tensor-level
    // `*_scalar` methods go through a rank-0 operand instead.

    /// `a + s` with `s` converted to `T` first.
    fn add_scalar(&self, a: T, s: f64) -> T {
        self.add(a, self.from_f64(s))
    }

    /// `a - s` with `s` converted to `T` first.
    fn sub_scalar(&self, a: T, s: f64) -> T {
        self.sub(a, self.from_f64(s))
    }

    /// `s - a` with `s` converted to `T` first.
    fn scalar_sub(&self, s: f64, a: T) -> T {
        self.sub(self.from_f64(s), a)
    }

    /// `a * s` with `s` converted to `T` first.
    fn mul_scalar(&self, a: T, s: f64) -> T {
        self.mul(a, self.from_f64(s))
    }

    /// `a / s` with `s` converted to `T` first.
    fn div_scalar(&self, a: T, s: f64) -> Result<T> {
        self.div(a, self.from_f64(s))
    }

    /// `s / a` with `s` converted to `T` first.
    fn scalar_div(&self, s: f64, a: T) -> Result<T> {
        self.div(self.from_f64(s), a)
    }
}

/// Element types a [`crate::tensors::Tensor`] can compute with.
pub trait Scalar:
    Copy + PartialEq + PartialOrd + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Type name shown in diagnostics and the NumPy display header.
    const NAME: &'static str;

    /// Whether the pretty printer should use fixed six-decimal output.
    const IS_FLOAT: bool;

    /// Returns the singleton ops table for this type.
    fn ops() -> &'static dyn NumOps<Self>;
}

// NaN in `x` passes through unchanged.
fn clamp_f64(x: f64, min: f64, max: f64) -> f64 {
    let lo = if x < min { min } else { x };
    if lo > max { max } else { lo }
}

/// Ops table for `i32`.
#[derive(Debug, Default)]
pub struct IntOps;

impl IntOps {
    fn unsupported<T>(op: &'static str) -> Result<T> {
        Err(TensorError::NotSupported { op, scalar: "i32" })
    }
}

impl NumOps<i32> for IntOps {
    fn name(&self) -> &'static str {
        "i32"
    }

    fn zero(&self) -> i32 {
        0
    }

    fn one(&self) -> i32 {
        1
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(&self, v: f64) -> i32 {
        v.round_ties_even() as i32
    }

    fn to_f64(&self, v: i32) -> f64 {
        f64::from(v)
    }

    fn neg(&self, a: i32) -> i32 {
        a.wrapping_neg()
    }

    fn add(&self, a: i32, b: i32) -> i32 {
        a.wrapping_add(b)
    }

    fn sub(&self, a: i32, b: i32) -> i32 {
        a.wrapping_sub(b)
    }

    fn mul(&self, a: i32, b: i32) -> i32 {
        a.wrapping_mul(b)
    }

    fn div(&self, a: i32, b: i32) -> Result<i32> {
        if b == 0 {
            return Self::unsupported("division by zero");
        }
        Ok(a.wrapping_div(b))
    }

    fn exp(&self, _: i32) -> Result<i32> {
        Self::unsupported("exp")
    }

    fn log(&self, _: i32) -> Result<i32> {
        Self::unsupported("log")
    }

    fn sqrt(&self, _: i32) -> Result<i32> {
        Self::unsupported("sqrt")
    }

    fn tanh(&self, _: i32) -> Result<i32> {
        Self::unsupported("tanh")
    }

    fn sigmoid(&self, _: i32) -> Result<i32> {
        Self::unsupported("sigmoid")
    }

    fn abs(&self, x: i32) -> i32 {
        x.wrapping_abs()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn clamp(&self, x: i32, min: f64, max: f64) -> i32 {
        clamp_f64(f64::from(x), min, max) as i32
    }
}

macro_rules! float_ops {
    ($ops:ident, $t:ty, $name:literal) => {
        #[doc = concat!("Ops table for `", $name, "`.")]
        #[derive(Debug, Default)]
        pub struct $ops;

        impl NumOps<$t> for $ops {
            fn name(&self) -> &'static str {
                $name
            }

            fn zero(&self) -> $t {
                0.0
            }

            fn one(&self) -> $t {
                1.0
            }

            #[allow(clippy::cast_possible_truncation)]
            fn from_f64(&self, v: f64) -> $t {
                v as $t
            }

            fn to_f64(&self, v: $t) -> f64 {
                f64::from(v)
            }

            fn neg(&self, a: $t) -> $t {
                -a
            }

            fn add(&self, a: $t, b: $t) -> $t {
                a + b
            }

            fn sub(&self, a: $t, b: $t) -> $t {
                a - b
            }

            fn mul(&self, a: $t, b: $t) -> $t {
                a * b
            }

            fn div(&self, a: $t, b: $t) -> Result<$t> {
                Ok(a / b)
            }

            fn exp(&self, x: $t) -> Result<$t> {
                Ok(x.exp())
            }

            fn log(&self, x: $t) -> Result<$t> {
                Ok(x.ln())
            }

            fn sqrt(&self, x: $t) -> Result<$t> {
                Ok(x.sqrt())
            }

            fn tanh(&self, x: $t) -> Result<$t> {
                Ok(x.tanh())
            }

            #[allow(clippy::cast_possible_truncation)]
            fn sigmoid(&self, x: $t) -> Result<$t> {
                Ok((1.0 / (1.0 + (-f64::from(x)).exp())) as $t)
            }

            fn abs(&self, x: $t) -> $t {
                x.abs()
            }

            #[allow(clippy::cast_possible_truncation)]
            fn clamp(&self, x: $t, min: f64, max: f64) -> $t {
                clamp_f64(f64::from(x), min, max) as $t
            }
        }
    };
}

float_ops!(F32Ops, f32, "f32");
float_ops!(F64Ops, f64, "f64");

lazy_static! {
    static ref I32_OPS: IntOps = {
        tracing::debug!(scalar = "i32", "numeric ops table initialized");
        IntOps
    };
    static ref F32_OPS: F32Ops = {
        tracing::debug!(scalar = "f32", "numeric ops table initialized");
        F32Ops
    };
    static ref F64_OPS: F64Ops = {
        tracing::debug!(scalar = "f64", "numeric ops table initialized");
        F64Ops
    };
}

impl Scalar for i32 {
    const NAME: &'static str = "i32";
    const IS_FLOAT: bool = false;

    fn ops() -> &'static dyn NumOps<Self> {
        &*I32_OPS
    }
}

impl Scalar for f32 {
    const NAME: &'static str = "f32";
    const IS_FLOAT: bool = true;

    fn ops() -> &'static dyn NumOps<Self> {
        &*F32_OPS
    }
}

impl Scalar for f64 {
    const NAME: &'static str = "f64";
    const IS_FLOAT: bool = true;

    fn ops() -> &'static dyn NumOps<Self> {
        &*F64_OPS
    }
}
