//! tensor_mlp: a minimal generic tensor engine and the feed-forward network
//! trainer built on it.
//!
//! Designed for clarity over speed: every operation is a plain single-threaded
//! loop over a flat row-major buffer, and every result is a fresh value.
//!
//! # Features
//!
//! - Dynamic-rank tensors over `i32`, `f32` and `f64`, with per-type numeric
//!   tables instead of operator bounds on the element type.
//! - NumPy-style two-operand broadcasting for all elementwise arithmetic.
//! - Generalized contraction (`dot`) and full axis-reversal transpose.
//! - Seedable random initializers and a small dense-network trainer.
//!
//! # Modules
//!
//! - [`numeric`]: per-scalar-type ops tables.
//! - [`shape`]: element counts, index conversion and broadcasting rules.
//! - [`tensors`]: the [`Tensor`] value type and the [`tensor!`] macro.
//! - [`ops`]: broadcasting arithmetic, contraction, transpose, scalar math.
//! - [`nn`]: activations, losses, SGD, dense layers and the training loop.
//!
//! # Example
//!
//! ```rust
//! use tensor_mlp::tensor;
//!
//! let a = tensor!([[1.0, 2.0], [3.0, 4.0]]);
//! let b = tensor!([10.0, 20.0]);
//! let c = a.add(&b).unwrap();
//! assert_eq!(c, tensor!([[11.0, 22.0], [13.0, 24.0]]));
//! assert_eq!(a.dot(&a.transpose()).unwrap().shape(), &[2, 2]);
//! ```

pub mod approx;
pub mod config;
mod display;
pub mod error;
pub mod nn;
pub mod numeric;
pub mod ops;
pub mod random;
pub mod shape;
pub mod tensors;

pub use error::{Result, TensorError};
pub use numeric::{NumOps, Scalar};
pub use tensors::Tensor;
