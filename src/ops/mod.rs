//! # Tensor Operations
//!
//! Every operation here reads its inputs, allocates a fresh result and never
//! aliases a source buffer.
//!
//! ## Submodules
//!
//! - [`elementwise`]: broadcasting engine and the arithmetic built on it
//! - [`dot`]: generalized contraction (matrix multiply of any rank)
//! - [`transpose`]: full axis reversal by index remapping
//! - [`math`]: elementwise transcendental and clamp functions
//!
//! ## Adding an operation
//!
//! 1. Express it in terms of [`crate::shape`] and the scalar's
//!    [`crate::numeric::NumOps`] table.
//! 2. Validate shapes before allocating the output.
//! 3. Return `Result` for anything that depends on caller-supplied shapes.

pub mod dot;
pub mod elementwise;
pub mod math;
pub mod transpose;
