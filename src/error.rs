//! Error types for tensor operations.
//!
//! Every failure is detected before a result buffer is published, so an
//! `Err` always leaves the inputs untouched.

/// Errors raised by the tensor engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TensorError {
    /// A shape has a zero dimension, or does not fit the supplied buffer.
    #[error("invalid shape {shape:?}: {reason}")]
    InvalidShape {
        shape: Vec<usize>,
        reason: &'static str,
    },

    /// An axis-0 index lies outside `[0, len)`.
    #[error("index {index} out of range for axis of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A slice assignment supplied the wrong number of elements.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Two shapes cannot be broadcast together.
    #[error("cannot broadcast {lhs:?} with {rhs:?}")]
    IncompatibleShapes { lhs: Vec<usize>, rhs: Vec<usize> },

    /// The contracted axes of a dot product differ in length.
    #[error("cannot contract {lhs:?} with {rhs:?}: inner dimensions {left} and {right} differ")]
    DimensionMismatch {
        lhs: Vec<usize>,
        rhs: Vec<usize>,
        left: usize,
        right: usize,
    },

    /// The scalar type has no meaningful definition for this operation.
    #[error("{op} is not supported for {scalar}")]
    NotSupported {
        op: &'static str,
        scalar: &'static str,
    },

    /// An activation name did not match any known activation.
    #[error("unknown activation {0:?}")]
    UnknownActivation(String),

    /// A sampling interval is empty or reversed.
    #[error("invalid sampling range [{lo}, {hi})")]
    InvalidRange { lo: f64, hi: f64 },
}

/// Shorthand for results produced by this crate.
pub type Result<T> = core::result::Result<T, TensorError>;
