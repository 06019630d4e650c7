//! Core tensor data structure.
//!
//! # Core Tensor Utilities
//!
//! A [`Tensor`] owns a flat row-major buffer and the shape describing it. The
//! buffer length always equals the product of the shape; every constructor and
//! operation checks this before building a value, so an invalid tensor can
//! never be observed.
//!
//! It supports:
//! - Construction from a shape (zero-filled or filled with a value), from a
//!   flat buffer, from a rank-2 grid, or from nested literals via [`tensor!`]
//! - Axis-0 slice reads and writes
//! - Elementwise maps and casts between scalar types
//! - Reshape with row-major order preserved
//!
//! Arithmetic, broadcasting, contraction and transposition live in
//! [`crate::ops`].
//!
//! ## Design Highlights
//! - Tensors are values: every operation allocates a fresh buffer, and
//!   `clone` is a deep copy.
//! - The only in-place mutation is [`Tensor::set_slice`].
//! - Rank-0 tensors hold exactly one element and act as broadcastable scalars.
//!
//! ## Example
//!
//! ```rust
//! use tensor_mlp::tensors::Tensor;
//! let t = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! assert_eq!(t.shape(), &[2, 3]);
//! assert_eq!(t.slice(1).unwrap().data(), &[4.0, 5.0, 6.0]);
//! ```

use crate::error::{Result, TensorError};
use crate::numeric::Scalar;
use crate::shape;

/// An N-dimensional tensor with a shape and flat row-major data.
///
/// - `shape` defines the structure, e.g. `[2, 3]` for a 2×3 matrix.
/// - `data` holds the flattened content, last axis varying fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T> Tensor<T> {
    /// Creates a tensor from a shape and flat data.
    ///
    /// # Errors
    /// [`TensorError::InvalidShape`] if the shape has a zero dimension or its
    /// element count differs from `data.len()`.
    pub fn new(shape: impl Into<Vec<usize>>, data: Vec<T>) -> Result<Self> {
        let shape = shape.into();
        if shape::element_count(&shape)? != data.len() {
            return Err(TensorError::InvalidShape {
                shape,
                reason: "element count differs from buffer length",
            });
        }
        Ok(Self { shape, data })
    }

    // Caller guarantees `data.len()` is the element count of `shape`.
    pub(crate) fn from_parts(shape: Vec<usize>, data: Vec<T>) -> Self {
        debug_assert_eq!(shape.iter().product::<usize>(), data.len());
        Self { shape, data }
    }

    /// Creates a rank-0 tensor holding a single value.
    pub fn scalar(value: T) -> Self {
        Self {
            shape: Vec::new(),
            data: vec![value],
        }
    }

    /// Creates a tensor with every element set to `value`.
    ///
    /// # Errors
    /// [`TensorError::InvalidShape`] if the shape has a zero dimension.
    pub fn full(value: T, shape: impl Into<Vec<usize>>) -> Result<Self>
    where
        T: Clone,
    {
        let shape = shape.into();
        let count = shape::element_count(&shape)?;
        Ok(Self {
            shape,
            data: vec![value; count],
        })
    }

    /// Builds a rank-2 tensor from a grid of rows.
    ///
    /// # Errors
    /// [`TensorError::InvalidShape`] if the grid has no rows or no columns.
    ///
    /// # Example
    /// ```rust
    /// use tensor_mlp::tensors::Tensor;
    /// let t = Tensor::from_grid(&[[1, 2, 3], [4, 5, 6]]).unwrap();
    /// assert_eq!(t.shape(), &[2, 3]);
    /// ```
    pub fn from_grid<const C: usize>(grid: &[[T; C]]) -> Result<Self>
    where
        T: Clone,
    {
        let data = grid.iter().flat_map(|row| row.iter().cloned()).collect();
        Self::new(vec![grid.len(), C], data)
    }

    /// Shape of the tensor; its length is the rank.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    pub fn element_count(&self) -> usize {
        self.data.len()
    }

    /// Flat row-major view of the elements.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the tensor, returning its buffer.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Reads the element at a full multi-index.
    ///
    /// # Errors
    /// [`TensorError::InvalidShape`] if the index rank differs from the tensor
    /// rank, or [`TensorError::IndexOutOfRange`] if a coordinate is too large.
    pub fn at(&self, index: &[usize]) -> Result<T>
    where
        T: Copy,
    {
        if index.len() != self.rank() {
            return Err(TensorError::InvalidShape {
                shape: self.shape.clone(),
                reason: "index rank differs from tensor rank",
            });
        }
        if let Some((&i, &len)) = index.iter().zip(&self.shape).find(|(i, len)| i >= len) {
            return Err(TensorError::IndexOutOfRange { index: i, len });
        }
        Ok(self.data[shape::multi_index_to_linear(index, &self.shape)])
    }

    // Bounds of the contiguous run addressed by axis-0 index `i`.
    fn slice_bounds(&self, i: usize) -> Result<(usize, usize)> {
        let Some(&len) = self.shape.first() else {
            return Err(TensorError::InvalidShape {
                shape: Vec::new(),
                reason: "a rank-0 tensor cannot be indexed",
            });
        };
        if i >= len {
            return Err(TensorError::IndexOutOfRange { index: i, len });
        }
        let run = self.data.len() / len;
        Ok((i * run, run))
    }

    /// Returns the sub-tensor at index `i` of axis 0.
    ///
    /// The result has the trailing shape `shape[1..]` and a copy of the
    /// contiguous run of elements it covers.
    ///
    /// # Errors
    /// [`TensorError::IndexOutOfRange`] if `i >= shape[0]`, or
    /// [`TensorError::InvalidShape`] for a rank-0 tensor.
    pub fn slice(&self, i: usize) -> Result<Self>
    where
        T: Clone,
    {
        let (start, run) = self.slice_bounds(i)?;
        Ok(Self {
            shape: self.shape[1..].to_vec(),
            data: self.data[start..start + run].to_vec(),
        })
    }

    /// Overwrites the sub-tensor at index `i` of axis 0 with `value`.
    ///
    /// Only the element count of `value` is checked, so a `[3]` tensor may
    /// fill a `[1, 3]` slot.
    ///
    /// # Errors
    /// [`TensorError::IndexOutOfRange`] if `i >= shape[0]`, or
    /// [`TensorError::ShapeMismatch`] if `value` has the wrong element count.
    /// The tensor is unchanged on error.
    pub fn set_slice(&mut self, i: usize, value: &Self) -> Result<()>
    where
        T: Clone,
    {
        let (start, run) = self.slice_bounds(i)?;
        if value.data.len() != run {
            return Err(TensorError::ShapeMismatch {
                expected: run,
                actual: value.data.len(),
            });
        }
        self.data[start..start + run].clone_from_slice(&value.data);
        Ok(())
    }

    /// Applies `f` to every element, producing a tensor of the same shape.
    pub fn map<U, F>(&self, f: F) -> Tensor<U>
    where
        T: Copy,
        F: Fn(T) -> U,
    {
        Tensor {
            shape: self.shape.clone(),
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Applies a fallible `f` to every element.
    ///
    /// # Errors
    /// The first error returned by `f`; no partial result is produced.
    pub fn try_map<U, F>(&self, f: F) -> Result<Tensor<U>>
    where
        T: Copy,
        F: Fn(T) -> Result<U>,
    {
        let data = self.data.iter().map(|&x| f(x)).collect::<Result<Vec<U>>>()?;
        Ok(Tensor {
            shape: self.shape.clone(),
            data,
        })
    }

    /// Returns a tensor with the same elements in the same order but a new
    /// shape.
    ///
    /// # Errors
    /// [`TensorError::InvalidShape`] if the element counts differ.
    pub fn reshape(&self, shape: impl Into<Vec<usize>>) -> Result<Self>
    where
        T: Clone,
    {
        let shape = shape.into();
        if shape::element_count(&shape)? != self.data.len() {
            return Err(TensorError::InvalidShape {
                shape,
                reason: "reshape must preserve the element count",
            });
        }
        Ok(Self {
            shape,
            data: self.data.clone(),
        })
    }
}

impl<T: Scalar> Tensor<T> {
    /// Creates a zero-filled tensor.
    ///
    /// # Errors
    /// [`TensorError::InvalidShape`] if the shape has a zero dimension.
    pub fn zeros(shape: impl Into<Vec<usize>>) -> Result<Self> {
        Self::full(T::ops().zero(), shape)
    }

    /// Creates a tensor filled with ones.
    ///
    /// # Errors
    /// [`TensorError::InvalidShape`] if the shape has a zero dimension.
    pub fn ones(shape: impl Into<Vec<usize>>) -> Result<Self> {
        Self::full(T::ops().one(), shape)
    }

    /// Zero-filled tensor with the shape of `self`.
    pub fn zeros_like(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            data: vec![T::ops().zero(); self.data.len()],
        }
    }

    /// One-filled tensor with the shape of `self`.
    pub fn ones_like(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            data: vec![T::ops().one(); self.data.len()],
        }
    }

    /// Converts every element to another scalar type.
    ///
    /// Conversion goes through `f64`, so casting to `i32` rounds half to even.
    pub fn cast<U: Scalar>(&self) -> Tensor<U> {
        let (from, to) = (T::ops(), U::ops());
        self.map(|x| to.from_f64(from.to_f64(x)))
    }

    /// Sum of all elements, widened to `f64`.
    pub fn sum(&self) -> f64 {
        let ops = T::ops();
        self.data.iter().map(|&x| ops.to_f64(x)).sum()
    }

    /// Mean of all elements, widened to `f64`.
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> f64 {
        self.sum() / self.data.len() as f64
    }

    /// Largest element, widened to `f64`.
    pub fn max(&self) -> f64 {
        let ops = T::ops();
        self.data
            .iter()
            .map(|&x| ops.to_f64(x))
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Defines a tensor from nested literal arrays.
///
/// Supports arbitrary rank as long as sublists are uniform in shape. A bare
/// literal produces a rank-0 tensor.
///
/// # Panics
/// Panics on ragged literals.
///
/// # Example
/// ```
/// use tensor_mlp::tensor;
/// let t = tensor!([[1.0, -2.0], [3.0, 4.0]]);
/// assert_eq!(t.shape(), &[2, 2]);
/// assert_eq!(t.data(), &[1.0, -2.0, 3.0, 4.0]);
/// ```
#[macro_export]
macro_rules! tensor {
    ([ $( $x:literal ),+ $(,)? ]) => {
        $crate::tensors::Tensor::new(
            vec![[$( stringify!($x) ),+].len()],
            vec![$( $x ),+],
        )
        .expect("non-empty literal row")
    };

    ([ $( [ $( $inner:tt )* ] ),+ $(,)? ]) => {{
        let children = vec![ $( $crate::tensor!([ $( $inner )* ]) ),+ ];
        let first_shape = children[0].shape().to_vec();
        assert!(
            children.iter().all(|c| c.shape() == first_shape.as_slice()),
            "ragged tensor literal (rows have mismatched shapes)"
        );
        let mut shape = vec![children.len()];
        shape.extend_from_slice(&first_shape);
        let mut data = Vec::with_capacity(children.len() * children[0].element_count());
        for c in children {
            data.extend(c.into_data());
        }
        $crate::tensors::Tensor::new(shape, data).expect("uniform tensor literal")
    }};

    ($x:literal) => {
        $crate::tensors::Tensor::scalar($x)
    };
}
