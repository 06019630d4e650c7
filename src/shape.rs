//! Shape algebra.
//!
//! Pure functions over row-major shapes: element counts, conversions between
//! linear offsets and multi-indices, and NumPy-style two-operand broadcasting.
//! A shape is any `&[usize]`; the empty shape describes a rank-0 scalar with a
//! single element. No function here assumes a maximum rank.

use crate::error::{Result, TensorError};

/// Returns the number of elements described by `shape`.
///
/// # Errors
/// [`TensorError::InvalidShape`] if any dimension is zero or the product
/// overflows `usize`.
///
/// # Example
/// ```rust
/// use tensor_mlp::shape::element_count;
/// assert_eq!(element_count(&[2, 3, 4]).unwrap(), 24);
/// assert_eq!(element_count(&[]).unwrap(), 1);
/// assert!(element_count(&[2, 0]).is_err());
/// ```
pub fn element_count(shape: &[usize]) -> Result<usize> {
    if shape.contains(&0) {
        return Err(TensorError::InvalidShape {
            shape: shape.to_vec(),
            reason: "dimensions must be positive",
        });
    }
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| TensorError::InvalidShape {
            shape: shape.to_vec(),
            reason: "element count overflows usize",
        })
}

/// Decodes a linear row-major offset into `out`, one coordinate per axis.
///
/// `out` must have the same length as `shape`.
pub fn linear_to_multi_index(index: usize, shape: &[usize], out: &mut [usize]) {
    debug_assert_eq!(out.len(), shape.len());
    let mut rest = index;
    for (coord, &dim) in out.iter_mut().zip(shape).rev() {
        *coord = rest % dim;
        rest /= dim;
    }
}

/// Encodes a multi-index into its linear row-major offset.
pub fn multi_index_to_linear(index: &[usize], shape: &[usize]) -> usize {
    debug_assert_eq!(index.len(), shape.len());
    index
        .iter()
        .zip(shape)
        .fold(0, |acc, (&coord, &dim)| acc * dim + coord)
}

/// Computes the shape produced by broadcasting `a` against `b`.
///
/// Shapes are right-aligned and the shorter one is padded with leading ones.
/// Each aligned pair must be equal or contain a one.
///
/// # Errors
/// [`TensorError::IncompatibleShapes`] when an aligned pair conflicts.
///
/// # Example
/// ```rust
/// use tensor_mlp::shape::broadcast_shape;
/// assert_eq!(broadcast_shape(&[4, 1], &[3]).unwrap(), vec![4, 3]);
/// assert!(broadcast_shape(&[2, 3], &[4, 3]).is_err());
/// ```
pub fn broadcast_shape(a: &[usize], b: &[usize]) -> Result<Vec<usize>> {
    let rank = a.len().max(b.len());
    let mut out = vec![0; rank];
    for (k, slot) in out.iter_mut().enumerate() {
        let da = aligned_dim(a, rank, k);
        let db = aligned_dim(b, rank, k);
        if da != db && da != 1 && db != 1 {
            return Err(TensorError::IncompatibleShapes {
                lhs: a.to_vec(),
                rhs: b.to_vec(),
            });
        }
        *slot = da.max(db);
    }
    Ok(out)
}

// Dimension of `shape` at axis `k` of a right-aligned view of rank `rank`.
fn aligned_dim(shape: &[usize], rank: usize, k: usize) -> usize {
    let pad = rank - shape.len();
    if k < pad { 1 } else { shape[k - pad] }
}

/// Maps a coordinate of a broadcast result down to a coordinate of `source`.
///
/// Leading result axes missing from `source` are dropped; axes where `source`
/// has length one map to zero. `out` must have the length of `source`.
pub fn broadcast_index(result_index: &[usize], source: &[usize], out: &mut [usize]) {
    debug_assert_eq!(out.len(), source.len());
    debug_assert!(result_index.len() >= source.len());
    let skip = result_index.len() - source.len();
    for ((slot, &dim), &coord) in out.iter_mut().zip(source).zip(&result_index[skip..]) {
        *slot = if dim == 1 { 0 } else { coord % dim };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_count() {
        assert_eq!(element_count(&[2, 3]).unwrap(), 6);
        assert_eq!(element_count(&[7]).unwrap(), 7);
        assert_eq!(element_count(&[]).unwrap(), 1);
        assert!(matches!(
            element_count(&[3, 0, 2]),
            Err(TensorError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_element_count_overflow() {
        let huge = [usize::MAX / 2 + 1, 2];
        assert_eq!(
            element_count(&huge),
            Err(TensorError::InvalidShape {
                shape: huge.to_vec(),
                reason: "element count overflows usize",
            })
        );
        assert_eq!(element_count(&[usize::MAX, 1]).unwrap(), usize::MAX);
    }

    #[test]
    fn test_index_roundtrip_3d() {
        let shape = [2, 3, 4];
        let mut idx = [0; 3];
        for linear in 0..24 {
            linear_to_multi_index(linear, &shape, &mut idx);
            assert_eq!(multi_index_to_linear(&idx, &shape), linear);
        }
        linear_to_multi_index(23, &shape, &mut idx);
        assert_eq!(idx, [1, 2, 3]);
        linear_to_multi_index(5, &shape, &mut idx);
        assert_eq!(idx, [0, 1, 1]);
    }

    #[test]
    fn test_broadcast_shape_rules() {
        assert_eq!(broadcast_shape(&[2, 3], &[2, 3]).unwrap(), vec![2, 3]);
        assert_eq!(broadcast_shape(&[1, 3], &[4, 1]).unwrap(), vec![4, 3]);
        assert_eq!(broadcast_shape(&[5, 1, 2], &[3, 1]).unwrap(), vec![5, 3, 2]);
        assert_eq!(broadcast_shape(&[], &[2, 2]).unwrap(), vec![2, 2]);
        assert_eq!(broadcast_shape(&[3], &[]).unwrap(), vec![3]);
    }

    #[test]
    fn test_broadcast_shape_incompatible() {
        let err = broadcast_shape(&[2, 3], &[4, 3]).unwrap_err();
        assert_eq!(
            err,
            TensorError::IncompatibleShapes {
                lhs: vec![2, 3],
                rhs: vec![4, 3],
            }
        );
    }

    #[test]
    fn test_broadcast_index() {
        let mut out = [0; 2];
        broadcast_index(&[3, 1, 2], &[1, 2], &mut out);
        assert_eq!(out, [0, 0]);
        broadcast_index(&[3, 1, 1], &[4, 2], &mut out);
        assert_eq!(out, [1, 1]);

        let mut scalar: [usize; 0] = [];
        broadcast_index(&[1, 1], &[], &mut scalar);
    }
}
