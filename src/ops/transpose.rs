//! Full axis-order reversal.

use crate::shape;
use crate::tensors::Tensor;

impl<T: Copy> Tensor<T> {
    /// Returns the tensor with its axes reversed.
    ///
    /// For a matrix this is the usual transpose; in general the element at
    /// `[i0, .., ir]` moves to `[ir, .., i0]`. Rank-0 and rank-1 tensors come
    /// back unchanged.
    ///
    /// # Example
    /// ```rust
    /// use tensor_mlp::tensor;
    /// let t = tensor!([[1, 2, 3], [4, 5, 6]]);
    /// assert_eq!(t.transpose(), tensor!([[1, 4], [2, 5], [3, 6]]));
    /// ```
    pub fn transpose(&self) -> Self {
        let src_shape = self.shape();
        let dst_shape: Vec<usize> = src_shape.iter().rev().copied().collect();
        let src = self.data();

        let rank = src_shape.len();
        let mut src_idx = vec![0; rank];
        let mut dst_idx = vec![0; rank];
        let mut data = src.to_vec();
        for (linear, &value) in src.iter().enumerate() {
            shape::linear_to_multi_index(linear, src_shape, &mut src_idx);
            for (d, &s) in dst_idx.iter_mut().zip(src_idx.iter().rev()) {
                *d = s;
            }
            data[shape::multi_index_to_linear(&dst_idx, &dst_shape)] = value;
        }

        Self::from_parts(dst_shape, data)
    }
}
