use rand::rngs::StdRng;
use rand::SeedableRng;
use tensor_mlp::approx::{approx_eq, ApproxEquality};
use tensor_mlp::config::{set_display_mode, DisplayMode};
use tensor_mlp::random::uniform;
use tensor_mlp::tensors::Tensor;
use tensor_mlp::{tensor, TensorError};

#[test]
fn test_broadcast_add_row() {
    let a = tensor!([[1, 2, 3], [4, 5, 6]]);
    let b = tensor!([10, 20, 30]);
    assert_eq!(a.add(&b).unwrap(), tensor!([[11, 22, 33], [14, 25, 36]]));
}

#[test]
fn test_broadcast_outer() {
    let col = tensor!([[1], [2], [3]]);
    let row = tensor!([[10, 20]]);
    let out = col.mul(&row).unwrap();
    assert_eq!(out, tensor!([[10, 20], [20, 40], [30, 60]]));
}

#[test]
fn test_broadcast_incompatible() {
    let a = Tensor::<f64>::zeros([2, 3]).unwrap();
    let b = Tensor::<f64>::zeros([4, 3]).unwrap();
    assert_eq!(
        a.add(&b),
        Err(TensorError::IncompatibleShapes {
            lhs: vec![2, 3],
            rhs: vec![4, 3],
        })
    );
}

#[test]
fn test_identities() {
    let a = tensor!([[1.5, -2.0], [3.0, 0.25]]);
    assert_eq!(a.add(&a.zeros_like()).unwrap(), a);
    assert_eq!(a.mul(&a.ones_like()).unwrap(), a);
    assert_eq!(a.sub(&a).unwrap(), a.zeros_like());
}

#[test]
fn test_broadcast_to() {
    let row = tensor!([[1, 2, 3]]);
    let grid = row.broadcast_to([2, 3]).unwrap();
    assert_eq!(grid, tensor!([[1, 2, 3], [1, 2, 3]]));
    assert!(row.broadcast_to([2, 4]).is_err());
}

#[test]
fn test_scalar_ops() {
    let a = tensor!([[1, 2], [3, 4]]);
    assert_eq!(a.rsub_scalar(2.0).unwrap(), tensor!([[1, 0], [-1, -2]]));
    assert_eq!(a.add_scalar(1.0).unwrap(), tensor!([[2, 3], [4, 5]]));
    assert_eq!(a.mul_scalar(3.0).unwrap(), tensor!([[3, 6], [9, 12]]));
    assert_eq!(a.sub_scalar(1.0).unwrap(), tensor!([[0, 1], [2, 3]]));

    let f = tensor!([1.0, 2.0, 4.0]);
    assert_eq!(f.div_scalar(2.0).unwrap(), tensor!([0.5, 1.0, 2.0]));
    assert_eq!(f.rdiv_scalar(4.0).unwrap(), tensor!([4.0, 2.0, 1.0]));
}

#[test]
fn test_negation() {
    let a = tensor!([1, -2, 0]);
    assert_eq!(-&a, tensor!([-1, 2, 0]));
    assert_eq!(-a, tensor!([-1, 2, 0]));
}

#[test]
fn test_int_semantics() {
    let a = tensor!([7, -7]);
    assert_eq!(a.div_scalar(2.0).unwrap(), tensor!([3, -3]));

    let max = Tensor::new([1], vec![i32::MAX]).unwrap();
    assert_eq!(max.add_scalar(1.0).unwrap().data(), &[i32::MIN]);

    // scalar operands round half to even
    assert_eq!(tensor!([1, 2]).add_scalar(0.5).unwrap(), tensor!([1, 2]));
    assert_eq!(tensor!([1, 2]).add_scalar(1.5).unwrap(), tensor!([3, 4]));
}

#[test]
fn test_int_div_by_zero() {
    let err = tensor!([1, 2]).div(&tensor!([1, 0])).unwrap_err();
    assert!(matches!(err, TensorError::NotSupported { scalar: "i32", .. }));
}

#[test]
fn test_int_transcendental_not_supported() {
    let t = tensor!([1, 2]);
    for result in [t.exp(), t.log(), t.sqrt(), t.tanh(), t.sigmoid()] {
        assert!(matches!(result, Err(TensorError::NotSupported { scalar: "i32", .. })));
    }
}

#[test]
fn test_float_math() {
    let t = tensor!([0.0, 1.0, 4.0]);
    assert_eq!(t.sqrt().unwrap(), tensor!([0.0, 1.0, 2.0]));
    assert_eq!(t.exp().unwrap().data()[0], 1.0);
    assert_eq!(tensor!([1.0]).log().unwrap().data(), &[0.0]);
    assert_eq!(tensor!([0.0]).sigmoid().unwrap().data(), &[0.5]);
    assert_eq!(tensor!([-3.0, 2.0]).abs(), tensor!([3.0, 2.0]));
    assert_eq!(tensor!([-3, 2]).square(), tensor!([9, 4]));
}

#[test]
fn test_clamp() {
    let t = tensor!([-5.0, 0.0, 5.0]).clamp(-1.0, 1.0);
    assert_eq!(t, tensor!([-1.0, 0.0, 1.0]));
    assert_eq!(tensor!([-5, 0, 5]).clamp(-1.0, 1.0), tensor!([-1, 0, 1]));
}

#[test]
fn test_dot_matrix() {
    let a = tensor!([[1, 2], [3, 4]]);
    let b = tensor!([[5, 6], [7, 8]]);
    assert_eq!(a.dot(&b).unwrap(), tensor!([[19, 22], [43, 50]]));
}

#[test]
fn test_dot_rank1_promotion() {
    let v = tensor!([1, 2, 3]);
    let m = tensor!([[1, 0], [0, 1], [1, 1]]);
    assert_eq!(v.dot(&m).unwrap(), tensor!([[4, 5]]));

    let a = tensor!([[1, 2], [3, 4]]);
    assert_eq!(a.dot(&tensor!([1, 1])).unwrap(), tensor!([[3], [7]]));

    assert_eq!(v.dot(&tensor!([4, 5, 6])).unwrap(), tensor!([[32]]));
}

#[test]
fn test_dot_dimension_mismatch() {
    let a = Tensor::<f32>::ones([2, 3]).unwrap();
    assert_eq!(
        a.dot(&a),
        Err(TensorError::DimensionMismatch {
            lhs: vec![2, 3],
            rhs: vec![2, 3],
            left: 3,
            right: 2,
        })
    );
    assert!(Tensor::scalar(1.0_f32).dot(&a).is_err());
}

#[test]
fn test_dot_higher_rank() {
    let a = Tensor::new([2, 3], (1..=6).collect()).unwrap();
    let b = Tensor::new([4, 3, 2], (0..24).collect()).unwrap();
    let out = a.dot(&b).unwrap();
    assert_eq!(out.shape(), &[2, 4, 2]);
    for i in 0..2 {
        for batch in 0..4 {
            for j in 0..2 {
                let expected: i32 = (0..3)
                    .map(|t| a.at(&[i, t]).unwrap() * b.at(&[batch, t, j]).unwrap())
                    .sum();
                assert_eq!(out.at(&[i, batch, j]).unwrap(), expected);
            }
        }
    }

    let left = Tensor::new([2, 2, 3], (0..12).collect()).unwrap();
    let right = Tensor::new([3, 5], (0..15).collect()).unwrap();
    assert_eq!(left.dot(&right).unwrap().shape(), &[2, 2, 5]);
}

#[test]
fn test_dot_with_transpose() {
    let a = tensor!([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let gram = a.dot(&a.transpose()).unwrap();
    assert_eq!(gram, tensor!([[14.0, 32.0], [32.0, 77.0]]));
}

#[test]
fn test_uniform_seeded() {
    let mut r1 = StdRng::seed_from_u64(11);
    let mut r2 = StdRng::seed_from_u64(11);
    let a = uniform::<f64, _>(-1.0, 1.0, [4, 4], &mut r1).unwrap();
    let b = uniform::<f64, _>(-1.0, 1.0, [4, 4], &mut r2).unwrap();
    assert_eq!(a, b);
    assert!(a.data().iter().all(|&x| (-1.0..1.0).contains(&x)));

    let s = uniform::<f32, _>(0.0, 1.0, Vec::<usize>::new(), &mut r1).unwrap();
    assert_eq!(s.shape(), &[1]);
}

#[test]
fn test_uniform_invalid_range() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        uniform::<f64, _>(1.0, 1.0, [2], &mut rng),
        Err(TensorError::InvalidRange { lo: 1.0, hi: 1.0 })
    );
    assert!(uniform::<f64, _>(2.0, 1.0, [2], &mut rng).is_err());
}

#[test]
fn test_approx_grades() {
    let a = Tensor::new([2], vec![0.1 + 0.2, 1.0]).unwrap();
    let b = tensor!([0.3, 1.0]);
    assert!(approx_eq(&a, &b, ApproxEquality::Precise));

    let c = tensor!([0.3001, 1.0]);
    assert!(approx_eq(&b, &c, ApproxEquality::Relative));
    assert!(!approx_eq(&b, &c, ApproxEquality::Partial));
    // differing shapes never compare equal
    assert!(!approx_eq(&b, &tensor!([0.3]), ApproxEquality::Relative));
}

// Display state is global, so every rendering check lives in one test.
#[test]
fn test_display() {
    set_display_mode(DisplayMode::Pretty);
    assert_eq!(tensor!([[1, 2], [-3, 4]]).to_string(), "[[ 1  2]\n [-3  4]]");
    assert_eq!(tensor!([0.5, 1.25]).to_string(), "[ 0.5 1.25]");
    assert_eq!(tensor!([1.0, 0.0625]).to_string(), "[1.000000 0.062500]");
    assert_eq!(Tensor::scalar(3).to_string(), "3");
    assert_eq!(
        tensor!([[[1, 2]], [[3, 4]]]).to_string(),
        "[[[1 2]]\n\n [[3 4]]]"
    );

    set_display_mode(DisplayMode::NumPy);
    assert_eq!(
        tensor!([[1, 2], [3, 4]]).to_string(),
        "Tensor<i32> 2x2 : np.array([1,2,3,4]).reshape(2,2)\n[[1 2]\n [3 4]]"
    );
    set_display_mode(DisplayMode::Pretty);
}
