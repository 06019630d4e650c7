use rand::rngs::StdRng;
use rand::SeedableRng;
use tensor_mlp::approx::{approx_eq, ApproxEquality};
use tensor_mlp::nn::activation::{Sigmoid, Softmax, Tanh};
use tensor_mlp::nn::{
    batch_iterator, Activation, ActivationKind, ActivationLayer, CrossEntropy, Dense, FitConfig,
    Layer, Loss, Network, Optimizer, Sgd, SquareLoss,
};
use tensor_mlp::tensors::Tensor;
use tensor_mlp::{tensor, TensorError};

fn xor_network(rng: &mut StdRng) -> Network<f64> {
    let mut model = Network::new(Sgd::new(0.15), CrossEntropy);
    model.add_layer(Dense::with_inputs(8, 2), rng).unwrap();
    model.add_layer(ActivationLayer::new(ActivationKind::Tanh), rng).unwrap();
    model.add_layer(Dense::new(1), rng).unwrap();
    model.add_layer(ActivationLayer::new(ActivationKind::Sigmoid), rng).unwrap();
    model
}

#[test]
fn test_activation_values() {
    let x = tensor!([0.0, 2.0]);
    let s = Sigmoid.function(&x).unwrap();
    assert_eq!(s.data()[0], 0.5);
    assert_eq!(Activation::<f64>::gradient(&Sigmoid, &tensor!([0.0])).unwrap().data(), &[0.25]);
    assert_eq!(Activation::<f64>::gradient(&Tanh, &tensor!([0.0])).unwrap().data(), &[1.0]);

    let expected = Tensor::new([2], vec![0.5, 1.0 / (1.0 + (-2.0_f64).exp())]).unwrap();
    assert!(approx_eq(&s, &expected, ApproxEquality::Precise));
}

#[test]
fn test_softmax_rows_sum_to_one() {
    let x = tensor!([[1.0, 2.0, 3.0], [1.0, 1.0, 1.0]]);
    let p = Softmax.function(&x).unwrap();
    assert_eq!(p.shape(), &[2, 3]);
    for row in 0..2 {
        let sum = p.slice(row).unwrap().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
    let third = Tensor::full(1.0 / 3.0, [3]).unwrap();
    assert!(approx_eq(&p.slice(1).unwrap(), &third, ApproxEquality::Precise));
}

#[test]
fn test_activation_kind_from_str() {
    assert_eq!("Tanh".parse::<ActivationKind>().unwrap(), ActivationKind::Tanh);
    assert_eq!("softmax".parse::<ActivationKind>().unwrap(), ActivationKind::Softmax);
    assert_eq!(
        "relu".parse::<ActivationKind>(),
        Err(TensorError::UnknownActivation("relu".to_owned()))
    );
}

#[test]
fn test_square_loss() {
    let y = tensor!([1.0, 2.0]);
    let p = tensor!([0.0, 4.0]);
    assert_eq!(SquareLoss.loss(&y, &p).unwrap(), tensor!([0.5, 2.0]));
    assert_eq!(SquareLoss.grad(&y, &p).unwrap(), tensor!([-1.0, 2.0]));
    assert_eq!(Loss::<f64>::accuracy(&SquareLoss, &y, &p).unwrap(), 0.0);
}

#[test]
fn test_cross_entropy() {
    let y = tensor!([1.0, 0.0]);
    let p = tensor!([0.9, 0.1]);
    let loss = CrossEntropy.loss(&y, &p).unwrap();
    let want = Tensor::full(-(0.9_f64.ln()), [2]).unwrap();
    assert!(approx_eq(&loss, &want, ApproxEquality::Precise));

    let grad = CrossEntropy.grad(&y, &p).unwrap();
    let want = Tensor::new([2], vec![-1.0 / 0.9, 1.0 / 0.9]).unwrap();
    assert!(approx_eq(&grad, &want, ApproxEquality::Precise));

    assert_eq!(CrossEntropy.accuracy(&y, &p).unwrap(), 1.0);
    assert_eq!(CrossEntropy.accuracy(&y, &tensor!([0.2, 0.1])).unwrap(), 0.5);
}

#[test]
fn test_cross_entropy_clamps_saturated_predictions() {
    let y = tensor!([1.0_f64, 0.0]);
    let p = tensor!([0.0_f64, 1.0]);
    let loss = CrossEntropy.loss(&y, &p).unwrap();
    let grad = CrossEntropy.grad(&y, &p).unwrap();
    assert!(loss.data().iter().all(|x| x.is_finite()));
    assert!(grad.data().iter().all(|x| x.is_finite()));
}

#[test]
fn test_sgd_hyperparameters() {
    let plain = Sgd::<f32>::new(0.05);
    assert_eq!(plain.lr(), 0.05);
    assert_eq!(plain.momentum(), 0.0);

    let heavy = Sgd::<f32>::with_momentum(0.1, 0.9);
    assert_eq!((heavy.lr(), heavy.momentum()), (0.1, 0.9));
}

#[test]
fn test_activation_layer_kind_and_name() {
    let layer = ActivationLayer::<f64>::new("tanh".parse().unwrap());
    assert_eq!(layer.kind(), ActivationKind::Tanh);
    assert_eq!(layer.name(), "TANH");
    assert_eq!(layer.parameters(), 0);
}

#[test]
fn test_sgd_momentum_update() {
    let mut sgd = Sgd::<f64>::with_momentum(0.1, 0.9);
    let w = tensor!([1.0, 2.0]);
    let g = tensor!([0.5, 0.5]);

    let w1 = sgd.update(&w, &g).unwrap();
    assert!(approx_eq(&w1, &tensor!([0.995, 1.995]), ApproxEquality::Precise));

    let w2 = sgd.update(&w1, &g).unwrap();
    assert!(approx_eq(&w2, &tensor!([0.9855, 1.9855]), ApproxEquality::Precise));

    // fresh instances start without velocity
    let mut other = sgd.fresh();
    let again = other.update(&w, &g).unwrap();
    assert!(approx_eq(&again, &w1, ApproxEquality::Precise));
}

#[test]
fn test_dense_forward_backward() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut dense = Dense::<f64>::with_inputs(1, 2);
    dense.initialize(&Sgd::<f64>::new(0.1), &mut rng).unwrap();
    let w = dense.weights().unwrap().clone();
    assert_eq!(w.shape(), &[2, 1]);
    assert!(w.data().iter().all(|x| x.abs() <= 1.0 / 2.0_f64.sqrt()));
    assert_eq!(dense.parameters(), 3);

    let x = tensor!([[1.0, 2.0]]);
    let out = dense.forward(&x, true).unwrap();
    assert_eq!(out, x.dot(&w).unwrap());

    let upstream = dense.backward(&tensor!([[1.0]])).unwrap();
    assert_eq!(upstream, w.transpose());

    let expected_w = w.sub(&tensor!([[0.1], [0.2]])).unwrap();
    assert!(approx_eq(dense.weights().unwrap(), &expected_w, ApproxEquality::Precise));
    assert!(approx_eq(dense.bias().unwrap(), &tensor!([[-0.1]]), ApproxEquality::Precise));
}

#[test]
fn test_dense_bias_gradient_sums_batch() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut dense = Dense::<f64>::with_inputs(2, 1);
    dense.initialize(&Sgd::<f64>::new(1.0), &mut rng).unwrap();
    dense.forward(&tensor!([[1.0], [1.0], [1.0]]), true).unwrap();
    dense.backward(&tensor!([[1.0, 2.0], [1.0, 2.0], [1.0, 2.0]])).unwrap();
    assert!(approx_eq(dense.bias().unwrap(), &tensor!([[-3.0, -6.0]]), ApproxEquality::Precise));
}

#[test]
fn test_frozen_dense_keeps_weights() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut dense = Dense::<f64>::with_inputs(2, 2);
    dense.initialize(&Sgd::<f64>::new(0.5), &mut rng).unwrap();
    dense.set_trainable(false);
    let before = dense.weights().unwrap().clone();
    dense.forward(&tensor!([[1.0, 1.0]]), true).unwrap();
    dense.backward(&tensor!([[1.0, 1.0]])).unwrap();
    assert_eq!(dense.weights().unwrap(), &before);
}

#[test]
fn test_backward_before_forward() {
    let mut layer = ActivationLayer::<f64>::new(ActivationKind::Sigmoid);
    assert!(matches!(
        layer.backward(&tensor!([[1.0]])),
        Err(TensorError::InvalidShape { .. })
    ));
    let mut dense = Dense::<f64>::new(3);
    assert!(dense.forward(&tensor!([[1.0]]), false).is_err());
}

#[test]
fn test_batch_iterator_keeps_remainder() {
    let x = Tensor::new([5, 2], (0..10).map(f64::from).collect()).unwrap();
    let y = Tensor::new([5, 1], (0..5).map(f64::from).collect()).unwrap();
    let batches = batch_iterator(&x, &y, 2).unwrap();
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[0].0, tensor!([[0.0, 1.0], [2.0, 3.0]]));
    assert_eq!(batches[2].0, tensor!([[8.0, 9.0]]));
    assert_eq!(batches[2].1, tensor!([[4.0]]));

    let short = Tensor::<f64>::zeros([4, 1]).unwrap();
    assert_eq!(
        batch_iterator(&x, &short, 2).unwrap_err(),
        TensorError::ShapeMismatch { expected: 5, actual: 4 }
    );
    assert!(batch_iterator(&x, &y, 0).is_err());
}

#[test]
fn test_summary() {
    let mut rng = StdRng::seed_from_u64(1);
    let model = xor_network(&mut rng);
    let summary = model.summary();
    assert!(summary.starts_with("Summary\nInput Shape:2\n"));
    assert!(summary.contains("Layer: Dense      Parameters:  24 Nodes[In: 2 -> Out:8]\n"));
    assert!(summary.ends_with("Total Parameters:33\n"));
    assert!(summary.contains("TANH"));
    assert!(summary.contains("SIGMOID"));
    assert!(summary.contains("Output Shape:1"));
    assert!(summary.contains("Total Parameters:33"));
    assert_eq!(model.parameters(), 33);
    assert_eq!(model.layers().len(), 4);
}

#[test]
fn test_first_layer_needs_input_width() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut model = Network::<f64>::new(Sgd::new(0.1), SquareLoss);
    assert!(model.add_layer(Dense::new(4), &mut rng).is_err());
    assert!(model.layers().is_empty());
}

#[test]
fn test_xor_loss_decreases() {
    let x = Tensor::from_grid(&[[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]).unwrap();
    let y = Tensor::from_grid(&[[0.0], [1.0], [1.0], [0.0]]).unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    let mut model = xor_network(&mut rng);
    let (initial, _) = model.test_on_batch(&x, &y).unwrap();

    let history = model
        .fit(
            &x,
            &y,
            FitConfig {
                epochs: 2000,
                batch_size: 4,
                display_every: 500,
            },
        )
        .unwrap();
    assert_eq!(history.len(), 2000);
    assert_eq!(history[1999].epoch, 2000);

    let (trained, _) = model.test_on_batch(&x, &y).unwrap();
    assert!(trained < initial);
    assert!(history[1999].loss < history[0].loss);

    let prediction = model.predict(&x).unwrap();
    assert_eq!(prediction.shape(), &[4, 1]);
    assert!(prediction.data().iter().all(|&p| (0.0..=1.0).contains(&p)));
}

#[test]
fn test_integer_network_rejects_sigmoid() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut model = Network::<i32>::new(Sgd::new(0.1), SquareLoss);
    model.add_layer(Dense::with_inputs(1, 1), &mut rng).unwrap();
    model.add_layer(ActivationLayer::new(ActivationKind::Sigmoid), &mut rng).unwrap();
    assert!(matches!(
        model.predict(&tensor!([[1]])),
        Err(TensorError::NotSupported { op: "sigmoid", .. })
    ));
}
