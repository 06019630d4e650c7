use rand::SeedableRng;
use rand::rngs::StdRng;
use tensor_mlp::Tensor;
use tensor_mlp::nn::{
    ActivationKind, ActivationLayer, CrossEntropy, Dense, FitConfig, Network, Sgd,
};

fn main() -> tensor_mlp::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let x = Tensor::from_grid(&[[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]])?;
    let y = Tensor::from_grid(&[[0.0], [1.0], [1.0], [0.0]])?;

    let mut rng = StdRng::seed_from_u64(42);
    let mut model = Network::<f64>::new(Sgd::new(0.15), CrossEntropy);
    model.add_layer(Dense::with_inputs(8, 2), &mut rng)?;
    model.add_layer(ActivationLayer::new(ActivationKind::Tanh), &mut rng)?;
    model.add_layer(Dense::new(1), &mut rng)?;
    model.add_layer(ActivationLayer::new(ActivationKind::Sigmoid), &mut rng)?;
    println!("{}", model.summary());

    let history = model.fit(
        &x,
        &y,
        FitConfig {
            epochs: 5000,
            batch_size: 4,
            display_every: 500,
        },
    )?;
    if let Some(last) = history.last() {
        println!("final loss={:.6} acc={:.2}", last.loss, last.accuracy);
    }

    let prediction = model.predict(&x)?;
    println!("{prediction}");
    Ok(())
}
