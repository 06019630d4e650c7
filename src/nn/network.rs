//! Sequential network and training loop.

use rand::RngCore;

use crate::error::{Result, TensorError};
use crate::nn::layers::Layer;
use crate::nn::loss::Loss;
use crate::nn::optim::Optimizer;
use crate::numeric::Scalar;
use crate::tensors::Tensor;

/// Training-loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitConfig {
    /// Number of passes over the data.
    pub epochs: usize,
    /// Samples per gradient step.
    pub batch_size: usize,
    /// Log progress every this many epochs (the last epoch is always logged).
    pub display_every: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            batch_size: 64,
            display_every: 1,
        }
    }
}

/// Mean loss and accuracy over one epoch's batches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    pub epoch: usize,
    pub loss: f64,
    pub accuracy: f64,
}

/// A stack of layers trained with one loss and one optimizer template.
pub struct Network<T: Scalar> {
    optimizer: Box<dyn Optimizer<T>>,
    loss: Box<dyn Loss<T>>,
    layers: Vec<Box<dyn Layer<T>>>,
}

impl<T: Scalar> Network<T> {
    pub fn new(optimizer: impl Optimizer<T> + 'static, loss: impl Loss<T> + 'static) -> Self {
        Self {
            optimizer: Box::new(optimizer),
            loss: Box::new(loss),
            layers: Vec::new(),
        }
    }

    pub fn layers(&self) -> &[Box<dyn Layer<T>>] {
        &self.layers
    }

    /// Appends a layer, wiring its input width to the previous layer's output
    /// and initializing its weights from `rng`.
    ///
    /// # Errors
    /// [`TensorError::InvalidShape`] if the first layer has no input width.
    pub fn add_layer(
        &mut self,
        mut layer: impl Layer<T> + 'static,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        if let Some(prev) = self.layers.last() {
            layer.set_input_shape(prev.outputs());
        }
        layer.initialize(self.optimizer.as_ref(), rng)?;
        self.layers.push(Box::new(layer));
        Ok(())
    }

    /// Marks every layer trainable again.
    pub fn set_trainable(&mut self) {
        for layer in &mut self.layers {
            layer.set_trainable(true);
        }
    }

    /// Runs `x` through every layer in order.
    ///
    /// # Errors
    /// The first layer error.
    pub fn forward(&mut self, x: &Tensor<T>, training: bool) -> Result<Tensor<T>> {
        let mut out = x.clone();
        for layer in &mut self.layers {
            out = layer.forward(&out, training)?;
        }
        Ok(out)
    }

    /// Propagates a loss gradient back through every layer.
    ///
    /// # Errors
    /// The first layer error.
    pub fn backward(&mut self, loss_grad: &Tensor<T>) -> Result<()> {
        let mut grad = loss_grad.clone();
        for layer in self.layers.iter_mut().rev() {
            grad = layer.backward(&grad)?;
        }
        Ok(())
    }

    /// Inference-mode forward pass.
    ///
    /// # Errors
    /// The first layer error.
    pub fn predict(&mut self, x: &Tensor<T>) -> Result<Tensor<T>> {
        self.forward(x, false)
    }

    /// Loss and accuracy on a batch without updating weights.
    ///
    /// # Errors
    /// Layer or loss errors.
    pub fn test_on_batch(&mut self, x: &Tensor<T>, y: &Tensor<T>) -> Result<(f64, f64)> {
        let yp = self.forward(x, false)?;
        let loss = self.loss.loss(y, &yp)?.mean();
        let acc = self.loss.accuracy(y, &yp)?;
        Ok((loss, acc))
    }

    /// One forward/backward step; returns the batch loss and accuracy.
    ///
    /// # Errors
    /// Layer or loss errors.
    pub fn train_on_batch(&mut self, x: &Tensor<T>, y: &Tensor<T>) -> Result<(f64, f64)> {
        let yp = self.forward(x, true)?;
        let loss = self.loss.loss(y, &yp)?.mean();
        let acc = self.loss.accuracy(y, &yp)?;
        let grad = self.loss.grad(y, &yp)?;
        self.backward(&grad)?;
        Ok((loss, acc))
    }

    /// Trains on `(x, y)` for `config.epochs` epochs.
    ///
    /// Returns the mean loss and accuracy of every epoch.
    ///
    /// # Errors
    /// Batching, layer or loss errors.
    #[allow(clippy::cast_precision_loss)]
    pub fn fit(&mut self, x: &Tensor<T>, y: &Tensor<T>, config: FitConfig) -> Result<Vec<EpochStats>> {
        tracing::info!(epochs = config.epochs, batch_size = config.batch_size, "start training");
        let batches = batch_iterator(x, y, config.batch_size)?;
        let every = config.display_every.max(1);

        let mut history = Vec::with_capacity(config.epochs);
        for epoch in 1..=config.epochs {
            let (mut loss, mut acc) = (0.0, 0.0);
            for (bx, by) in &batches {
                let (l, a) = self.train_on_batch(bx, by)?;
                loss += l;
                acc += a;
            }
            let n = batches.len() as f64;
            let stats = EpochStats {
                epoch,
                loss: loss / n,
                accuracy: acc / n,
            };
            if epoch % every == 0 || epoch == config.epochs {
                tracing::info!(
                    "epoch {:>5}/{} loss: {:.6} acc: {:.4}",
                    epoch,
                    config.epochs,
                    stats.loss,
                    stats.accuracy
                );
            }
            history.push(stats);
        }
        tracing::info!("end training");
        Ok(history)
    }

    /// Total trainable scalars across all layers.
    pub fn parameters(&self) -> usize {
        self.layers.iter().map(|l| l.parameters()).sum()
    }

    /// Text table of layers, widths and parameter counts.
    pub fn summary(&self) -> String {
        let mut out = String::from("Summary\n");
        if let Some(first) = self.layers.first() {
            out.push_str(&format!("Input Shape:{}\n", first.inputs()));
        }
        for layer in &self.layers {
            out.push_str(&format!(
                "Layer: {:<10} Parameters: {:>3} Nodes[In:{:>2} -> Out:{}]\n",
                layer.name(),
                layer.parameters(),
                layer.inputs(),
                layer.outputs()
            ));
        }
        if let Some(last) = self.layers.last() {
            out.push_str(&format!("Output Shape:{}\n", last.outputs()));
        }
        out.push_str(&format!("Total Parameters:{}\n", self.parameters()));
        tracing::info!(layers = self.layers.len(), parameters = self.parameters(), "network summary");
        out
    }
}

/// Splits `x` and `y` into aligned batches along axis 0.
///
/// The last batch holds the remainder when the sample count is not a multiple
/// of `batch_size`.
///
/// # Errors
/// [`TensorError::ShapeMismatch`] if `x` and `y` disagree on the sample
/// count, or [`TensorError::InvalidShape`] for rank-0 inputs or a zero
/// batch size.
pub fn batch_iterator<T: Scalar>(
    x: &Tensor<T>,
    y: &Tensor<T>,
    batch_size: usize,
) -> Result<Vec<(Tensor<T>, Tensor<T>)>> {
    let (Some(&samples), Some(&targets)) = (x.shape().first(), y.shape().first()) else {
        return Err(TensorError::InvalidShape {
            shape: Vec::new(),
            reason: "batching needs at least one axis",
        });
    };
    if samples != targets {
        return Err(TensorError::ShapeMismatch {
            expected: samples,
            actual: targets,
        });
    }
    if batch_size == 0 {
        return Err(TensorError::InvalidShape {
            shape: vec![0],
            reason: "batch size must be positive",
        });
    }

    let mut batches = Vec::with_capacity(samples.div_ceil(batch_size));
    for begin in (0..samples).step_by(batch_size) {
        let end = (begin + batch_size).min(samples);
        let bx = gather(x, begin, end)?;
        let by = gather(y, begin, end)?;
        batches.push((bx, by));
    }
    Ok(batches)
}

// Copies rows `begin..end` of axis 0 into a new tensor.
fn gather<T: Scalar>(t: &Tensor<T>, begin: usize, end: usize) -> Result<Tensor<T>> {
    let mut shape = t.shape().to_vec();
    shape[0] = end - begin;
    let mut out = Tensor::zeros(shape)?;
    for (m, j) in (begin..end).enumerate() {
        out.set_slice(m, &t.slice(j)?)?;
    }
    Ok(out)
}
