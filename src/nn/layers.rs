//! Network layers.
//!
//! Layers cache whatever the backward pass needs during `forward`, and
//! replace (never mutate) their weight tensors when they learn.

use rand::RngCore;

use crate::error::{Result, TensorError};
use crate::nn::activation::{Activation, ActivationKind};
use crate::nn::optim::Optimizer;
use crate::numeric::Scalar;
use crate::random;
use crate::tensors::Tensor;

/// One stage of a feed-forward network.
pub trait Layer<T: Scalar> {
    /// Display name used by [`crate::nn::Network::summary`].
    fn name(&self) -> &str;

    /// Width of the expected input.
    fn inputs(&self) -> usize;

    /// Width of the produced output.
    fn outputs(&self) -> usize;

    /// Sets the input width, called with the previous layer's output width.
    fn set_input_shape(&mut self, inputs: usize);

    /// Number of trainable scalars.
    fn parameters(&self) -> usize;

    /// Allocates weights and per-parameter optimizer state.
    ///
    /// # Errors
    /// [`TensorError::InvalidShape`] if the layer's widths are unknown.
    fn initialize(&mut self, optimizer: &dyn Optimizer<T>, rng: &mut dyn RngCore) -> Result<()>;

    /// Computes the layer output for a `[batch, inputs]` tensor.
    ///
    /// # Errors
    /// Shape errors, or unsupported scalar math.
    fn forward(&mut self, x: &Tensor<T>, training: bool) -> Result<Tensor<T>>;

    /// Maps `dL/d(output)` to `dL/d(input)`, updating weights if trainable.
    ///
    /// # Errors
    /// Shape errors, or calling before any `forward`.
    fn backward(&mut self, grad: &Tensor<T>) -> Result<Tensor<T>>;

    /// Freezes or unfreezes the layer's weights.
    fn set_trainable(&mut self, _trainable: bool) {}
}

fn missing_input() -> TensorError {
    TensorError::InvalidShape {
        shape: Vec::new(),
        reason: "backward called before forward",
    }
}

fn uninitialized(inputs: usize, outputs: usize) -> TensorError {
    TensorError::InvalidShape {
        shape: vec![inputs, outputs],
        reason: "dense layer used before initialize",
    }
}

/// Applies an activation elementwise; no parameters.
pub struct ActivationLayer<T: Scalar> {
    kind: ActivationKind,
    activation: Box<dyn Activation<T>>,
    name: String,
    width: usize,
    input: Option<Tensor<T>>,
}

impl<T: Scalar> ActivationLayer<T> {
    pub fn new(kind: ActivationKind) -> Self {
        let activation = kind.build::<T>();
        let name = activation.name().to_ascii_uppercase();
        Self {
            kind,
            activation,
            name,
            width: 0,
            input: None,
        }
    }

    /// Which activation this layer applies.
    pub fn kind(&self) -> ActivationKind {
        self.kind
    }
}

impl<T: Scalar> Layer<T> for ActivationLayer<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> usize {
        self.width
    }

    fn outputs(&self) -> usize {
        self.width
    }

    fn set_input_shape(&mut self, inputs: usize) {
        self.width = inputs;
    }

    fn parameters(&self) -> usize {
        0
    }

    fn initialize(&mut self, _: &dyn Optimizer<T>, _: &mut dyn RngCore) -> Result<()> {
        Ok(())
    }

    fn forward(&mut self, x: &Tensor<T>, _training: bool) -> Result<Tensor<T>> {
        let out = self.activation.function(x)?;
        self.input = Some(x.clone());
        Ok(out)
    }

    fn backward(&mut self, grad: &Tensor<T>) -> Result<Tensor<T>> {
        let input = self.input.as_ref().ok_or_else(missing_input)?;
        grad.mul(&self.activation.gradient(input)?)
    }
}

/// Fully connected layer: `y = x · W + b`.
///
/// `W` is `[inputs, outputs]`, drawn from `U(-1/√inputs, 1/√inputs)`; `b` is
/// a zero `[1, outputs]` row broadcast over the batch.
pub struct Dense<T: Scalar> {
    inputs: usize,
    outputs: usize,
    trainable: bool,
    weights: Option<Tensor<T>>,
    bias: Option<Tensor<T>>,
    weights_opt: Option<Box<dyn Optimizer<T>>>,
    bias_opt: Option<Box<dyn Optimizer<T>>>,
    input: Option<Tensor<T>>,
}

impl<T: Scalar> Dense<T> {
    /// A layer with `nodes` outputs; its input width is taken from the
    /// previous layer when added to a network.
    pub fn new(nodes: usize) -> Self {
        Self {
            inputs: 0,
            outputs: nodes,
            trainable: true,
            weights: None,
            bias: None,
            weights_opt: None,
            bias_opt: None,
            input: None,
        }
    }

    /// A first layer with an explicit input width.
    pub fn with_inputs(nodes: usize, inputs: usize) -> Self {
        Self {
            inputs,
            ..Self::new(nodes)
        }
    }

    /// Current weight matrix, once initialized.
    pub fn weights(&self) -> Option<&Tensor<T>> {
        self.weights.as_ref()
    }

    /// Current bias row, once initialized.
    pub fn bias(&self) -> Option<&Tensor<T>> {
        self.bias.as_ref()
    }

    fn params(&self) -> Result<(&Tensor<T>, &Tensor<T>)> {
        match (&self.weights, &self.bias) {
            (Some(w), Some(b)) => Ok((w, b)),
            _ => Err(uninitialized(self.inputs, self.outputs)),
        }
    }
}

impl<T: Scalar> Layer<T> for Dense<T> {
    fn name(&self) -> &str {
        "Dense"
    }

    fn inputs(&self) -> usize {
        self.inputs
    }

    fn outputs(&self) -> usize {
        self.outputs
    }

    fn set_input_shape(&mut self, inputs: usize) {
        self.inputs = inputs;
    }

    fn parameters(&self) -> usize {
        self.weights.as_ref().map_or(0, Tensor::element_count)
            + self.bias.as_ref().map_or(0, Tensor::element_count)
    }

    #[allow(clippy::cast_precision_loss)]
    fn initialize(&mut self, optimizer: &dyn Optimizer<T>, rng: &mut dyn RngCore) -> Result<()> {
        let lim = 1.0 / (self.inputs as f64).sqrt();
        self.weights = Some(random::uniform(-lim, lim, [self.inputs, self.outputs], rng)?);
        self.bias = Some(Tensor::zeros([1, self.outputs])?);
        self.weights_opt = Some(optimizer.fresh());
        self.bias_opt = Some(optimizer.fresh());
        Ok(())
    }

    fn forward(&mut self, x: &Tensor<T>, _training: bool) -> Result<Tensor<T>> {
        let (w, b) = self.params()?;
        let out = x.dot(w)?.add(b)?;
        self.input = Some(x.clone());
        Ok(out)
    }

    fn backward(&mut self, grad: &Tensor<T>) -> Result<Tensor<T>> {
        let input = self.input.as_ref().ok_or_else(missing_input)?;
        let (Some(w), Some(b)) = (&self.weights, &self.bias) else {
            return Err(uninitialized(self.inputs, self.outputs));
        };
        let upstream = grad.dot(&w.transpose())?;

        if self.trainable {
            let grad_w = input.transpose().dot(grad)?;
            let ones = Tensor::ones([1, grad.shape()[0]])?;
            let grad_b = ones.dot(grad)?;

            let (Some(w_opt), Some(b_opt)) = (&mut self.weights_opt, &mut self.bias_opt) else {
                return Err(uninitialized(self.inputs, self.outputs));
            };
            let next_w = w_opt.update(w, &grad_w)?;
            let next_b = b_opt.update(b, &grad_b)?;
            self.weights = Some(next_w);
            self.bias = Some(next_b);
        }

        Ok(upstream)
    }

    fn set_trainable(&mut self, trainable: bool) {
        self.trainable = trainable;
    }
}
