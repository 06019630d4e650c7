//! Feed-forward network collaborators.
//!
//! These are thin consumers of the tensor engine: every forward and backward
//! step is a handful of broadcasting, contraction and transpose calls.
//!
//! - [`activation`]: identity, sigmoid, tanh and softmax with derivatives
//! - [`loss`]: squared error and binary cross-entropy
//! - [`optim`]: SGD with momentum
//! - [`layers`]: dense and activation layers
//! - [`network`]: layer stack, batching and the training loop

pub mod activation;
pub mod layers;
pub mod loss;
pub mod network;
pub mod optim;

pub use activation::{Activation, ActivationKind};
pub use layers::{ActivationLayer, Dense, Layer};
pub use loss::{CrossEntropy, Loss, SquareLoss};
pub use network::{batch_iterator, EpochStats, FitConfig, Network};
pub use optim::{Optimizer, Sgd};
