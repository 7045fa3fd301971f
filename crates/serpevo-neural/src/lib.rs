//! Dense feed-forward neural networks with flat genome encoding.
//!
//! This crate implements the "brain" side of the serpevo project: a small
//! fully-connected network whose entire parameter set can be flattened into a
//! single `Vec<f32>` genome and written back in place. The genome encoding is
//! what the genetic algorithm in `serpevo-training` actually evolves; the
//! network itself is never trained by gradient descent.
//!
//! # Components
//!
//! - [`NeuralNetwork`] - layer matrices, forward propagation, genome
//!   encode/decode
//! - [`NetworkTopology`] - construction parameters (layer sizes, activations,
//!   initializers, bias flag)
//! - [`Activation`] / [`WeightInit`] - closed operator enums; there is no
//!   runtime name registry, unknown names fail at parse time
//! - [`Matrix`] - minimal row-major dense matrix
//!
//! # Genome layout
//!
//! The genome concatenates, connection by connection in construction order,
//! each weight matrix flattened row-major followed by its bias column (when
//! bias is enabled). `apply_genome` rejects any vector whose length differs
//! from `genome_len()` and leaves the network untouched in that case, so
//! `apply_genome(&genome())` is always the identity.
//!
//! # Numeric contract
//!
//! The softmax activation is the unshifted `exp(x) / Σ exp(x)`. It overflows
//! for large inputs, but shifting by the maximum would change every evolved
//! genome's behavior, so the fragile form is kept deliberately.

pub use self::{activation::*, init::*, matrix::*, network::*};

mod activation;
mod init;
mod matrix;
mod network;

/// Invalid network construction parameters.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TopologyError {
    /// Input or output layer has no nodes.
    #[display("input and output layers need at least 1 node, got {input}x{output}")]
    EmptyBoundaryLayer { input: usize, output: usize },
    /// A hidden layer has no nodes.
    #[display("hidden layer {index} has no nodes")]
    EmptyHiddenLayer { index: usize },
    /// Zero initialization requested for a weight matrix.
    #[display("zero initialization is only supported for bias vectors")]
    ZeroWeightInit,
}

/// Forward propagation input has the wrong length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("network expects {expected} inputs, got {found}")]
pub struct InputSizeError {
    pub expected: usize,
    pub found: usize,
}

/// Genome vector has the wrong length for this network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("genome of length {found} cannot be decoded into a network with {expected} parameters")]
pub struct GenomeSizeError {
    pub expected: usize,
    pub found: usize,
}
