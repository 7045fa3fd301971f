use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Activation, GenomeSizeError, InputSizeError, Matrix, TopologyError, WeightInit};

/// Construction parameters for a [`NeuralNetwork`].
///
/// The topology fully determines every matrix shape and therefore the genome
/// length, so two networks built from the same topology always have
/// compatible genomes. It is serialized into population checkpoints for
/// exactly that reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkTopology {
    pub input: usize,
    pub output: usize,
    pub hidden: Vec<usize>,
    pub hidden_init: WeightInit,
    pub hidden_activation: Activation,
    pub output_init: WeightInit,
    pub output_activation: Activation,
    pub bias: bool,
    pub bias_init: WeightInit,
}

impl NetworkTopology {
    /// Checks the structural constraints shared by all networks.
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.input < 1 || self.output < 1 {
            return Err(TopologyError::EmptyBoundaryLayer {
                input: self.input,
                output: self.output,
            });
        }
        if let Some(index) = self.hidden.iter().position(|&nodes| nodes == 0) {
            return Err(TopologyError::EmptyHiddenLayer { index });
        }
        if self.hidden_init == WeightInit::Zero || self.output_init == WeightInit::Zero {
            return Err(TopologyError::ZeroWeightInit);
        }
        Ok(())
    }

    /// Node counts per layer: input, hidden layers, output.
    #[must_use]
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden.len() + 2);
        sizes.push(self.input);
        sizes.extend_from_slice(&self.hidden);
        sizes.push(self.output);
        sizes
    }
}

/// Dense feed-forward network evolved by the genetic algorithm.
///
/// One weight matrix of shape `(layer_out, layer_in)` per connection, plus an
/// optional `(layer_out, 1)` bias column. Matrix shapes are fixed at
/// construction and never resized; the genetic algorithm only rewrites the
/// element values through [`NeuralNetwork::apply_genome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuralNetwork {
    topology: NetworkTopology,
    weights: Vec<Matrix>,
    biases: Vec<Matrix>,
    /// Post-activation output of every layer from the last forward pass,
    /// kept for introspection (e.g. activation visualization).
    #[serde(skip)]
    layer_outputs: Vec<Vec<f32>>,
}

impl NeuralNetwork {
    /// Builds a freshly initialized network.
    ///
    /// Weight matrices use the hidden/output initializer of their region;
    /// bias columns use the bias initializer (the only place
    /// [`WeightInit::Zero`] is allowed).
    pub fn new<R>(topology: NetworkTopology, rng: &mut R) -> Result<Self, TopologyError>
    where
        R: Rng + ?Sized,
    {
        topology.validate()?;

        let sizes = topology.layer_sizes();
        let mut weights = Vec::with_capacity(sizes.len() - 1);
        let mut biases = Vec::new();
        for (index, window) in sizes.windows(2).enumerate() {
            let (fan_in, fan_out) = (window[0], window[1]);
            let last = index == sizes.len() - 2;
            let init = if last {
                topology.output_init
            } else {
                topology.hidden_init
            };
            weights.push(init.sample_matrix(rng, fan_out, fan_in, fan_in));
            if topology.bias {
                biases.push(topology.bias_init.sample_matrix(rng, fan_out, fan_in, 1));
            }
        }

        Ok(Self {
            topology,
            weights,
            biases,
            layer_outputs: Vec::new(),
        })
    }

    #[must_use]
    pub fn topology(&self) -> &NetworkTopology {
        &self.topology
    }

    /// Node counts per layer: input, hidden layers, output.
    #[must_use]
    pub fn layer_sizes(&self) -> Vec<usize> {
        self.topology.layer_sizes()
    }

    #[must_use]
    pub fn input_len(&self) -> usize {
        self.topology.input
    }

    #[must_use]
    pub fn output_len(&self) -> usize {
        self.topology.output
    }

    /// Post-activation outputs of every layer from the most recent forward
    /// pass; empty before the first pass.
    #[must_use]
    pub fn layer_outputs(&self) -> &[Vec<f32>] {
        &self.layer_outputs
    }

    /// Propagates `input` through the network.
    ///
    /// Applies `W_i * prev (+ bias_i)` per connection in order, with the
    /// hidden activation on all but the last connection and the output
    /// activation on the last. Each layer's post-activation output is
    /// recorded for introspection.
    pub fn forward(&mut self, input: &[f32]) -> Result<Vec<f32>, InputSizeError> {
        if input.len() != self.topology.input {
            return Err(InputSizeError {
                expected: self.topology.input,
                found: input.len(),
            });
        }

        self.layer_outputs.clear();
        let mut current = input.to_vec();
        let last = self.weights.len() - 1;
        for (index, weight) in self.weights.iter().enumerate() {
            let mut output = weight.mul_vec(&current);
            if let Some(bias) = self.biases.get(index) {
                for (o, b) in output.iter_mut().zip(bias.as_slice()) {
                    *o += b;
                }
            }
            let activation = if index == last {
                self.topology.output_activation
            } else {
                self.topology.hidden_activation
            };
            activation.apply(&mut output);
            self.layer_outputs.push(output.clone());
            current = output;
        }
        Ok(current)
    }

    /// Total number of weight and bias elements.
    #[must_use]
    pub fn genome_len(&self) -> usize {
        let weights: usize = self.weights.iter().map(Matrix::len).sum();
        let biases: usize = self.biases.iter().map(Matrix::len).sum();
        weights + biases
    }

    /// Flattens all parameters into a genome vector.
    ///
    /// Order is fixed: per connection, the weight matrix row-major, then its
    /// bias column (when bias is enabled).
    #[must_use]
    pub fn genome(&self) -> Vec<f32> {
        let mut genome = Vec::with_capacity(self.genome_len());
        for (index, weight) in self.weights.iter().enumerate() {
            genome.extend_from_slice(weight.as_slice());
            if let Some(bias) = self.biases.get(index) {
                genome.extend_from_slice(bias.as_slice());
            }
        }
        genome
    }

    /// Overwrites all parameters from a genome vector.
    ///
    /// Rejects any vector whose length differs from [`Self::genome_len`];
    /// the network is left untouched on error.
    pub fn apply_genome(&mut self, genome: &[f32]) -> Result<(), GenomeSizeError> {
        let expected = self.genome_len();
        if genome.len() != expected {
            return Err(GenomeSizeError {
                expected,
                found: genome.len(),
            });
        }

        let mut offset = 0;
        for index in 0..self.weights.len() {
            let len = self.weights[index].len();
            self.weights[index].copy_from_slice(&genome[offset..offset + len]);
            offset += len;
            if let Some(bias) = self.biases.get_mut(index) {
                let len = bias.len();
                bias.copy_from_slice(&genome[offset..offset + len]);
                offset += len;
            }
        }
        debug_assert_eq!(offset, expected);
        Ok(())
    }
}
