use serde::{Deserialize, Serialize};
use serpevo_engine::{DistanceMetric, VisionMode};
use serpevo_neural::{Activation, NetworkTopology, WeightInit};

/// Everything that must be identical across a population for genomes to be
/// interchangeable: the grid, the vision encoding, and the network shape.
///
/// Checkpoints embed this config so a saved population can only be resumed
/// against a compatible architecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureConfig {
    pub rows: usize,
    pub cols: usize,
    pub vision: VisionMode,
    pub metric: DistanceMetric,
    pub hidden: Vec<usize>,
    pub hidden_activation: Activation,
    pub output_activation: Activation,
    pub hidden_init: WeightInit,
    pub output_init: WeightInit,
    pub bias: bool,
}

impl ArchitectureConfig {
    /// Network input width implied by the vision mode.
    #[must_use]
    pub fn input_len(&self) -> usize {
        self.vision.input_len()
    }

    /// The full topology: vision inputs, the configured hidden stack, and
    /// three outputs (turn left, go straight, turn right).
    #[must_use]
    pub fn topology(&self) -> NetworkTopology {
        NetworkTopology {
            input: self.input_len(),
            output: 3,
            hidden: self.hidden.clone(),
            hidden_init: self.hidden_init,
            hidden_activation: self.hidden_activation,
            output_init: self.output_init,
            output_activation: self.output_activation,
            bias: self.bias,
            bias_init: WeightInit::Zero,
        }
    }

    /// Highest reachable score on the configured grid.
    #[must_use]
    pub fn max_score(&self) -> usize {
        self.rows * self.cols - 3
    }
}

impl Default for ArchitectureConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            vision: VisionMode::Binary,
            metric: DistanceMetric::InverseStep,
            hidden: vec![16, 8],
            hidden_activation: Activation::Relu,
            output_activation: Activation::Softmax,
            hidden_init: WeightInit::He,
            output_init: WeightInit::Glorot,
            bias: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology_derivation() {
        let config = ArchitectureConfig {
            vision: VisionMode::Real,
            hidden: vec![12],
            ..ArchitectureConfig::default()
        };
        let topology = config.topology();
        assert_eq!(topology.input, 40);
        assert_eq!(topology.output, 3);
        assert_eq!(topology.hidden, vec![12]);
        assert!(topology.validate().is_ok());
    }

    #[test]
    fn test_max_score_leaves_room_for_the_starting_body() {
        let config = ArchitectureConfig::default();
        assert_eq!(config.max_score(), 97);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = ArchitectureConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: ArchitectureConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}
