use serpevo_engine::{Controller, Direction, RelativeTurn};
use serpevo_neural::NeuralNetwork;

/// Steers a simulation with a neural network.
///
/// The vision vector is fed forward and the arg-max of the three outputs is
/// read as a relative turn: index 0 turns left, 1 keeps the heading, 2 turns
/// right. Ties resolve to the earliest index, matching arg-max convention.
#[derive(Debug, Clone)]
pub struct NetworkController {
    network: NeuralNetwork,
}

impl NetworkController {
    #[must_use]
    pub fn new(network: NeuralNetwork) -> Self {
        Self { network }
    }

    #[must_use]
    pub fn network(&self) -> &NeuralNetwork {
        &self.network
    }
}

impl Controller for NetworkController {
    fn next_direction(&mut self, heading: Direction, vision: &[f32]) -> Direction {
        let Ok(output) = self.network.forward(vision) else {
            // architecture mismatch, keep going straight
            return heading;
        };
        let mut index = 0;
        for (candidate, &value) in output.iter().enumerate().skip(1) {
            if value > output[index] {
                index = candidate;
            }
        }
        heading.apply_turn(RelativeTurn::from_index(index))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use serpevo_neural::{Activation, NetworkTopology, WeightInit};

    use super::*;

    fn tiny_network() -> NeuralNetwork {
        let topology = NetworkTopology {
            input: 3,
            output: 3,
            hidden: vec![],
            hidden_init: WeightInit::He,
            hidden_activation: Activation::Relu,
            output_init: WeightInit::Zero,
            output_activation: Activation::Sigmoid,
            bias: false,
            bias_init: WeightInit::Zero,
        };
        let mut rng = Pcg32::seed_from_u64(0);
        NeuralNetwork::new(topology, &mut rng).unwrap()
    }

    #[test]
    fn test_zero_weights_tie_turns_left() {
        // every output is identical, so arg-max picks index 0 (turn left)
        let mut controller = NetworkController::new(tiny_network());
        let direction = controller.next_direction(Direction::Up, &[1.0, 0.0, 0.0]);
        assert_eq!(direction, Direction::Left);
    }

    #[test]
    fn test_steered_output_turns_right() {
        let mut network = tiny_network();
        // weight matrix is 3x3 row-major; make output 2 respond to input 0
        let mut genome = vec![0.0; network.genome_len()];
        genome[6] = 5.0;
        network.apply_genome(&genome).unwrap();
        let mut controller = NetworkController::new(network);
        let direction = controller.next_direction(Direction::Up, &[1.0, 0.0, 0.0]);
        assert_eq!(direction, Direction::Right);
    }

    #[test]
    fn test_wrong_input_length_keeps_heading() {
        let mut controller = NetworkController::new(tiny_network());
        let direction = controller.next_direction(Direction::Down, &[1.0]);
        assert_eq!(direction, Direction::Down);
    }
}
