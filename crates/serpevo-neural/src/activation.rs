use serde::{Deserialize, Serialize};

/// Activation functions applied to a layer's pre-activation output.
///
/// A closed set: configuration names are parsed via `FromStr`, so an unknown
/// activation name is rejected before any network is built.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// `max(0, x)` element-wise.
    Relu,
    /// `1 / (1 + e^-x)` element-wise.
    Sigmoid,
    /// Hyperbolic tangent element-wise.
    Tanh,
    /// `e^x / Σ e^x` over the whole layer.
    ///
    /// Deliberately unshifted (no max subtraction): numerically fragile for
    /// large inputs, but changing it would alter every evolved genome's
    /// behavior.
    Softmax,
}

impl Activation {
    /// Applies the activation to a layer output in place.
    pub fn apply(self, values: &mut [f32]) {
        match self {
            Self::Relu => {
                for v in values {
                    *v = v.max(0.0);
                }
            }
            Self::Sigmoid => {
                for v in values {
                    *v = 1.0 / (1.0 + (-*v).exp());
                }
            }
            Self::Tanh => {
                for v in values {
                    *v = v.tanh();
                }
            }
            Self::Softmax => {
                let sum: f32 = values.iter().map(|v| v.exp()).sum();
                for v in values {
                    *v = v.exp() / sum;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relu_clamps_negatives() {
        let mut values = [-1.0, 0.0, 2.5];
        Activation::Relu.apply(&mut values);
        assert_eq!(values, [0.0, 0.0, 2.5]);
    }

    #[test]
    fn test_sigmoid_at_zero_is_half() {
        let mut values = [0.0];
        Activation::Sigmoid.apply(&mut values);
        assert!((values[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_tanh_is_odd() {
        let mut pos = [0.7];
        let mut neg = [-0.7];
        Activation::Tanh.apply(&mut pos);
        Activation::Tanh.apply(&mut neg);
        assert!((pos[0] + neg[0]).abs() < 1e-6);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let mut values = [0.0, 1.0, -2.0, 0.5];
        Activation::Softmax.apply(&mut values);
        let sum: f32 = values.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(values.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_softmax_uniform_input() {
        let mut values = [3.0, 3.0];
        Activation::Softmax.apply(&mut values);
        assert!((values[0] - 0.5).abs() < 1e-6);
        assert!((values[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("relu".parse::<Activation>().unwrap(), Activation::Relu);
        assert_eq!("softmax".parse::<Activation>().unwrap(), Activation::Softmax);
        assert!("swish".parse::<Activation>().is_err());
    }
}
