use rand::Rng;
use rand_distr::{Distribution as _, Normal};
use serde::{Deserialize, Serialize};

use crate::Matrix;

/// Weight initialization schemes.
///
/// All non-zero schemes draw from a normal distribution whose standard
/// deviation depends on the connection fan:
///
/// - Glorot: `N(0, sqrt(2 / (fan_in + fan_out)))`
/// - He: `N(0, sqrt(2 / fan_in))`
/// - LeCun: `N(0, sqrt(1 / fan_in))`
/// - Zero: all zeros, valid for bias vectors only
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
pub enum WeightInit {
    Glorot,
    He,
    LeCun,
    Zero,
}

impl WeightInit {
    /// Standard deviation for a connection with the given fan, or `None`
    /// for [`WeightInit::Zero`].
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn std_dev(self, fan_in: usize, fan_out: usize) -> Option<f32> {
        let fan_in = fan_in as f32;
        let fan_out = fan_out as f32;
        match self {
            Self::Glorot => Some((2.0 / (fan_in + fan_out)).sqrt()),
            Self::He => Some((2.0 / fan_in).sqrt()),
            Self::LeCun => Some((1.0 / fan_in).sqrt()),
            Self::Zero => None,
        }
    }

    /// Samples a freshly initialized `fan_out x cols` matrix for a
    /// connection with `fan_in` inputs.
    ///
    /// `cols` is `fan_in` for weight matrices and 1 for bias columns; the
    /// fan used for the standard deviation is always the connection fan.
    #[must_use]
    pub fn sample_matrix<R>(self, rng: &mut R, fan_out: usize, fan_in: usize, cols: usize) -> Matrix
    where
        R: Rng + ?Sized,
    {
        match self.std_dev(fan_in, fan_out) {
            Some(std_dev) => {
                let normal = Normal::new(0.0, std_dev).expect("std_dev is finite and positive");
                Matrix::from_fn(fan_out, cols, |_, _| normal.sample(rng))
            }
            None => Matrix::zeros(fan_out, cols),
        }
    }
}
