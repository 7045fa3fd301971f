use rand::Rng;
use rand_distr::{Distribution as _, Normal};

/// Gene-level mutation applied to every child after crossover.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum Mutation {
    /// Each gene independently mutates with probability `rate` by adding
    /// noise drawn from `N(0, sigma)`.
    #[display("gaussian")]
    Gaussian { rate: f64, sigma: f32 },
}

impl Mutation {
    /// Mutates `genome` in place.
    pub fn apply<R>(&self, genome: &mut [f32], rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        match *self {
            Self::Gaussian { rate, sigma } => {
                let Ok(noise) = Normal::new(0.0, sigma) else {
                    return;
                };
                for gene in genome {
                    if rng.random_bool(rate.clamp(0.0, 1.0)) {
                        *gene += noise.sample(rng);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_rate_zero_is_identity() {
        let mut genome = vec![1.0, -2.0, 0.5];
        let original = genome.clone();
        let mut rng = Pcg32::seed_from_u64(1);
        Mutation::Gaussian { rate: 0.0, sigma: 1.0 }.apply(&mut genome, &mut rng);
        assert_eq!(genome, original);
    }

    #[test]
    fn test_rate_one_sigma_zero_is_identity() {
        let mut genome = vec![1.0, -2.0, 0.5];
        let original = genome.clone();
        let mut rng = Pcg32::seed_from_u64(2);
        Mutation::Gaussian { rate: 1.0, sigma: 0.0 }.apply(&mut genome, &mut rng);
        assert_eq!(genome, original);
    }

    #[test]
    fn test_rate_one_perturbs_every_gene() {
        let mut genome = vec![0.0; 64];
        let mut rng = Pcg32::seed_from_u64(3);
        Mutation::Gaussian { rate: 1.0, sigma: 0.5 }.apply(&mut genome, &mut rng);
        assert!(genome.iter().all(|&gene| gene != 0.0));
    }
}
