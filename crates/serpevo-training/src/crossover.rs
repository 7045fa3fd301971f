use rand::Rng;

/// Recombination operators over two equal-length parent genomes.
///
/// Every operator returns two children of the parents' length.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum Crossover {
    /// Per-gene 50/50 swap.
    #[display("uniform")]
    Uniform,
    /// Genes after a random cut are blended `alpha*a + (1-alpha)*b`
    /// (mirrored for the second child); genes before the cut are cloned.
    #[display("single_point_arithmetic")]
    SinglePointArithmetic { alpha: f32 },
    /// Every gene blended.
    #[display("whole_arithmetic")]
    WholeArithmetic { alpha: f32 },
    /// Simulated binary crossover: a per-gene spread factor shaped by
    /// `eta` keeps children near the parents for large eta and lets them
    /// explore for small eta.
    #[display("sbx")]
    Sbx { eta: f32 },
}

impl Crossover {
    /// Recombines two parents into two children.
    ///
    /// # Panics
    ///
    /// Panics when the parents' lengths differ.
    #[must_use]
    pub fn apply<R>(&self, a: &[f32], b: &[f32], rng: &mut R) -> (Vec<f32>, Vec<f32>)
    where
        R: Rng + ?Sized,
    {
        assert_eq!(a.len(), b.len());
        match *self {
            Self::Uniform => {
                let mut c1 = a.to_vec();
                let mut c2 = b.to_vec();
                for i in 0..c1.len() {
                    if rng.random_bool(0.5) {
                        std::mem::swap(&mut c1[i], &mut c2[i]);
                    }
                }
                (c1, c2)
            }
            Self::SinglePointArithmetic { alpha } => {
                let cut = if a.is_empty() {
                    0
                } else {
                    rng.random_range(0..a.len())
                };
                let mut c1 = a.to_vec();
                let mut c2 = b.to_vec();
                for i in cut..a.len() {
                    (c1[i], c2[i]) = blend(a[i], b[i], alpha);
                }
                (c1, c2)
            }
            Self::WholeArithmetic { alpha } => {
                let mut c1 = vec![0.0; a.len()];
                let mut c2 = vec![0.0; a.len()];
                for i in 0..a.len() {
                    (c1[i], c2[i]) = blend(a[i], b[i], alpha);
                }
                (c1, c2)
            }
            Self::Sbx { eta } => {
                let mut c1 = vec![0.0; a.len()];
                let mut c2 = vec![0.0; a.len()];
                for i in 0..a.len() {
                    let u: f32 = rng.random_range(0.0..1.0);
                    let gamma = if u <= 0.5 {
                        (2.0 * u).powf(1.0 / (eta + 1.0))
                    } else {
                        (1.0 / (2.0 * (1.0 - u))).powf(1.0 / (eta + 1.0))
                    };
                    c1[i] = 0.5 * ((1.0 + gamma).mul_add(a[i], (1.0 - gamma) * b[i]));
                    c2[i] = 0.5 * ((1.0 - gamma).mul_add(a[i], (1.0 + gamma) * b[i]));
                }
                (c1, c2)
            }
        }
    }
}

fn blend(a: f32, b: f32, alpha: f32) -> (f32, f32) {
    (
        alpha.mul_add(a, (1.0 - alpha) * b),
        alpha.mul_add(b, (1.0 - alpha) * a),
    )
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    const OPERATORS: [Crossover; 4] = [
        Crossover::Uniform,
        Crossover::SinglePointArithmetic { alpha: 0.3 },
        Crossover::WholeArithmetic { alpha: 0.3 },
        Crossover::Sbx { eta: 5.0 },
    ];

    #[test]
    fn test_children_keep_the_parents_length() {
        let a = vec![1.0; 33];
        let b = vec![-1.0; 33];
        let mut rng = Pcg32::seed_from_u64(1);
        for operator in OPERATORS {
            let (c1, c2) = operator.apply(&a, &b, &mut rng);
            assert_eq!(c1.len(), 33);
            assert_eq!(c2.len(), 33);
        }
    }

    #[test]
    fn test_uniform_only_swaps() {
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let b = vec![5.0, 6.0, 7.0, 8.0];
        let mut rng = Pcg32::seed_from_u64(2);
        let (c1, c2) = Crossover::Uniform.apply(&a, &b, &mut rng);
        for i in 0..a.len() {
            let mut got = [c1[i], c2[i]];
            got.sort_by(f32::total_cmp);
            assert_eq!(got, [a[i], b[i]]);
        }
    }

    #[test]
    fn test_whole_arithmetic_blend() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        let mut rng = Pcg32::seed_from_u64(3);
        let (c1, c2) = Crossover::WholeArithmetic { alpha: 0.25 }.apply(&a, &b, &mut rng);
        assert_eq!(c1, vec![0.25, 0.75]);
        assert_eq!(c2, vec![0.75, 0.25]);
    }

    #[test]
    fn test_sbx_preserves_the_gene_sum() {
        // c1 + c2 == a + b per gene by construction
        let a = vec![0.5, -1.5, 2.0];
        let b = vec![1.0, 0.5, -0.5];
        let mut rng = Pcg32::seed_from_u64(4);
        let (c1, c2) = Crossover::Sbx { eta: 2.0 }.apply(&a, &b, &mut rng);
        for i in 0..a.len() {
            assert!((c1[i] + c2[i] - (a[i] + b[i])).abs() < 1e-5);
        }
    }

    #[test]
    #[should_panic(expected = "assertion")]
    fn test_length_mismatch_panics() {
        let mut rng = Pcg32::seed_from_u64(5);
        let _ = Crossover::Uniform.apply(&[1.0], &[1.0, 2.0], &mut rng);
    }
}
