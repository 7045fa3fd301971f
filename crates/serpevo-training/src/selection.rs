use std::collections::BTreeMap;

use rand::{Rng, seq::SliceRandom};

use crate::GaConfigError;

/// Parent selection operators.
///
/// All of them draw `num_parents` ids from the fitness map, with
/// replacement across draws: the same individual may parent several
/// couples in one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Selection {
    /// One spin of an evenly spaced comb over the cumulative fitness
    /// curve. Low variance: an individual's expected count of slots is
    /// proportional to its fitness share.
    #[display("stochastic_universal")]
    StochasticUniversal,
    /// Independent fitness-proportionate draw per parent.
    #[display("roulette_wheel")]
    RouletteWheel,
    /// Each winner is the fittest of `size` contenders, the contenders
    /// themselves drawn by one stochastic-universal spin.
    #[display("tournament")]
    Tournament { size: usize },
}

impl Selection {
    /// Draws exactly `num_parents` ids.
    pub fn select<R>(
        &self,
        fitness: &BTreeMap<u32, f64>,
        num_parents: usize,
        rng: &mut R,
    ) -> Vec<u32>
    where
        R: Rng + ?Sized,
    {
        match *self {
            Self::StochasticUniversal => stochastic_universal(fitness, num_parents, rng),
            Self::RouletteWheel => (0..num_parents)
                .map(|_| roulette_wheel(fitness, rng))
                .collect(),
            Self::Tournament { size } => (0..num_parents)
                .map(|_| {
                    let contenders = stochastic_universal(fitness, size, rng);
                    tournament_winner(fitness, &contenders)
                })
                .collect(),
        }
    }
}

/// Random pairing of parents by pop-without-replacement.
///
/// The flattened pairs are exactly the input multiset, only the grouping
/// is random.
///
/// # Errors
///
/// Returns [`GaConfigError::OddParents`] when the input length is odd.
pub fn couple<R>(parents: &[u32], rng: &mut R) -> Result<Vec<(u32, u32)>, GaConfigError>
where
    R: Rng + ?Sized,
{
    if parents.len() % 2 != 0 {
        return Err(GaConfigError::OddParents {
            count: parents.len(),
        });
    }
    let mut pool = parents.to_vec();
    pool.shuffle(rng);
    Ok(pool.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect())
}

/// Normalized cumulative fitness curve as `(id, upper_bound)` pairs.
///
/// A zero (or degenerate) total falls back to equal weights so selection
/// still works on a generation where every run scored nothing.
fn cumulative(fitness: &BTreeMap<u32, f64>) -> Vec<(u32, f64)> {
    let total: f64 = fitness.values().copied().filter(|v| *v > 0.0).sum();
    let mut bound = 0.0;
    let count = fitness.len();
    fitness
        .iter()
        .map(|(&id, &value)| {
            #[expect(clippy::cast_precision_loss)]
            let share = if total > 0.0 {
                value.max(0.0) / total
            } else {
                1.0 / count as f64
            };
            bound += share;
            (id, bound)
        })
        .collect()
}

fn pick(curve: &[(u32, f64)], point: f64) -> u32 {
    for &(id, bound) in curve {
        if point < bound {
            return id;
        }
    }
    // rounding pushed the point past the last bound
    curve[curve.len() - 1].0
}

fn stochastic_universal<R>(fitness: &BTreeMap<u32, f64>, count: usize, rng: &mut R) -> Vec<u32>
where
    R: Rng + ?Sized,
{
    if count == 0 {
        return Vec::new();
    }
    let curve = cumulative(fitness);
    #[expect(clippy::cast_precision_loss)]
    let step = 1.0 / count as f64;
    let start = rng.random_range(0.0..step);
    #[expect(clippy::cast_precision_loss)]
    (0..count)
        .map(|i| pick(&curve, (i as f64).mul_add(step, start)))
        .collect()
}

fn roulette_wheel<R>(fitness: &BTreeMap<u32, f64>, rng: &mut R) -> u32
where
    R: Rng + ?Sized,
{
    let curve = cumulative(fitness);
    pick(&curve, rng.random_range(0.0..1.0))
}

fn tournament_winner(fitness: &BTreeMap<u32, f64>, contenders: &[u32]) -> u32 {
    let mut winner = contenders[0];
    for &id in &contenders[1..] {
        if fitness.get(&id) > fitness.get(&winner) {
            winner = id;
        }
    }
    winner
}
