use std::collections::BTreeMap;

use rand::Rng;
use serpevo_engine::RunStats;

use crate::{Crossover, FitnessFunction, GaConfigError, Mutation, Selection, couple};

/// Which genomes the children overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Replacement {
    /// The configured number of lowest-fitness genomes.
    #[display("fitness_based")]
    FitnessBased,
    /// The whole population; the offspring count is forced to the
    /// population size.
    #[display("generational")]
    Generational,
}

/// One full evolution step: fitness, selection, coupling, crossover,
/// mutation, replacement.
///
/// The algorithm operates on bare genome maps so the caller decides when
/// network weights are actually rewritten.
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm {
    fitness: FitnessFunction,
    selection: Selection,
    crossover: Crossover,
    crossover_rate: f64,
    mutation: Mutation,
    offspring: usize,
    replacement: Replacement,
}

impl GeneticAlgorithm {
    /// Validates the operator combination.
    ///
    /// The offspring count is rounded up to even so selection always
    /// produces whole couples.
    ///
    /// # Errors
    ///
    /// Returns [`GaConfigError`] for a tournament of fewer than two
    /// contenders.
    pub fn new(
        fitness: FitnessFunction,
        selection: Selection,
        crossover: Crossover,
        crossover_rate: f64,
        mutation: Mutation,
        offspring: usize,
        replacement: Replacement,
    ) -> Result<Self, GaConfigError> {
        if let Selection::Tournament { size } = selection
            && size < 2
        {
            return Err(GaConfigError::TournamentSize { size });
        }
        Ok(Self {
            fitness,
            selection,
            crossover,
            crossover_rate: crossover_rate.clamp(0.0, 1.0),
            mutation,
            offspring: offspring + offspring % 2,
            replacement,
        })
    }

    #[must_use]
    pub fn fitness_function(&self) -> &FitnessFunction {
        &self.fitness
    }

    /// Evolves `genomes` in place from the latest run results.
    ///
    /// Children overwrite the lowest-fitness genomes. Returns the id of the
    /// highest-ranked individual of the generation that was just scored
    /// (the one callers persist as the running best) together with the full
    /// fitness map.
    pub fn next_generation<R>(
        &self,
        genomes: &mut BTreeMap<u32, Vec<f32>>,
        scores: &BTreeMap<u32, RunStats>,
        rng: &mut R,
    ) -> (u32, BTreeMap<u32, f64>)
    where
        R: Rng + ?Sized,
    {
        let fitness = self.fitness.fitness_map(scores);

        // ids ranked by ascending fitness, ties broken by id for
        // deterministic replacement
        let mut ranking: Vec<u32> = genomes.keys().copied().collect();
        ranking.sort_by(|a, b| {
            fitness
                .get(a)
                .partial_cmp(&fitness.get(b))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(b))
        });
        let best = ranking[ranking.len() - 1];

        let offspring = match self.replacement {
            Replacement::FitnessBased => self.offspring.min(genomes.len()),
            Replacement::Generational => genomes.len(),
        };

        let parents = self.selection.select(&fitness, offspring + offspring % 2, rng);
        let couples = match couple(&parents, rng) {
            Ok(couples) => couples,
            Err(_) => return (best, fitness),
        };

        let mut children = Vec::with_capacity(offspring + 1);
        for (a, b) in couples {
            let (c1, c2) = if rng.random_bool(self.crossover_rate) {
                self.crossover.apply(&genomes[&a], &genomes[&b], rng)
            } else {
                (genomes[&a].clone(), genomes[&b].clone())
            };
            children.push(c1);
            children.push(c2);
        }
        for child in &mut children {
            self.mutation.apply(child, rng);
        }
        // selection always yields whole couples, so an odd replacement
        // quota gets one spare child
        children.truncate(offspring);

        for (id, child) in ranking.iter().zip(children) {
            if let Some(genome) = genomes.get_mut(id) {
                *genome = child;
            }
        }

        (best, fitness)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    fn algorithm(offspring: usize, replacement: Replacement) -> GeneticAlgorithm {
        GeneticAlgorithm::new(
            FitnessFunction::Composite,
            Selection::StochasticUniversal,
            Crossover::Uniform,
            0.0,
            Mutation::Gaussian {
                rate: 0.0,
                sigma: 0.0,
            },
            offspring,
            replacement,
        )
        .unwrap()
    }

    fn scores(moves: &[usize]) -> BTreeMap<u32, RunStats> {
        moves
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let mut stats = RunStats::new(97);
                for _ in 0..count {
                    stats.record_move(false);
                }
                stats.finalize();
                (u32::try_from(i).unwrap() + 1, stats)
            })
            .collect()
    }

    fn genomes(ids: u32) -> BTreeMap<u32, Vec<f32>> {
        (1..=ids).map(|id| (id, vec![id as f32; 4])).collect()
    }

    #[test]
    fn test_small_tournament_is_rejected() {
        let err = GeneticAlgorithm::new(
            FitnessFunction::Composite,
            Selection::Tournament { size: 1 },
            Crossover::Uniform,
            0.5,
            Mutation::Gaussian {
                rate: 0.1,
                sigma: 0.5,
            },
            4,
            Replacement::FitnessBased,
        )
        .unwrap_err();
        assert_eq!(err, GaConfigError::TournamentSize { size: 1 });
    }

    #[test]
    fn test_best_id_is_the_top_of_the_ranking() {
        let ga = algorithm(2, Replacement::FitnessBased);
        let mut genomes = genomes(4);
        // longer survival means higher composite fitness
        let scores = scores(&[10, 40, 20, 30]);
        let mut rng = Pcg32::seed_from_u64(1);
        let (best, fitness) = ga.next_generation(&mut genomes, &scores, &mut rng);
        assert_eq!(best, 2);
        assert_eq!(fitness.len(), 4);
    }

    #[test]
    fn test_replacement_overwrites_only_the_worst() {
        let ga = algorithm(2, Replacement::FitnessBased);
        let mut genomes = genomes(4);
        let before = genomes.clone();
        let scores = scores(&[10, 40, 20, 30]);
        let mut rng = Pcg32::seed_from_u64(2);
        ga.next_generation(&mut genomes, &scores, &mut rng);
        // ids 1 and 3 rank lowest and get replaced by children cloned
        // from the selected parents (crossover and mutation are off)
        assert_eq!(genomes[&2], before[&2]);
        assert_eq!(genomes[&4], before[&4]);
        for id in [1_u32, 3] {
            assert!(before.values().any(|genome| genome == &genomes[&id]));
        }
    }

    #[test]
    fn test_generational_replaces_everyone_with_selected_stock() {
        let ga = algorithm(0, Replacement::Generational);
        let mut genomes = genomes(4);
        let before = genomes.clone();
        let scores = scores(&[10, 40, 20, 30]);
        let mut rng = Pcg32::seed_from_u64(3);
        ga.next_generation(&mut genomes, &scores, &mut rng);
        assert_eq!(genomes.len(), 4);
        for genome in genomes.values() {
            assert!(before.values().any(|parent| parent == genome));
        }
    }

    #[test]
    fn test_offspring_rounds_up_to_even() {
        let ga = algorithm(3, Replacement::FitnessBased);
        let mut genomes = genomes(6);
        let before = genomes.clone();
        let scores = scores(&[10, 20, 30, 40, 50, 60]);
        let mut rng = Pcg32::seed_from_u64(4);
        ga.next_generation(&mut genomes, &scores, &mut rng);
        // 3 rounds to 4: ids 1..=4 replaced, 5 and 6 untouched
        assert_eq!(genomes[&5], before[&5]);
        assert_eq!(genomes[&6], before[&6]);
    }
}
