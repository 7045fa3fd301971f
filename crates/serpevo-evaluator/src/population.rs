use std::collections::BTreeMap;

use rand::Rng;
use serpevo_engine::RunStats;
use serpevo_neural::{GenomeSizeError, NeuralNetwork, TopologyError};

use crate::ArchitectureConfig;

/// One candidate solution: a network plus the statistics of its latest run.
#[derive(Debug, Clone)]
pub struct Individual {
    id: u32,
    network: NeuralNetwork,
    stats: RunStats,
}

impl Individual {
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn network(&self) -> &NeuralNetwork {
        &self.network
    }

    #[must_use]
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Flat genome of the current network weights.
    #[must_use]
    pub fn genome(&self) -> Vec<f32> {
        self.network.genome()
    }
}

/// A fixed roster of individuals sharing one [`ArchitectureConfig`].
///
/// Ids are assigned densely from 1 at construction and never change;
/// evolution rewrites genomes in place rather than replacing members, so a
/// `BTreeMap` keyed by id gives every downstream consumer a deterministic
/// iteration order.
#[derive(Debug, Clone)]
pub struct Population {
    config: ArchitectureConfig,
    individuals: BTreeMap<u32, Individual>,
}

impl Population {
    /// Creates `size` individuals with freshly initialized networks.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError`] when the configured topology is invalid.
    pub fn random<R>(config: ArchitectureConfig, size: usize, rng: &mut R) -> Result<Self, TopologyError>
    where
        R: Rng + ?Sized,
    {
        let topology = config.topology();
        let max_score = config.max_score();
        let mut individuals = BTreeMap::new();
        for id in 1..=u32::try_from(size).unwrap_or(u32::MAX) {
            let network = NeuralNetwork::new(topology.clone(), rng)?;
            individuals.insert(
                id,
                Individual {
                    id,
                    network,
                    stats: RunStats::new(max_score),
                },
            );
        }
        Ok(Self {
            config,
            individuals,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ArchitectureConfig {
        &self.config
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Individual> {
        self.individuals.get(&id)
    }

    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.values()
    }

    /// Snapshot of every genome, keyed by id.
    #[must_use]
    pub fn genomes(&self) -> BTreeMap<u32, Vec<f32>> {
        self.individuals
            .iter()
            .map(|(&id, individual)| (id, individual.genome()))
            .collect()
    }

    /// Writes genomes back into the matching individuals.
    ///
    /// Ids absent from the population are ignored, which lets an oversized
    /// checkpoint seed a smaller population.
    ///
    /// # Errors
    ///
    /// Returns [`GenomeSizeError`] on the first genome whose length does not
    /// match the architecture; earlier genomes stay applied.
    pub fn apply_genomes(
        &mut self,
        genomes: &BTreeMap<u32, Vec<f32>>,
    ) -> Result<(), GenomeSizeError> {
        for (id, genome) in genomes {
            if let Some(individual) = self.individuals.get_mut(id) {
                individual.network.apply_genome(genome)?;
            }
        }
        Ok(())
    }

    /// Stores the evaluation result for `id`. Unknown ids are ignored.
    pub fn set_stats(&mut self, id: u32, stats: RunStats) {
        if let Some(individual) = self.individuals.get_mut(&id) {
            individual.stats = stats;
        }
    }

    /// The individual with the best latest run, by score then efficiency.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.values().max_by(|a, b| {
            (a.stats.score(), a.stats.efficiency())
                .partial_cmp(&(b.stats.score(), b.stats.efficiency()))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}
