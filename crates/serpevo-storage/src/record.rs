use std::{collections::BTreeMap, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serpevo_engine::{DistanceMetric, RunStats, VisionMode};
use serpevo_evaluator::{ArchitectureConfig, Individual};
use serpevo_neural::NetworkTopology;

use crate::{
    LoadError, RecordKind, SaveError,
    envelope::{load, save},
};

/// A single trained network, complete enough to replay on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndividualRecord {
    pub vision: VisionMode,
    pub metric: DistanceMetric,
    pub topology: NetworkTopology,
    pub genome: Vec<f32>,
    pub stats: RunStats,
    pub saved_at: DateTime<Utc>,
}

impl IndividualRecord {
    /// Snapshots an individual under its population's architecture.
    #[must_use]
    pub fn snapshot(config: &ArchitectureConfig, individual: &Individual) -> Self {
        Self {
            vision: config.vision,
            metric: config.metric,
            topology: individual.network().topology().clone(),
            genome: individual.genome(),
            stats: individual.stats().clone(),
            saved_at: Utc::now(),
        }
    }
}

/// A whole-population checkpoint, sufficient to resume training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub config: ArchitectureConfig,
    pub genomes: BTreeMap<u32, Vec<f32>>,
    pub generation: usize,
    pub saved_at: DateTime<Utc>,
}

impl PopulationRecord {
    #[must_use]
    pub fn new(
        config: ArchitectureConfig,
        genomes: BTreeMap<u32, Vec<f32>>,
        generation: usize,
    ) -> Self {
        Self {
            config,
            genomes,
            generation,
            saved_at: Utc::now(),
        }
    }
}

/// Writes an individual checkpoint.
///
/// # Errors
///
/// Returns [`SaveError`] when serialization or the write fails.
pub fn save_individual<P>(path: P, record: &IndividualRecord) -> Result<(), SaveError>
where
    P: AsRef<Path>,
{
    save(path.as_ref(), RecordKind::Individual, record)
}

/// Writes a population checkpoint.
///
/// # Errors
///
/// Returns [`SaveError`] when serialization or the write fails.
pub fn save_population<P>(path: P, record: &PopulationRecord) -> Result<(), SaveError>
where
    P: AsRef<Path>,
{
    save(path.as_ref(), RecordKind::Population, record)
}

/// Reads an individual checkpoint back.
///
/// # Errors
///
/// Returns [`LoadError`] distinguishing a missing file, a corrupt one, and
/// a checkpoint of another kind.
pub fn load_individual<P>(path: P) -> Result<IndividualRecord, LoadError>
where
    P: AsRef<Path>,
{
    load(path.as_ref(), RecordKind::Individual)
}

/// Reads a population checkpoint back.
///
/// # Errors
///
/// Returns [`LoadError`] distinguishing a missing file, a corrupt one, and
/// a checkpoint of another kind.
pub fn load_population<P>(path: P) -> Result<PopulationRecord, LoadError>
where
    P: AsRef<Path>,
{
    load(path.as_ref(), RecordKind::Population)
}
