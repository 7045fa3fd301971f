use std::path::PathBuf;

use anyhow::Context as _;
use serpevo_storage::load_individual;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ShowModelArg {
    /// Saved individual to inspect
    model: PathBuf,
}

pub(crate) fn run(arg: &ShowModelArg) -> anyhow::Result<()> {
    let record = load_individual(&arg.model)
        .with_context(|| format!("failed to load model from {}", arg.model.display()))?;
    println!("model:      {}", arg.model.display());
    println!("saved at:   {}", record.saved_at);
    println!("vision:     {} ({} inputs)", record.vision, record.vision.input_len());
    println!("metric:     {}", record.metric);
    println!(
        "layers:     {:?} (bias: {})",
        record.topology.layer_sizes(),
        record.topology.bias,
    );
    println!("genome:     {} genes", record.genome.len());
    println!(
        "last run:   score {}/{} accuracy {:.3} efficiency {:.3} moves {}",
        record.stats.score(),
        record.stats.max_score(),
        record.stats.accuracy(),
        record.stats.efficiency(),
        record.stats.total_moves(),
    );
    Ok(())
}
