use clap::{Parser, Subcommand};

use self::{evaluate::EvaluateArg, show_model::ShowModelArg, train::TrainArg};

mod evaluate;
mod show_model;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Train a population of networks with the genetic algorithm
    Train(#[clap(flatten)] TrainArg),
    /// Replay a saved individual over many headless games
    Evaluate(#[clap(flatten)] EvaluateArg),
    /// Print a saved individual's metadata
    ShowModel(#[clap(flatten)] ShowModelArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
        Mode::ShowModel(arg) => show_model::run(&arg)?,
    }
    Ok(())
}
