use crate::reports;
use clap::Args;
use pmse::config::EvalConfig;
use pmse::error::PmseResult;
use pmse::pipeline;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub config: EvalConfig,

    /// Also write the per-simulation scores to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub fn run(config: &EvalConfig, csv: Option<PathBuf>) -> PmseResult<()> {
    let evaluation = pipeline::run(config)?;

    println!(
        "\n🔎 === PER-SIMULATION SCORES ({} probabilities) === 🔎",
        config.probabilities
    );
    reports::print_breakdown(&evaluation.scores);

    if let Some(path) = csv {
        reports::write_breakdown_csv(&path, &evaluation.scores)?;
        info!("💾 Wrote {} rows to {}", evaluation.scores.len(), path.display());
    }
    Ok(())
}
