use crate::config::EvalConfig;
use crate::error::PmseResult;
use crate::loader::{load_all_ground_truth, load_posteriors};
use crate::metrics::{score_all, summarize, SimulationScore, Summary};
use crate::types::{GroundTruth, Posterior};
use tracing::info;

/// Everything produced by one pass over the dataset.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub truths: Vec<GroundTruth>,
    pub posteriors: Vec<Posterior>,
    pub scores: Vec<SimulationScore>,
    pub summary: Summary,
}

pub fn evaluate(
    config: &EvalConfig,
    truths: Vec<GroundTruth>,
    posteriors: Vec<Posterior>,
) -> PmseResult<Evaluation> {
    let scores = score_all(&truths, &posteriors, config.probabilities, config.tolerance)?;
    let summary = summarize(truths.len(), posteriors.len(), &scores)?;

    Ok(Evaluation {
        truths,
        posteriors,
        scores,
        summary,
    })
}

pub fn run(config: &EvalConfig) -> PmseResult<Evaluation> {
    config.validate()?;

    info!(
        "📂 Loading {} simulations from: {}",
        config.sim_count,
        config.data_dir.display()
    );
    let truths = load_all_ground_truth(config)?;

    info!("📂 Loading posteriors from: {}", config.results.display());
    let posteriors = load_posteriors(&config.results, config.header_lines)?;

    info!(
        "⚖️  Scoring with {} probabilities, tolerance {}",
        config.probabilities, config.tolerance
    );
    evaluate(config, truths, posteriors)
}
