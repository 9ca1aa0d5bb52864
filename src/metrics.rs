use crate::config::ProbabilityMode;
use crate::error::{PmseError, PmseResult};
use crate::types::{Candidate, GroundTruth, Posterior, Variable, VARIABLE_COUNT};
use serde::Serialize;
use std::ops::AddAssign;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VariableScore {
    /// Value of the first listed candidate (not an argmax).
    pub top_prediction: f64,
    /// 1 if `top_prediction` is within tolerance of the truth, else 0.
    pub hit: u32,
    pub pmse: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationScore {
    pub index: usize,
    pub money: VariableScore,
    pub norm: VariableScore,
    pub gasp: VariableScore,
}

impl SimulationScore {
    pub fn get(&self, variable: Variable) -> &VariableScore {
        match variable {
            Variable::Money => &self.money,
            Variable::Norm => &self.norm,
            Variable::Gasp => &self.gasp,
        }
    }

    pub fn pmse_vector(&self) -> [f64; VARIABLE_COUNT] {
        [self.money.pmse, self.norm.pmse, self.gasp.pmse]
    }

    pub fn hit_vector(&self) -> [u32; VARIABLE_COUNT] {
        [self.money.hit, self.norm.hit, self.gasp.hit]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub truth_count: usize,
    pub posterior_count: usize,
    pub mean_pmse: [f64; VARIABLE_COUNT],
    pub median_pmse: [f64; VARIABLE_COUNT],
    pub hits: [u32; VARIABLE_COUNT],
}

impl Summary {
    pub fn counts_match(&self) -> bool {
        self.truth_count == self.posterior_count
    }
}

#[inline]
fn weight(candidate: &Candidate, variable: Variable, mode: ProbabilityMode) -> f64 {
    match mode {
        ProbabilityMode::Uniform => variable.uniform_weight(),
        ProbabilityMode::Parsed => candidate.probability,
    }
}

pub fn score_variable(
    truth: f64,
    candidates: &[Candidate],
    variable: Variable,
    mode: ProbabilityMode,
    tolerance: f64,
) -> PmseResult<VariableScore> {
    let top = candidates.first().ok_or_else(|| {
        PmseError::Validation(format!("no {} candidates to score", variable))
    })?;

    let hit = u32::from((top.value - truth).abs() <= tolerance);
    let pmse = candidates
        .iter()
        .map(|c| {
            let err = truth - c.value;
            weight(c, variable, mode) * err * err
        })
        .sum::<f64>();

    Ok(VariableScore {
        top_prediction: top.value,
        hit,
        pmse,
    })
}

pub fn score_simulation(
    index: usize,
    truth: &GroundTruth,
    posterior: &Posterior,
    mode: ProbabilityMode,
    tolerance: f64,
) -> PmseResult<SimulationScore> {
    let score = |v: Variable| {
        score_variable(truth.value(v), posterior.candidates(v), v, mode, tolerance)
    };

    Ok(SimulationScore {
        index,
        money: score(Variable::Money)?,
        norm: score(Variable::Norm)?,
        gasp: score(Variable::Gasp)?,
    })
}

/// Scores ground truth against posteriors pairwise, by position. Extra
/// entries on either side are dropped.
pub fn score_all(
    truths: &[GroundTruth],
    posteriors: &[Posterior],
    mode: ProbabilityMode,
    tolerance: f64,
) -> PmseResult<Vec<SimulationScore>> {
    if truths.len() != posteriors.len() {
        warn!(
            "⚠️  Ground truth has {} simulations but results file has {}; scoring the first {}",
            truths.len(),
            posteriors.len(),
            truths.len().min(posteriors.len())
        );
    }

    truths
        .iter()
        .zip(posteriors)
        .enumerate()
        .map(|(i, (truth, post))| score_simulation(i, truth, post, mode, tolerance))
        .collect()
}

pub fn sum_element_wise<T, const N: usize, I>(rows: I) -> [T; N]
where
    T: Copy + Default + AddAssign,
    I: IntoIterator<Item = [T; N]>,
{
    let mut acc = [T::default(); N];
    for row in rows {
        for (a, x) in acc.iter_mut().zip(row) {
            *a += x;
        }
    }
    acc
}

/// Statistical median: the middle value, or the mean of the two middle
/// values for an even count. `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

pub fn summarize(
    truth_count: usize,
    posterior_count: usize,
    scores: &[SimulationScore],
) -> PmseResult<Summary> {
    if scores.is_empty() {
        return Err(PmseError::Validation(
            "no simulations to aggregate".to_string(),
        ));
    }

    let n = scores.len() as f64;
    let pmse_sums = sum_element_wise(scores.iter().map(SimulationScore::pmse_vector));
    let mean_pmse = pmse_sums.map(|s| s / n);

    let mut median_pmse = [0.0; VARIABLE_COUNT];
    for variable in Variable::iter() {
        let column: Vec<f64> = scores.iter().map(|s| s.get(variable).pmse).collect();
        median_pmse[variable.index()] = median(&column).unwrap_or_default();
    }

    let hits = sum_element_wise(scores.iter().map(SimulationScore::hit_vector));

    debug!(
        "Aggregated {} simulations: mean={:?} median={:?} hits={:?}",
        scores.len(),
        mean_pmse,
        median_pmse,
        hits
    );

    Ok(Summary {
        truth_count,
        posterior_count,
        mean_pmse,
        median_pmse,
        hits,
    })
}
