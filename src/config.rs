use crate::error::{PmseError, PmseResult};
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum_macros::Display;

pub const SIM_INDEX_PLACEHOLDER: &str = "{i}";

/// Which probability weights feed the PMSE sum.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProbabilityMode {
    /// Fixed per-variable weights (1/6, 1/5, 1/4), ignoring the inferred values.
    #[default]
    Uniform,
    /// Probabilities exactly as written in the results file.
    Parsed,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Directory holding the per-simulation ground-truth files
    #[arg(long, default_value = "examples/tipping/data/generatedData15r")]
    pub data_dir: PathBuf,

    /// Number of simulations to read (indices 0..N)
    #[arg(long, default_value_t = 10)]
    pub sim_count: usize,

    /// File name pattern, `{i}` is replaced with the simulation index
    #[arg(long, default_value = "simulation{i}.txt")]
    pub sim_pattern: String,

    /// Combined inference results file
    #[arg(long, default_value = "examples/tipping/results/generatedInfer15r.txt")]
    pub results: PathBuf,

    /// Leading lines of the results file skipped before scanning
    #[arg(long, default_value_t = 3)]
    pub header_lines: usize,

    /// Max distance between top prediction and truth that counts as a hit
    #[arg(long, default_value_t = 0.1)]
    pub tolerance: f64,

    #[arg(long, value_enum, default_value_t = ProbabilityMode::Uniform)]
    pub probabilities: ProbabilityMode,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("examples/tipping/data/generatedData15r"),
            sim_count: 10,
            sim_pattern: "simulation{i}.txt".to_string(),
            results: PathBuf::from("examples/tipping/results/generatedInfer15r.txt"),
            header_lines: 3,
            tolerance: 0.1,
            probabilities: ProbabilityMode::Uniform,
        }
    }
}

impl EvalConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PmseResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PmseError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies every option the user typed explicitly onto `self`, leaving
    /// file-provided values in place for options that fell back to defaults.
    pub fn merge_from_cli(&mut self, cli: &EvalConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(data_dir);
        update_if_present!(sim_count);
        update_if_present!(sim_pattern);
        update_if_present!(results);
        update_if_present!(header_lines);
        update_if_present!(tolerance);
        update_if_present!(probabilities);
    }

    pub fn validate(&self) -> PmseResult<()> {
        if !self.sim_pattern.contains(SIM_INDEX_PLACEHOLDER) {
            return Err(PmseError::Config(format!(
                "--sim-pattern '{}' must contain '{}'",
                self.sim_pattern, SIM_INDEX_PLACEHOLDER
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(PmseError::Config(format!(
                "--tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    pub fn simulation_path(&self, index: usize) -> PathBuf {
        let name = self
            .sim_pattern
            .replace(SIM_INDEX_PLACEHOLDER, &index.to_string());
        self.data_dir.join(name)
    }

    pub fn simulation_paths(&self) -> Vec<PathBuf> {
        (0..self.sim_count).map(|i| self.simulation_path(i)).collect()
    }
}
