use crate::reports::{self, ReportFormat};
use clap::Args;
use pmse::config::EvalConfig;
use pmse::error::PmseResult;
use pmse::pipeline;

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub config: EvalConfig,

    #[arg(short, long, value_enum, default_value_t = ReportFormat::Plain)]
    pub format: ReportFormat,
}

pub fn run(config: &EvalConfig, format: ReportFormat) -> PmseResult<()> {
    let evaluation = pipeline::run(config)?;
    reports::print_summary(&evaluation.summary, format)
}
