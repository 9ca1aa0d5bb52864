use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use pmse::config::EvalConfig;
use pmse::error::PmseResult;
use reports::ReportFormat;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON file with evaluation settings; explicit flags take precedence
    #[arg(global = true, long)]
    config: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print mean/median PMSE and hit counts (the default)
    Evaluate(cmd::evaluate::EvaluateArgs),
    /// Print PMSE and hit per simulation
    Breakdown(cmd::breakdown::BreakdownArgs),
}

fn resolve_config(
    cli_config: &EvalConfig,
    config_path: Option<&PathBuf>,
    matches: &clap::ArgMatches,
) -> PmseResult<EvalConfig> {
    let Some(path) = config_path else {
        return Ok(cli_config.clone());
    };

    info!("⚖️  Loading settings from: {}", path.display());
    let mut config = EvalConfig::load_from_file(path)?;
    if let Some((_, sub_matches)) = matches.subcommand() {
        config.merge_from_cli(cli_config, sub_matches);
    }
    Ok(config)
}

fn execute(cli: Cli, matches: &clap::ArgMatches) -> PmseResult<()> {
    match cli.command {
        Some(Commands::Evaluate(args)) => {
            let config = resolve_config(&args.config, cli.config.as_ref(), matches)?;
            cmd::evaluate::run(&config, args.format)
        }
        Some(Commands::Breakdown(args)) => {
            let config = resolve_config(&args.config, cli.config.as_ref(), matches)?;
            cmd::breakdown::run(&config, args.csv)
        }
        None => {
            let config = resolve_config(&EvalConfig::default(), cli.config.as_ref(), matches)?;
            cmd::evaluate::run(&config, ReportFormat::Plain)
        }
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    if let Err(e) = execute(cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}
