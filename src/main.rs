mod error;
mod extract;
mod input;
mod logging;
mod record;
mod report;

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use crate::error::ExtractError;
use crate::extract::run_extract;
use crate::report::{RunSummary, ScoreFiles, write_summary_json};

/// Extracts per-rank top-k accuracy series and their averages from the
/// results file of an n-gram identifier-renaming evaluation.
#[derive(Debug, Parser)]
#[command(name = "topk-extract", version, about)]
struct Cli {
    /// Results file to read. Defaults to results_retrofit_<grams>_gram.txt.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory the score files are written to.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// N-gram order, used to derive the default file names.
    #[arg(long, default_value_t = 5)]
    grams: u32,

    /// Also write a machine-readable run summary to this path.
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), ExtractError> {
    let cli = Cli::parse();

    let input_path = cli
        .input
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_input_name(cli.grams)));

    info!("reading results from {}", input_path.display());
    let lines = input::read_result_lines(&input_path)?;

    let files = ScoreFiles::create(&cli.out, cli.grams)?;
    info!(
        "writing score files: {}",
        files
            .paths()
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let outcome = run_extract(&lines, files)?;
    info!(
        "done: {} valid record(s), {} skipped, {} trailing line(s) ignored",
        outcome.stats.records_valid, outcome.stats.records_skipped, outcome.stats.trailing_lines
    );

    if let Some(path) = &cli.summary_json {
        let summary = RunSummary {
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            input: input_path.display().to_string(),
            grams: cli.grams,
            records_total: outcome.stats.records_total,
            records_valid: outcome.stats.records_valid,
            records_skipped: outcome.stats.records_skipped,
            trailing_lines: outcome.stats.trailing_lines,
            averages: outcome.averages,
        };
        write_summary_json(path, &summary)?;
        info!("wrote run summary to {}", path.display());
    }

    Ok(())
}

fn default_input_name(grams: u32) -> String {
    format!("results_retrofit_{grams}_gram.txt")
}
