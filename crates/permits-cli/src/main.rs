mod cmd;
mod output;
mod prompt;
mod settings;

use clap::Parser;
use cmd::analyze::Outcome;
use settings::{parse_cli_date, RunSettings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "permits",
    about = "Attendance permission analyzer: late arrivals and early leaves from a time-tracking CSV export",
    version
)]
pub struct Cli {
    /// Attendance CSV export (omit to be prompted interactively)
    pub path: Option<PathBuf>,

    /// First date to include, inclusive (dd/mm/yyyy)
    #[arg(long, value_parser = parse_cli_date)]
    pub from: Option<chrono::NaiveDate>,

    /// Last date to include, inclusive (dd/mm/yyyy)
    #[arg(long, value_parser = parse_cli_date)]
    pub to: Option<chrono::NaiveDate>,

    /// Print the results table to the terminal
    #[arg(long)]
    pub print: bool,

    /// Save the results to a spreadsheet
    #[arg(long)]
    pub export: bool,

    /// Spreadsheet path (default: Permissions.xlsx, or `output` from the config)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Skip rows with malformed dates or times and report them instead of aborting
    #[arg(long)]
    pub skip_bad_rows: bool,

    /// Input text encoding (default: windows-1256, or `encoding` from the config)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Config file (default: ./permits.yaml when present)
    #[arg(long, env = "PERMITS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, short = 'j')]
    pub json: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let stdin = std::io::stdin();
    let mut prompter = prompt::Prompter::new(stdin.lock(), std::io::stdout());
    let result = RunSettings::gather(&cli, &mut prompter).and_then(|settings| match settings {
        Some(settings) => cmd::analyze::run(&settings, &mut prompter),
        None => Ok(Outcome::MissingFile),
    });

    match result {
        Ok(outcome) => tracing::debug!(?outcome, "run finished"),
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
