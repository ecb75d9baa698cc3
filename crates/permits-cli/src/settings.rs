use crate::prompt::Prompter;
use crate::Cli;
use anyhow::Context;
use chrono::NaiveDate;
use permits_core::{
    config::Config,
    load::{LoadOptions, RowPolicy},
    range::DateRange,
    record::parse_date,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const MISSING_FILE_MESSAGE: &str = "[!] File does not exist.";

/// clap value parser for `--from` / `--to`.
pub fn parse_cli_date(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("expected a dd/mm/yyyy date, got '{value}'"))
}

/// Which outputs to produce once results exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSelection {
    /// Decided up front on the command line.
    Fixed { print: bool, export: bool },
    /// Ask after processing, only when there is something to show.
    Ask,
}

/// Everything a run needs, fixed before the attendance file is processed.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub input: PathBuf,
    pub load: LoadOptions,
    pub config: Config,
    pub outputs: OutputSelection,
    pub json: bool,
}

impl RunSettings {
    /// Build settings from flags, prompting for whatever the command line left out.
    /// `Ok(None)` means the session ended early and the user was already told why.
    /// The input file is checked before the date range or config file is looked at.
    pub fn gather<R: BufRead, W: Write>(
        cli: &Cli,
        prompter: &mut Prompter<R, W>,
    ) -> anyhow::Result<Option<Self>> {
        let (input, range, outputs) = match &cli.path {
            Some(path) => {
                if !path.is_file() {
                    writeln!(prompter.out(), "{MISSING_FILE_MESSAGE}")?;
                    return Ok(None);
                }
                let range = DateRange::new(cli.from, cli.to)?;
                // Terminal output is the default unless only an export was asked for.
                let print = cli.print || cli.json || !cli.export;
                let outputs = OutputSelection::Fixed {
                    print,
                    export: cli.export,
                };
                (path.clone(), range, outputs)
            }
            None => {
                writeln!(prompter.out(), "\nAttendance Permission Analyzer")?;
                let Some(path) = prompter.ask("\nEnter CSV file name (with extension): ")? else {
                    anyhow::bail!("no input file given");
                };
                let path = PathBuf::from(path);
                if !path.is_file() {
                    writeln!(prompter.out(), "{MISSING_FILE_MESSAGE}")?;
                    return Ok(None);
                }
                let range = if prompter.confirm("\nDo you want to filter by date range?")? {
                    let start = prompter.ask_date("Start date (e.g., 01/05/2025): ")?;
                    let end = prompter.ask_date("End date (e.g., 31/05/2025): ")?;
                    DateRange::new(Some(start), Some(end))?
                } else {
                    DateRange::new(cli.from, cli.to)?
                };
                (path, range, OutputSelection::Ask)
            }
        };

        let cwd = std::env::current_dir().context("failed to read current directory")?;
        let mut config =
            Config::resolve(cli.config.as_deref(), &cwd).context("failed to load config")?;
        if let Some(encoding) = &cli.encoding {
            config.encoding = encoding.clone();
        }
        if let Some(output) = &cli.output {
            config.output = output.clone();
        }
        let policy = if cli.skip_bad_rows {
            RowPolicy::Skip
        } else {
            RowPolicy::Abort
        };

        Ok(Some(Self {
            input,
            load: LoadOptions::from_config(&config, range, policy),
            config,
            outputs,
            json: cli.json,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_date_parser() {
        assert_eq!(
            parse_cli_date("31/05/2025").unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()
        );
        assert!(parse_cli_date("2025-05-31").unwrap_err().contains("dd/mm/yyyy"));
    }
}
