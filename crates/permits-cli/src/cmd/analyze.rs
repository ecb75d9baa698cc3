use crate::output::{write_json, write_lines};
use crate::prompt::Prompter;
use crate::settings::{OutputSelection, RunSettings};
use anyhow::Context;
use permits_core::{
    export::write_workbook,
    format::table_lines,
    load::{read_records, RowIssue},
    permission::{extract, summarize, PermissionEntry, Summary},
};
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    MissingFile,
    NoResults,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: Summary,
    entries: &'a [PermissionEntry],
    issues: &'a [RowIssue],
}

pub fn run<R: BufRead, W: Write>(
    settings: &RunSettings,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<Outcome> {
    let report = read_records(&settings.input, &settings.load)
        .with_context(|| format!("failed to read '{}'", settings.input.display()))?;

    for issue in &report.issues {
        eprintln!("[!] skipped line {}: {}", issue.line, issue.message);
    }

    let entries = extract(
        &report.records,
        &settings.load.range,
        &settings.config.workday,
    );
    for entry in &entries {
        debug!(line = entry.line, kind = ?entry.kind, minutes = entry.minutes, "permission");
    }
    let summary = summarize(&entries);
    info!(
        records = report.records.len(),
        filtered = settings.load.range.is_bounded(),
        entries = summary.entries,
        minutes = summary.total_minutes,
        "permissions extracted"
    );

    if entries.is_empty() {
        if settings.json {
            write_json(
                prompter.out(),
                &JsonReport {
                    summary,
                    entries: &entries,
                    issues: &report.issues,
                },
            )?;
        } else {
            writeln!(prompter.out(), "\n[!] No results found.")?;
        }
        return Ok(Outcome::NoResults);
    }

    let print = match settings.outputs {
        OutputSelection::Fixed { print, .. } => print,
        OutputSelection::Ask => prompter.confirm("\nShow results in terminal?")?,
    };
    if print {
        if settings.json {
            write_json(
                prompter.out(),
                &JsonReport {
                    summary: summary.clone(),
                    entries: &entries,
                    issues: &report.issues,
                },
            )?;
        } else {
            let out = prompter.out();
            writeln!(out)?;
            write_lines(out, &table_lines(&entries))?;
            writeln!(
                out,
                "\nTotal: {} permissions ({} late arrivals, {} early leaves), {} minutes",
                summary.entries, summary.late_arrivals, summary.early_leaves, summary.total_minutes
            )?;
        }
    }

    let export = match settings.outputs {
        OutputSelection::Fixed { export, .. } => export,
        OutputSelection::Ask => prompter.confirm("\nSave results to Excel file?")?,
    };
    if export {
        let path = &settings.config.output;
        write_workbook(path, &entries)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        if !settings.json {
            writeln!(prompter.out(), "\nFile saved as: {}", path.display())?;
        }
    }

    if !settings.json {
        writeln!(prompter.out(), "\nAnalysis completed successfully.")?;
    }
    Ok(Outcome::Completed)
}
