//! Sequential driver: retrieve both sources, reconcile, merge, clean, persist.
//!
//! Each phase returns its own result so the caller decides whether to move
//! on. A retrieval failure stops the run before anything is transformed or
//! written; a persistence failure discards the merged table.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::roster::tools::clean::{CleaningReport, clean_fields};
use crate::roster::tools::config::RunConfig;
use crate::roster::tools::error::{Result, ToolError};
use crate::roster::tools::io::excel_read;
use crate::roster::tools::io::excel_write;
use crate::roster::tools::io::fetch::{Fetcher, Source};
use crate::roster::tools::model::Table;
use crate::roster::tools::reconcile::{ReconciledTable, add_expected_columns, merge};

/// Per-source summary of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSummary {
    pub location: String,
    pub rows: usize,
    pub added_columns: Vec<String>,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub sources: Vec<SourceSummary>,
    pub merged_rows: usize,
    pub merged_columns: Vec<String>,
    pub cleaning: CleaningReport,
    pub output: String,
}

/// Milestones reported to the caller while a run progresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'a> {
    /// Both sources were retrieved and decoded.
    Loaded,
    /// The combined workbook was written to the given path.
    Saved(&'a Path),
}

/// Outcome of the in-memory phases.
#[derive(Debug)]
pub struct Transformed {
    pub table: ReconciledTable,
    pub added_columns: [Vec<String>; 2],
    pub cleaning: CleaningReport,
}

/// Loads and decodes one source.
pub fn load(fetcher: &Fetcher, source: &Source) -> Result<Table> {
    fetcher
        .fetch(source)
        .and_then(|bytes| excel_read::read_table(&bytes))
        .map_err(|error| ToolError::retrieval(source.to_string(), error))
}

/// Loads both sources one after the other. The second source is not
/// touched if the first fails.
#[instrument(level = "info", skip_all)]
pub fn retrieve(fetcher: &Fetcher, sources: &[Source; 2]) -> Result<[Table; 2]> {
    let first = load(fetcher, &sources[0])?;
    let second = load(fetcher, &sources[1])?;
    info!(
        first_rows = first.row_count(),
        second_rows = second.row_count(),
        "sources loaded"
    );
    Ok([first, second])
}

/// Reconciles each table, merges them, and cleans the result.
#[instrument(level = "info", skip_all)]
pub fn transform(first: Table, second: Table) -> Result<Transformed> {
    let (first, first_added) = add_expected_columns(first);
    let (second, second_added) = add_expected_columns(second);

    let mut table = merge(first, second);
    let cleaning = clean_fields(&mut table)?;
    info!(rows = table.table().row_count(), "tables combined");

    Ok(Transformed {
        table,
        added_columns: [first_added, second_added],
        cleaning,
    })
}

/// Writes the combined table.
pub fn persist(table: &ReconciledTable, output: &Path) -> Result<()> {
    excel_write::write_table(output, table.table())
        .map_err(|error| ToolError::persistence(output, error))
}

/// Runs every phase with the given configuration, calling `progress` as
/// each milestone is reached. Failing to write the optional run report is
/// logged and does not fail the run.
#[instrument(level = "info", skip_all, fields(output = %config.output.display()))]
pub fn run(config: &RunConfig, mut progress: impl FnMut(Progress<'_>)) -> Result<RunReport> {
    let fetcher = Fetcher::new(config.timeout)
        .map_err(|error| ToolError::retrieval("HTTP client", error))?;
    let [first, second] = retrieve(&fetcher, &config.sources)?;
    progress(Progress::Loaded);
    let source_rows = [first.row_count(), second.row_count()];

    let transformed = transform(first, second)?;
    persist(&transformed.table, &config.output)?;
    progress(Progress::Saved(&config.output));

    let table = transformed.table.table();
    let report = RunReport {
        sources: config
            .sources
            .iter()
            .zip(source_rows)
            .zip(transformed.added_columns)
            .map(|((source, rows), added_columns)| SourceSummary {
                location: source.to_string(),
                rows,
                added_columns,
            })
            .collect(),
        merged_rows: table.row_count(),
        merged_columns: table.columns().to_vec(),
        cleaning: transformed.cleaning,
        output: config.output.display().to_string(),
    };

    // The workbook is already saved; a missing summary does not fail the run.
    if let Some(path) = &config.report {
        if let Err(error) = write_report(path, &report) {
            warn!(path = %path.display(), %error, "run report not written");
        }
    }

    Ok(report)
}

/// Serialises the run report as pretty-printed JSON.
pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}
