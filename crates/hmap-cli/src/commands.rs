use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use hmap_cli::pipeline::{load_schema, map_workbook, output, resolve_config};
use hmap_ingest::WorkbookReader;
use hmap_map::HeaderMatcher;
use hmap_report::default_output_path;

use crate::cli::Cli;
use crate::types::MapRunResult;

pub fn run_map(cli: &Cli) -> Result<MapRunResult> {
    let input = &cli.input;
    let run_span = info_span!("map", input = %input.display());
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let schema = info_span!("schema").in_scope(|| load_schema(&cli.schema_dir))?;
    info!(columns = schema.len(), "loaded canonical schema");

    let config = resolve_config(cli.config.as_deref(), cli.fuzzy_min)?;
    let matcher = HeaderMatcher::new(&schema, &config).context("build header matcher")?;

    let mut reader = WorkbookReader::open(input).context("open input workbook")?;
    let report = info_span!("extract_and_map").in_scope(|| {
        map_workbook(&mut reader, &display_path(input), &matcher, cli.candidates)
    })?;

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&absolute_or_given(input)));
    let output_path = output(&report, &output_path)?;

    info!(
        headers = report.overall_summary.total_headers,
        sheets = report.overall_summary.total_sheets,
        duration_ms = start.elapsed().as_millis(),
        "mapping complete"
    );
    Ok(MapRunResult {
        input: input.clone(),
        output_path,
        schema_columns: schema.len(),
        report,
    })
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn absolute_or_given(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
