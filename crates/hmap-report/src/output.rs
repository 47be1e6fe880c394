//! JSON report output.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::report::FileReport;

/// Default report location: `<stem>_mapping_result.json` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let file_name = format!("{stem}_mapping_result.json");
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Serializes `report` as pretty JSON.
pub fn report_to_json(report: &FileReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize mapping report")
}

/// Writes `report` to `path`, replacing any existing file.
pub fn write_report(report: &FileReport, path: &Path) -> Result<()> {
    let json = report_to_json(report)?;
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("write mapping report to {}", path.display()))?;
    info!(path = %path.display(), "wrote mapping report");
    Ok(())
}
