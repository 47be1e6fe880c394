//! Header mapping pipeline with explicit stages.
//!
//! 1. **Schema**: load the canonical schema directory
//! 2. **Config**: resolve and validate matching thresholds
//! 3. **Extract**: read sheet grids and detect headers
//! 4. **Map**: match every header and build the report
//! 5. **Output**: write the JSON report

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use hmap_ingest::{HeaderGridReader, extract_headers, load_schema_dir};
use hmap_map::HeaderMatcher;
use hmap_model::{ColumnSchemaStore, MatchingConfig, SheetHeaders};
use hmap_report::{FileReport, build_file_report, write_report};

/// Fuzzy floor used when neither `--fuzzy-min` nor a config file sets one.
pub const CLI_DEFAULT_FUZZY_MIN: u32 = 20;

// ============================================================================
// Stage 1: Schema
// ============================================================================

pub fn load_schema(schema_dir: &Path) -> Result<ColumnSchemaStore> {
    let schema = load_schema_dir(schema_dir)
        .with_context(|| format!("load schema from {}", schema_dir.display()))?;
    if schema.is_empty() {
        warn!(dir = %schema_dir.display(), "schema directory defines no columns");
    }
    Ok(schema)
}

// ============================================================================
// Stage 2: Config
// ============================================================================

/// Builds the matching configuration.
///
/// A config file supplies every threshold; without one the defaults apply
/// with a fuzzy floor of [`CLI_DEFAULT_FUZZY_MIN`]. `fuzzy_min` overrides
/// the floor in both cases.
pub fn resolve_config(
    config_path: Option<&Path>,
    fuzzy_min: Option<u32>,
) -> Result<MatchingConfig> {
    let mut config = match config_path {
        Some(path) => MatchingConfig::from_toml_file(path)
            .with_context(|| format!("load matching config {}", path.display()))?,
        None => MatchingConfig::default().with_fuzzy_min_threshold(CLI_DEFAULT_FUZZY_MIN),
    };
    if let Some(threshold) = fuzzy_min {
        config = config.with_fuzzy_min_threshold(threshold);
    }
    config.validate().context("invalid matching config")?;
    Ok(config)
}

// ============================================================================
// Stages 3-4: Extract and map
// ============================================================================

/// Extracts the headers of every sheet and maps them.
pub fn map_workbook<R: HeaderGridReader>(
    reader: &mut R,
    file_path: &str,
    matcher: &HeaderMatcher<'_>,
    candidates: usize,
) -> Result<FileReport> {
    let sheets: Vec<SheetHeaders> = extract_headers(reader).context("extract headers")?;
    info!(sheets = sheets.len(), "extracted sheet headers");
    Ok(build_file_report(file_path, &sheets, matcher, candidates))
}

// ============================================================================
// Stage 5: Output
// ============================================================================

pub fn output(report: &FileReport, path: &Path) -> Result<PathBuf> {
    write_report(report, path)?;
    Ok(path.to_path_buf())
}
