//! Per-sheet and per-file mapping reports.

use hmap_map::HeaderMatcher;
use hmap_model::{MappingAction, MappingResult, SheetHeaders};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One mapped header, optionally with its ranked alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderMapping {
    #[serde(flatten)]
    pub result: MappingResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<MappingResult>>,
}

impl From<MappingResult> for HeaderMapping {
    fn from(result: MappingResult) -> Self {
        Self {
            result,
            candidates: None,
        }
    }
}

/// Action counts for one sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetSummary {
    pub auto_mapped: usize,
    pub needs_review: usize,
    pub needs_manual: usize,
    pub auto_mapped_percentage: f64,
    pub needs_review_percentage: f64,
    pub needs_manual_percentage: f64,
}

impl SheetSummary {
    pub fn from_mappings(mappings: &[HeaderMapping]) -> Self {
        let mut summary = Self::default();
        for mapping in mappings {
            match mapping.result.recommended_action {
                MappingAction::AutoMap => summary.auto_mapped += 1,
                MappingAction::Review => summary.needs_review += 1,
                MappingAction::ManualMap => summary.needs_manual += 1,
            }
        }
        let total = mappings.len();
        summary.auto_mapped_percentage = percentage(summary.auto_mapped, total);
        summary.needs_review_percentage = percentage(summary.needs_review, total);
        summary.needs_manual_percentage = percentage(summary.needs_manual, total);
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetReport {
    pub sheet_name: String,
    pub header_row_count: usize,
    pub total_columns: usize,
    pub mappings: Vec<HeaderMapping>,
    pub summary: SheetSummary,
}

impl SheetReport {
    pub fn new(sheet: &SheetHeaders, mappings: Vec<HeaderMapping>) -> Self {
        let summary = SheetSummary::from_mappings(&mappings);
        Self {
            sheet_name: sheet.sheet_name.clone(),
            header_row_count: sheet.header_row_count,
            total_columns: sheet.headers.len(),
            mappings,
            summary,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallSummary {
    pub total_sheets: usize,
    pub total_headers: usize,
    pub total_auto_mapped: usize,
    pub total_needs_review: usize,
    pub total_needs_manual: usize,
}

impl OverallSummary {
    pub fn from_sheets(sheets: &[SheetReport]) -> Self {
        sheets.iter().fold(
            Self {
                total_sheets: sheets.len(),
                ..Self::default()
            },
            |mut acc, sheet| {
                acc.total_headers += sheet.total_columns;
                acc.total_auto_mapped += sheet.summary.auto_mapped;
                acc.total_needs_review += sheet.summary.needs_review;
                acc.total_needs_manual += sheet.summary.needs_manual;
                acc
            },
        )
    }
}

/// Mapping report for one input workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub file_path: String,
    pub sheets: Vec<SheetReport>,
    pub overall_summary: OverallSummary,
}

impl FileReport {
    pub fn new(file_path: impl Into<String>, sheets: Vec<SheetReport>) -> Self {
        let overall_summary = OverallSummary::from_sheets(&sheets);
        Self {
            file_path: file_path.into(),
            sheets,
            overall_summary,
        }
    }
}

/// Maps every header of `sheet` and summarizes the outcome.
///
/// With `candidates > 0` each mapping also carries up to that many ranked
/// alternatives from [`HeaderMatcher::get_top_matches`].
pub fn map_sheet(
    matcher: &HeaderMatcher<'_>,
    sheet: &SheetHeaders,
    candidates: usize,
) -> SheetReport {
    let mappings: Vec<HeaderMapping> = sheet
        .headers
        .iter()
        .map(|header| HeaderMapping {
            result: matcher.map_single_header(header),
            candidates: (candidates > 0).then(|| matcher.get_top_matches(header, candidates)),
        })
        .collect();
    let report = SheetReport::new(sheet, mappings);
    debug!(
        sheet = %report.sheet_name,
        auto_mapped = report.summary.auto_mapped,
        needs_review = report.summary.needs_review,
        needs_manual = report.summary.needs_manual,
        "mapped sheet"
    );
    report
}

/// Maps all sheets of one workbook into a [`FileReport`].
pub fn build_file_report(
    file_path: impl Into<String>,
    sheets: &[SheetHeaders],
    matcher: &HeaderMatcher<'_>,
    candidates: usize,
) -> FileReport {
    let reports = sheets
        .iter()
        .map(|sheet| map_sheet(matcher, sheet, candidates))
        .collect();
    let report = FileReport::new(file_path, reports);
    info!(
        sheets = report.overall_summary.total_sheets,
        headers = report.overall_summary.total_headers,
        "built mapping report"
    );
    report
}

/// Share of `count` in `total` as a percentage rounded to two decimals,
/// halves to even.
///
/// Zero when `total` is zero.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let value = count as f64 / total as f64 * 100.0;
    (value * 100.0).round_ties_even() / 100.0
}
