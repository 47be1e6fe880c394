//! Multi-row header detection and merging.
//!
//! Sheets often carry more than one header row, for example a unit or
//! category row above the column names. The detector looks at the top of
//! the grid to decide where data starts, then stacks the header cells of
//! each column into one header string.

use hmap_model::{HeaderGrid, SheetHeaders};
use tracing::debug;

/// Only this many leading rows are inspected when looking for data.
pub const MAX_HEADER_SCAN_ROWS: usize = 5;

/// A row is data once its non-empty cells exceed this share of the width.
pub const DATA_ROW_FILL_RATIO: f64 = 0.3;

/// Number of leading rows that make up the header block.
///
/// Scans at most [`MAX_HEADER_SCAN_ROWS`] rows. The first row holding a
/// numeric cell with more than [`DATA_ROW_FILL_RATIO`] of the columns
/// filled is the first data row. Rows with text before it extend the header
/// block through that row; blank rows leave it unchanged. The count is at
/// least 1 for any non-empty grid and 0 for an empty one.
pub fn detect_header_row_count(grid: &HeaderGrid) -> usize {
    if grid.is_empty() {
        return 0;
    }
    let width = grid.width();
    let mut header_rows = 0;

    for (row_idx, row) in grid.rows.iter().take(MAX_HEADER_SCAN_ROWS).enumerate() {
        let non_empty = row.iter().filter(|cell| !cell.is_empty()).count();
        let has_numeric = row.iter().any(|cell| cell.is_numeric());
        let has_text = row.iter().any(|cell| cell.has_text());

        if has_numeric && non_empty as f64 > width as f64 * DATA_ROW_FILL_RATIO {
            header_rows = row_idx;
            break;
        }
        if has_text {
            header_rows = row_idx + 1;
        }
    }

    header_rows.max(1)
}

/// Header string for `column`, built from the first `header_row_count` rows.
///
/// Cells inside a merged span take the text of the span's top-left cell.
/// Non-empty trimmed texts are joined top to bottom with single spaces.
pub fn build_merged_header(grid: &HeaderGrid, header_row_count: usize, column: usize) -> String {
    let mut parts = Vec::new();
    for row in 0..header_row_count.min(grid.height()) {
        let cell = match grid.merged_span_at(row, column) {
            Some(span) => grid.cell(span.first_row, span.first_col),
            None => grid.cell(row, column),
        };
        let text = cell.to_string();
        let text = text.trim();
        if !text.is_empty() {
            parts.push(text.to_string());
        }
    }
    parts.join(" ")
}

/// Detects the header block of one sheet and builds its header list.
///
/// Columns whose merged header is blank are dropped, so positions in
/// `headers` need not match grid column indices.
pub fn extract_sheet_headers(sheet_name: &str, grid: &HeaderGrid) -> SheetHeaders {
    if grid.is_empty() {
        debug!(sheet = sheet_name, "empty sheet");
        return SheetHeaders::empty(sheet_name);
    }
    let header_row_count = detect_header_row_count(grid);
    let headers: Vec<String> = (0..grid.width())
        .map(|column| build_merged_header(grid, header_row_count, column))
        .filter(|header| !header.trim().is_empty())
        .collect();
    debug!(
        sheet = sheet_name,
        header_row_count,
        columns = grid.width(),
        headers = headers.len(),
        "detected sheet headers"
    );
    SheetHeaders {
        sheet_name: sheet_name.to_string(),
        headers,
        header_row_count,
    }
}
