//! Spreadsheet grid reading backed by calamine.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{Data, Dimensions, Range, Reader, Sheets, open_workbook_auto};
use hmap_model::{CellValue, HeaderGrid, MergedSpan, SheetHeaders};
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::headers::extract_sheet_headers;

/// Text form of date cells.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of raw sheet grids.
pub trait HeaderGridReader {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// The full grid of one sheet, anchored at its first row and column.
    fn read_grid(&mut self, sheet_name: &str) -> Result<HeaderGrid>;
}

/// Workbook reader for `.xlsx`, `.xlsm`, `.xlsb`, `.xls` and `.ods` files.
pub struct WorkbookReader {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
    supports_merged_cells: bool,
}

impl WorkbookReader {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(IngestError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let supports_merged_cells = match &mut workbook {
            Sheets::Xlsx(xlsx) => {
                xlsx.load_merged_regions().map_err(|e| IngestError::Workbook {
                    path: path.to_path_buf(),
                    message: format!("failed to load merged regions: {e}"),
                })?;
                true
            }
            _ => false,
        };

        info!(
            path = %path.display(),
            sheets = workbook.sheet_names().len(),
            supports_merged_cells,
            "opened workbook"
        );
        Ok(Self {
            path: path.to_path_buf(),
            workbook,
            supports_merged_cells,
        })
    }

    fn merged_spans(&self, sheet_name: &str) -> Option<Vec<MergedSpan>> {
        if !self.supports_merged_cells {
            return None;
        }
        let Sheets::Xlsx(xlsx) = &self.workbook else {
            return None;
        };
        let spans = xlsx
            .merged_regions_by_sheet(sheet_name)
            .into_iter()
            .map(|(_, _, dims)| span_from_dimensions(dims))
            .collect();
        Some(spans)
    }
}

impl HeaderGridReader for WorkbookReader {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn read_grid(&mut self, sheet_name: &str) -> Result<HeaderGrid> {
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(|e| IngestError::Workbook {
                path: self.path.clone(),
                message: format!("sheet '{sheet_name}': {e}"),
            })?;
        let rows = grid_rows(&range);
        debug!(sheet = sheet_name, rows = rows.len(), "read sheet grid");
        let grid = HeaderGrid::new(rows);
        Ok(match self.merged_spans(sheet_name) {
            Some(spans) => grid.with_merged_spans(spans),
            None => grid,
        })
    }
}

/// Reads every sheet and extracts its headers, in workbook order.
pub fn extract_headers<R: HeaderGridReader>(reader: &mut R) -> Result<Vec<SheetHeaders>> {
    let mut sheets = Vec::new();
    for sheet_name in reader.sheet_names() {
        let grid = reader.read_grid(&sheet_name)?;
        sheets.push(extract_sheet_headers(&sheet_name, &grid));
    }
    Ok(sheets)
}

/// Rows of `range` re-anchored at A1.
///
/// calamine ranges start at the first used cell; leading blank rows and
/// columns are restored as empty cells so positions match the sheet.
fn grid_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((last_row, last_col)) = range.end() else {
        return Vec::new();
    };
    (0..=last_row)
        .map(|row| {
            (0..=last_col)
                .map(|col| {
                    range
                        .get_value((row, col))
                        .map(convert_cell)
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}

fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => CellValue::Float(*value),
        Data::String(value) if value.is_empty() => CellValue::Empty,
        Data::String(value) => CellValue::Text(value.clone()),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(value) => CellValue::DateTime(
            value
                .as_datetime()
                .map(|dt| dt.format(DATETIME_FORMAT).to_string())
                .unwrap_or_else(|| value.to_string()),
        ),
        Data::DateTimeIso(value) | Data::DurationIso(value) => CellValue::DateTime(value.clone()),
        Data::Error(error) => CellValue::Error(error.to_string()),
    }
}

fn span_from_dimensions(dims: &Dimensions) -> MergedSpan {
    MergedSpan::new(
        dims.start.0 as usize,
        dims.start.1 as usize,
        dims.end.0 as usize,
        dims.end.1 as usize,
    )
}
