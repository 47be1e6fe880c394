//! Raw sheet grids and the headers extracted from them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single raw cell value as supplied by a grid reader.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    /// Date, time or duration, kept in its rendered form.
    DateTime(String),
    Text(String),
    Bool(bool),
    /// Spreadsheet error value such as `#DIV/0!`.
    Error(String),
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Integer, floating-point and date/time cells count as numeric.
    ///
    /// Strings that look numeric are still text.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_) | Self::DateTime(_))
    }

    /// Non-empty textual content once trimmed.
    ///
    /// Booleans and error values are classified as text.
    pub fn has_text(&self) -> bool {
        match self {
            Self::Text(value) | Self::Error(value) => !value.trim().is_empty(),
            Self::Bool(_) => true,
            Self::Empty | Self::Int(_) | Self::Float(_) | Self::DateTime(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => {
                if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
                    write!(f, "{value:.1}")
                } else {
                    write!(f, "{value}")
                }
            }
            Self::DateTime(value) | Self::Text(value) | Self::Error(value) => f.write_str(value),
            Self::Bool(value) => f.write_str(if *value { "True" } else { "False" }),
        }
    }
}

/// A rectangular group of cells sharing the value of its top-left cell.
///
/// Bounds are zero-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedSpan {
    pub first_row: usize,
    pub first_col: usize,
    pub last_row: usize,
    pub last_col: usize,
}

impl MergedSpan {
    pub fn new(first_row: usize, first_col: usize, last_row: usize, last_col: usize) -> Self {
        Self {
            first_row,
            first_col,
            last_row,
            last_col,
        }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }
}

/// Raw cell grid for one sheet.
///
/// Rows may be ragged; the column extent is the width of the widest row and
/// missing trailing cells read as [`CellValue::Empty`]. `merged_spans` is
/// `None` when the reader cannot report merged cells at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderGrid {
    pub rows: Vec<Vec<CellValue>>,
    pub merged_spans: Option<Vec<MergedSpan>>,
}

impl HeaderGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            rows,
            merged_spans: None,
        }
    }

    #[must_use]
    pub fn with_merged_spans(mut self, spans: Vec<MergedSpan>) -> Self {
        self.merged_spans = Some(spans);
        self
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    /// Cell at `(row, col)`, or empty when outside the populated area.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// The merged span covering `(row, col)`, if any.
    pub fn merged_span_at(&self, row: usize, col: usize) -> Option<&MergedSpan> {
        self.merged_spans
            .as_ref()?
            .iter()
            .find(|span| span.contains(row, col))
    }
}

/// Headers extracted from one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetHeaders {
    pub sheet_name: String,
    /// One entry per non-empty detected column; never blank.
    pub headers: Vec<String>,
    pub header_row_count: usize,
}

impl SheetHeaders {
    pub fn empty(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            ..Self::default()
        }
    }
}
