//! Schema loading, workbook reading and header detection.

#![deny(unsafe_code)]

pub mod error;
pub mod headers;
pub mod schema_loader;
pub mod workbook;

pub use error::{IngestError, Result};
pub use headers::{
    DATA_ROW_FILL_RATIO, MAX_HEADER_SCAN_ROWS, build_merged_header, detect_header_row_count,
    extract_sheet_headers,
};
pub use schema_loader::{list_schema_files, load_schema_dir, load_schema_file};
pub use workbook::{HeaderGridReader, WorkbookReader, extract_headers};
