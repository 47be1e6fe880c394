//! Mapping report assembly and JSON output.

#![deny(unsafe_code)]

pub mod output;
pub mod report;

pub use output::{default_output_path, report_to_json, write_report};
pub use report::{
    FileReport, HeaderMapping, OverallSummary, SheetReport, SheetSummary, build_file_report,
    map_sheet, percentage,
};
