use std::path::PathBuf;

use hmap_report::FileReport;

#[derive(Debug)]
pub struct MapRunResult {
    pub input: PathBuf,
    pub output_path: PathBuf,
    pub schema_columns: usize,
    pub report: FileReport,
}
