//! Loading canonical schema definitions from JSON files.

use std::path::{Path, PathBuf};

use hmap_model::ColumnSchemaStore;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Loads one schema file: a JSON object keyed by schema key.
///
/// Entry order follows the file. Missing fields default, unknown fields are
/// ignored.
pub fn load_schema_file(path: &Path) -> Result<ColumnSchemaStore> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let store: ColumnSchemaStore =
        serde_json::from_str(&text).map_err(|source| IngestError::SchemaParse {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), entries = store.len(), "loaded schema file");
    Ok(store)
}

/// Lists the `.json` files in `dir`, sorted by file name.
pub fn list_schema_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::SchemaDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Loads every schema file in `dir` into one store.
///
/// Files are read in file-name order. When several files define the same
/// key, the first definition is kept.
pub fn load_schema_dir(dir: &Path) -> Result<ColumnSchemaStore> {
    let mut store = ColumnSchemaStore::new();
    for path in list_schema_files(dir)? {
        let file_store = load_schema_file(&path)?;
        let total = file_store.len();
        let added = store.merge_missing(file_store);
        if added < total {
            debug!(
                path = %path.display(),
                skipped = total - added,
                "skipped schema keys already defined by an earlier file"
            );
        }
    }
    info!(dir = %dir.display(), columns = store.len(), "loaded canonical schema");
    Ok(store)
}
