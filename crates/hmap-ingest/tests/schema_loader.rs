use std::fs;

use hmap_ingest::{IngestError, list_schema_files, load_schema_dir, load_schema_file};
use tempfile::TempDir;

const DAIRY: &str = r#"{
    "milk_yield": {
        "canonicalName": "Milk Yield (L)",
        "description": "Daily milk yield per cow",
        "dataType": "float",
        "required": true,
        "exampleValues": ["21.5", "30"],
        "aliases": ["MilkYield", "Yield L"]
    },
    "tank_id": {
        "canonicalName": "Tank ID",
        "aliases": ["Tank"],
        "unit": "ignored"
    }
}"#;

const FEED: &str = r#"{
    "tank_id": { "canonicalName": "Storage Tank" },
    "dry_matter": { "canonicalName": "Dry Matter %", "aliases": ["%DM"] }
}"#;

#[test]
fn single_file_keeps_order_and_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dairy.json");
    fs::write(&path, DAIRY).unwrap();

    let store = load_schema_file(&path).unwrap();
    let keys: Vec<&str> = store.keys().collect();
    assert_eq!(keys, vec!["milk_yield", "tank_id"]);

    let milk = store.get("milk_yield").unwrap();
    assert!(milk.required);
    assert_eq!(milk.aliases, vec!["MilkYield", "Yield L"]);

    let tank = store.get("tank_id").unwrap();
    assert!(!tank.required);
    assert!(tank.description.is_empty());
}

#[test]
fn directory_loads_json_files_by_name_first_wins() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b_feed.json"), FEED).unwrap();
    fs::write(dir.path().join("a_dairy.json"), DAIRY).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a schema").unwrap();
    fs::create_dir(dir.path().join("nested.json")).unwrap();

    let files = list_schema_files(dir.path()).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a_dairy.json", "b_feed.json"]);

    let store = load_schema_dir(dir.path()).unwrap();
    let keys: Vec<&str> = store.keys().collect();
    assert_eq!(keys, vec!["milk_yield", "tank_id", "dry_matter"]);
    assert_eq!(store.get("tank_id").unwrap().canonical_name, "Tank ID");
}

#[test]
fn empty_directory_gives_empty_store() {
    let dir = TempDir::new().unwrap();
    let store = load_schema_dir(dir.path()).unwrap();
    assert!(store.is_empty());
}

#[test]
fn missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = load_schema_dir(&dir.path().join("aliases")).unwrap_err();
    assert!(matches!(err, IngestError::SchemaDirNotFound { .. }));
}

#[test]
fn invalid_json_names_the_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    let err = load_schema_dir(dir.path()).unwrap_err();
    assert!(matches!(err, IngestError::SchemaParse { .. }));
    assert!(err.to_string().contains("broken.json"));
}
