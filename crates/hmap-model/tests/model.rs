//! Tests for hmap-model types.

use hmap_model::{CellValue, ColumnSchema, ColumnSchemaStore, HeaderGrid, MergedSpan};

#[test]
fn schema_store_keeps_file_order_and_defaults() {
    let json = r#"{
        "tank_id": { "canonicalName": "Tank ID", "required": true, "aliases": ["Tank"] },
        "milk_yield": { "canonicalName": "Milk Yield (L)", "unit": "litres" },
        "barn": { "canonicalName": "Barn", "description": "Barn name" }
    }"#;
    let store: ColumnSchemaStore = serde_json::from_str(json).expect("parse schema");

    let keys: Vec<&str> = store.keys().collect();
    assert_eq!(keys, vec!["tank_id", "milk_yield", "barn"]);

    let tank = store.get("tank_id").expect("tank entry");
    assert!(tank.required);
    assert_eq!(tank.aliases, vec!["Tank".to_string()]);

    let milk = store.get("milk_yield").expect("milk entry");
    assert!(!milk.required);
    assert!(milk.aliases.is_empty());
    assert!(milk.example_values.is_empty());
    assert_eq!(milk.description, "");
}

#[test]
fn schema_store_serializes_in_insertion_order() {
    let mut store: ColumnSchemaStore = [
        ("zeta", ColumnSchema::new("Zeta")),
        ("alpha", ColumnSchema::new("Alpha")),
    ]
    .into_iter()
    .collect();
    store.insert("zeta", ColumnSchema::new("Zeta Prime"));
    assert!(!store.insert_if_absent("alpha", ColumnSchema::new("Other")));
    assert!(store.insert_if_absent("mid", ColumnSchema::new("Mid")));

    let json = serde_json::to_string(&store).expect("serialize store");
    let zeta = json.find("\"zeta\"").expect("zeta key");
    let alpha = json.find("\"alpha\"").expect("alpha key");
    let mid = json.find("\"mid\"").expect("mid key");
    assert!(zeta < alpha && alpha < mid, "{json}");

    let back: ColumnSchemaStore = serde_json::from_str(&json).expect("parse store");
    assert_eq!(back, store);
    assert_eq!(back.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    assert_eq!(back.get("zeta").unwrap().canonical_name, "Zeta Prime");
}

#[test]
fn merge_missing_keeps_first_definition() {
    let mut first: ColumnSchemaStore = [("a", ColumnSchema::new("Alpha"))].into_iter().collect();
    let second: ColumnSchemaStore = [
        ("a", ColumnSchema::new("Other Alpha")),
        ("b", ColumnSchema::new("Beta")),
    ]
    .into_iter()
    .collect();

    let added = first.merge_missing(second);
    assert_eq!(added, 1);
    assert_eq!(first.len(), 2);
    assert_eq!(first.get("a").unwrap().canonical_name, "Alpha");
    assert_eq!(first.get("b").unwrap().canonical_name, "Beta");
}

#[test]
fn grid_reads_ragged_rows_as_empty() {
    let grid = HeaderGrid::new(vec![
        vec![CellValue::Text("A".into())],
        vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(3)],
    ]);
    assert_eq!(grid.width(), 3);
    assert_eq!(grid.height(), 2);
    assert!(grid.cell(0, 2).is_empty());
    assert!(grid.cell(9, 9).is_empty());
    assert!(grid.merged_span_at(0, 0).is_none());
}

#[test]
fn merged_span_lookup() {
    let grid = HeaderGrid::new(vec![vec![CellValue::Text("%DM".into())]])
        .with_merged_spans(vec![MergedSpan::new(0, 0, 0, 2)]);
    assert!(grid.merged_span_at(0, 2).is_some());
    assert!(grid.merged_span_at(0, 3).is_none());
    assert!(grid.merged_span_at(1, 0).is_none());
}

#[test]
fn cell_classification() {
    assert!(CellValue::Int(3).is_numeric());
    assert!(CellValue::Float(2.5).is_numeric());
    assert!(CellValue::DateTime("2024-01-01 00:00:00".into()).is_numeric());
    assert!(!CellValue::Text("123".into()).is_numeric());
    assert!(CellValue::Text("123".into()).has_text());
    assert!(!CellValue::Text("   ".into()).has_text());
    assert!(CellValue::Bool(true).has_text());
    assert!(!CellValue::Bool(true).is_numeric());
    assert_eq!(CellValue::Float(3.0).to_string(), "3.0");
    assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
    assert_eq!(CellValue::Int(34).to_string(), "34");
    assert_eq!(CellValue::Empty.to_string(), "");
}
