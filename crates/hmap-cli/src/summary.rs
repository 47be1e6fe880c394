use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hmap_model::MappingAction;
use hmap_report::SheetReport;

use crate::types::MapRunResult;

pub fn print_summary(result: &MapRunResult) {
    println!("Input: {}", result.input.display());
    println!("Schema columns: {}", result.schema_columns);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Header rows"),
        header_cell("Columns"),
        header_cell("Auto"),
        header_cell("Review"),
        header_cell("Manual"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for sheet in &result.report.sheets {
        table.add_row(vec![
            Cell::new(&sheet.sheet_name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(sheet.header_row_count),
            Cell::new(sheet.total_columns),
            count_cell(sheet.summary.auto_mapped, MappingAction::AutoMap),
            count_cell(sheet.summary.needs_review, MappingAction::Review),
            count_cell(sheet.summary.needs_manual, MappingAction::ManualMap),
        ]);
    }
    let overall = &result.report.overall_summary;
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(overall.total_headers).add_attribute(Attribute::Bold),
        count_cell(overall.total_auto_mapped, MappingAction::AutoMap)
            .add_attribute(Attribute::Bold),
        count_cell(overall.total_needs_review, MappingAction::Review)
            .add_attribute(Attribute::Bold),
        count_cell(overall.total_needs_manual, MappingAction::ManualMap)
            .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_review_table(&result.report.sheets);
    println!(
        "Processed {} headers from {} sheet(s)",
        overall.total_headers, overall.total_sheets
    );
    println!("Output: {}", result.output_path.display());
}

/// Lists headers that still need a human decision.
fn print_review_table(sheets: &[SheetReport]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Header"),
        header_cell("Suggested column"),
        header_cell("Confidence"),
        header_cell("Action"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    let mut rows = 0usize;
    for sheet in sheets {
        for mapping in &sheet.mappings {
            let result = &mapping.result;
            if result.recommended_action == MappingAction::AutoMap {
                continue;
            }
            let suggestion = if result.canonical_column.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(&result.canonical_column)
            };
            table.add_row(vec![
                Cell::new(&sheet.sheet_name).fg(Color::DarkGrey),
                Cell::new(&result.user_column),
                suggestion,
                Cell::new(format!("{:.2}", result.confidence)),
                action_cell(result.recommended_action),
            ]);
            rows += 1;
        }
    }
    if rows == 0 {
        return;
    }
    println!();
    println!("Needs attention:");
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn action_color(action: MappingAction) -> Color {
    match action {
        MappingAction::AutoMap => Color::Green,
        MappingAction::Review => Color::Yellow,
        MappingAction::ManualMap => Color::Red,
    }
}

fn action_cell(action: MappingAction) -> Cell {
    Cell::new(action.as_str()).fg(action_color(action))
}

fn count_cell(count: usize, action: MappingAction) -> Cell {
    if count > 0 {
        Cell::new(count).fg(action_color(action))
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
