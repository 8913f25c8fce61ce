use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame};

use subst_common::any_to_string;
use subst_core::ResolutionSummary;
use subst_model::columns::{CANTIDAD_NECESARIA, CODART, CODART_ALTERNATIVA};

/// Presence of one required column in an inspected table.
pub struct ColumnCheck {
    pub table: &'static str,
    pub column: &'static str,
    pub present: bool,
}

/// What `subst columns` found in one table.
pub struct ColumnsReport {
    /// Workbook sheets in order; empty for CSV input.
    pub sheets: Vec<String>,
    /// Normalized column labels.
    pub labels: Vec<String>,
    pub checks: Vec<ColumnCheck>,
}

pub fn print_resolution(table: &DataFrame, summary: &ResolutionSummary) {
    if table.height() == 0 {
        println!("No substitutes found.");
    } else {
        println!("{}", result_table(table));
    }

    let mut totals = Table::new();
    totals.set_header(vec![
        header_cell("Shortage items"),
        header_cell("Candidates"),
        header_cell("Resolved"),
        header_cell("Unresolved"),
    ]);
    apply_table_style(&mut totals);
    totals.add_row(vec![
        Cell::new(summary.shortages),
        Cell::new(summary.candidates),
        count_cell(summary.resolved, Color::Green),
        count_cell(summary.unresolved.len(), Color::Yellow),
    ]);
    for index in 0..4 {
        align_column(&mut totals, index, CellAlignment::Right);
    }
    println!("{totals}");

    if !summary.unresolved.is_empty() {
        println!("Without substitute: {}", summary.unresolved.join(", "));
    }
}

fn result_table(df: &DataFrame) -> Table {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_result_table_style(&mut table);

    for row in 0..df.height() {
        let cells: Vec<Cell> = df
            .get_columns()
            .iter()
            .map(|column| {
                let value = column.get(row).unwrap_or(AnyValue::Null);
                value_cell(column.name().as_str(), value)
            })
            .collect();
        table.add_row(cells);
    }
    if let Some(index) = df.get_column_index(CANTIDAD_NECESARIA) {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table
}

fn value_cell(column: &str, value: AnyValue<'_>) -> Cell {
    if matches!(value, AnyValue::Null) {
        return dim_cell("-");
    }
    let text = any_to_string(value);
    match column {
        CODART => Cell::new(text).fg(Color::Blue).add_attribute(Attribute::Bold),
        CODART_ALTERNATIVA => Cell::new(text).fg(Color::Green),
        CANTIDAD_NECESARIA => Cell::new(text).add_attribute(Attribute::Bold),
        _ => Cell::new(text),
    }
}

pub fn print_columns(report: &ColumnsReport) {
    if !report.sheets.is_empty() {
        println!("Sheets: {}", report.sheets.join(", "));
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Column")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, label) in report.labels.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(label)]);
    }
    println!("{table}");

    let mut required = Table::new();
    required.set_header(vec![
        header_cell("Table"),
        header_cell("Required column"),
        header_cell("Present"),
    ]);
    apply_table_style(&mut required);
    align_column(&mut required, 2, CellAlignment::Center);
    for check in &report.checks {
        let present = if check.present {
            Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold)
        };
        required.add_row(vec![Cell::new(check.table), Cell::new(check.column), present]);
    }
    println!("{required}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_result_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(200);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
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
