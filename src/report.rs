//! Plain-text rendering of browse outcomes.

use crate::db::{DbObject, TableDataPage};

/// Widest a rendered cell is allowed to be.
const MAX_CELL_WIDTH: usize = 40;

pub fn render_object_list(objects: &[DbObject], page: usize, total_pages: usize) -> String {
    let mut text = String::new();
    text.push_str(&format!("Objects (page {} of {})\n", page, total_pages));
    text.push_str(&format!(
        "{:<14} {:<32} {:<16} {:<32}\n",
        "TYPE", "NAME", "SCHEMA", "PACKAGE"
    ));
    text.push_str(&format!("{}\n", "-".repeat(96)));
    for object in objects {
        text.push_str(&format!(
            "{:<14} {:<32} {:<16} {:<32}\n",
            object.kind,
            object.name,
            object.schema,
            object.package.as_deref().unwrap_or("-"),
        ));
    }
    if objects.is_empty() {
        text.push_str("(no objects)\n");
    }
    text
}

pub fn render_definition(object: &DbObject, definition: &str) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "=== {} ({}) ===\n",
        object.qualified_name(),
        object.kind
    ));
    text.push_str(definition);
    if !definition.ends_with('\n') {
        text.push('\n');
    }
    text
}

pub fn render_table_page(data: &TableDataPage, page: usize) -> String {
    let widths = column_widths(&data.columns, &data.rows);
    let mut text = String::new();
    text.push_str(&format!("Rows (page {} of {})\n", page, data.total_pages));

    let mut header = String::new();
    for (i, column) in data.columns.iter().enumerate() {
        header.push_str(&format!(
            "{:<width$} ",
            clip_cell(column),
            width = widths[i]
        ));
    }
    text.push_str(header.trim_end());
    text.push('\n');
    let rule_width = widths.iter().map(|w| w + 1).sum::<usize>().saturating_sub(1);
    text.push_str(&format!("{}\n", "-".repeat(rule_width)));

    for row in &data.rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            let value = cell.as_deref().unwrap_or("NULL");
            line.push_str(&format!("{:<width$} ", clip_cell(value), width = widths[i]));
        }
        text.push_str(line.trim_end());
        text.push('\n');
    }
    if data.rows.is_empty() {
        text.push_str("(no rows)\n");
    }
    text
}

/// Column widths sized to content, clamped to MAX_CELL_WIDTH.
fn column_widths(columns: &[String], rows: &[Vec<Option<String>>]) -> Vec<usize> {
    let mut widths: Vec<usize> = columns.iter().map(|c| display_width(c)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            let len = display_width(cell.as_deref().unwrap_or("NULL"));
            if len > widths[i] {
                widths[i] = len;
            }
        }
    }
    widths
}

fn display_width(value: &str) -> usize {
    value.chars().count().min(MAX_CELL_WIDTH)
}

fn clip_cell(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_WIDTH {
        value.to_string()
    } else {
        value.chars().take(MAX_CELL_WIDTH).collect()
    }
}
