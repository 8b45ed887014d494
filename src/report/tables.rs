//! Text tables for the plain report: dataset preview and per-group rates

use comfy_table::{
    presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, ContentArrangement,
    Table,
};

use crate::pipeline::GroupRate;
use crate::report::{format_rate, Preview};

/// Border and padding columns comfy-table adds around each cell
const CELL_OVERHEAD: usize = 3;

/// Split the preview into tables that each fit in `width` columns.
///
/// Columns keep their order; a column wider than `width` still gets a
/// table of its own.
pub fn preview_tables(preview: &Preview, width: usize) -> Vec<Table> {
    column_chunks(&preview.column_widths(), width)
        .into_iter()
        .map(|range| {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_content_arrangement(ContentArrangement::Disabled);
            table.set_header(
                preview.columns[range.clone()]
                    .iter()
                    .map(|name| Cell::new(name).add_attribute(Attribute::Bold)),
            );
            for row in &preview.rows {
                table.add_row(row[range.clone()].iter().map(Cell::new));
            }
            table
        })
        .collect()
}

/// Greedy grouping of consecutive columns so each group fits `width`
fn column_chunks(widths: &[usize], width: usize) -> Vec<std::ops::Range<usize>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut used = 1; // left border

    for (i, w) in widths.iter().enumerate() {
        let needed = w + CELL_OVERHEAD;
        if i > start && used + needed > width {
            chunks.push(start..i);
            start = i;
            used = 1;
        }
        used += needed;
    }
    if start < widths.len() {
        chunks.push(start..widths.len());
    }
    chunks
}

/// Table of group, employee count and attrition rate
pub fn rate_table(key_label: &str, groups: &[GroupRate]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new(key_label).add_attribute(Attribute::Bold),
        Cell::new("Employees").add_attribute(Attribute::Bold),
        Cell::new("Attrition").add_attribute(Attribute::Bold),
    ]);

    for group in groups {
        let rate_cell = Cell::new(format_rate(group.rate)).set_alignment(CellAlignment::Right);
        let rate_cell = match group.rate {
            None => rate_cell.fg(Color::DarkGrey),
            Some(r) if r >= 20.0 => rate_cell.fg(Color::Red),
            Some(r) if r >= 10.0 => rate_cell.fg(Color::Yellow),
            Some(_) => rate_cell.fg(Color::Green),
        };
        table.add_row(vec![
            Cell::new(&group.key),
            Cell::new(group.rows).set_alignment(CellAlignment::Right),
            rate_cell,
        ]);
    }

    table
}
