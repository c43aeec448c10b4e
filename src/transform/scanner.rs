//! Record-boundary scan and neighborhood field search.
//!
//! This is the heart of the crate: a positional walk over the grid that
//! detects record starts by identifier tokens, then fills each record's
//! target fields from a bounded 2-D neighborhood.
//!
//! Search policy, fixed by compatibility requirements:
//!
//! - Records are non-overlapping windows bounded by the next identifier
//!   occurrence; rows between two identifier rows never start a record.
//! - An identifier occurrence always yields a record, even an empty one.
//! - For each field, rows are tried top-down within `search_radius`; within a
//!   row, the value right of the label is preferred over the value below it.

use crate::config::TransformConfig;
use crate::types::{Cell, Grid, Record};

/// Scan the grid top to bottom and extract one record per identifier
/// occurrence, in row order.
pub(crate) fn extract_records(grid: &Grid, config: &TransformConfig) -> Vec<Record> {
    let identifier_names = config.alias_set(&config.identifier_field);
    let total_rows = grid.row_count();
    let mut records = Vec::new();

    let mut i = 0;
    while i < total_rows {
        if is_record_start(&grid.rows[i], &identifier_names) {
            records.push(extract_single_record(grid, i, config));
            i = find_next_record_start(grid, i + 1, &identifier_names);
        } else {
            i += 1;
        }
    }
    records
}

/// Whether any cell in `row`, trimmed, equals one of the identifier's names.
fn is_record_start(row: &[Cell], identifier_names: &[&str]) -> bool {
    row.iter()
        .any(|cell| cell.trimmed().is_some_and(|t| identifier_names.contains(&t)))
}

/// First row at or after `start` that is itself a record start, or the row
/// count when no further identifier occurs.
fn find_next_record_start(grid: &Grid, start: usize, identifier_names: &[&str]) -> usize {
    (start..grid.row_count())
        .find(|&i| is_record_start(&grid.rows[i], identifier_names))
        .unwrap_or_else(|| grid.row_count())
}

/// Extract one record starting at `start_row`.
///
/// Fields are resolved in config order. For each field the rows
/// `start_row .. start_row + search_radius` (bounded by the grid) are tried
/// in order; the first row where the field's label is found with a value
/// wins. A field with no value inside the window is omitted.
fn extract_single_record(grid: &Grid, start_row: usize, config: &TransformConfig) -> Record {
    let mut record = Record::new();

    for field in &config.target_fields {
        let aliases = config.alias_set(field);

        for row_offset in 0..config.search_radius {
            let row = start_row + row_offset;
            if row >= grid.row_count() {
                break;
            }
            if let Some(value) = find_field_value(grid, row, &aliases, config) {
                record.insert(field.clone(), value);
                break;
            }
        }
    }
    record
}

/// Locate a field's value in one row.
///
/// The label column is the leftmost cell whose trimmed text is one of the
/// field's names. The value is then the first trimmed non-empty cell found
/// rightward within `column_search_radius`, falling back to the first found
/// downward in the label column within `search_radius`. Rightward strictly
/// precedes downward.
fn find_field_value(
    grid: &Grid,
    row: usize,
    field_names: &[&str],
    config: &TransformConfig,
) -> Option<String> {
    let label_col = grid.rows[row]
        .iter()
        .position(|cell| cell.trimmed().is_some_and(|t| field_names.contains(&t)))?;

    let width = grid.column_count();
    for offset in 1..config.column_search_radius.min(width - label_col) {
        if let Some(value) = grid.cell(row, label_col + offset).and_then(Cell::trimmed) {
            return Some(value.to_string());
        }
    }

    let height = grid.row_count();
    for below in row + 1..(row + config.search_radius).min(height) {
        if let Some(value) = grid.cell(below, label_col).and_then(Cell::trimmed) {
            return Some(value.to_string());
        }
    }

    None
}
