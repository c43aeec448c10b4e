//! Assembly of extracted records into the normalized output table.
//!
//! Output columns are the union of record field names in first-seen order,
//! with labels run through a fixed cleaning pipeline. Declared date columns
//! are coerced cell-by-cell (failures become nulls, never errors), then any
//! column that is null across every row is dropped.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::TransformConfig;
use crate::types::{Cell, Grid, Record};

static UNDERSCORE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new("__+").expect("static regex"));

/// Formats tried in order when coercing a date column. Date-only formats are
/// promoted to midnight timestamps.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y"];

/// Build the normalized output grid from the extracted record sequence.
pub(crate) fn assemble(records: &[Record], config: &TransformConfig) -> Grid {
    let field_order = union_field_order(records);

    let columns: Vec<String> = field_order.iter().map(|f| clean_column_label(f)).collect();
    let rows: Vec<Vec<Cell>> = records
        .iter()
        .map(|record| {
            field_order
                .iter()
                .map(|field| match record.get(field) {
                    Some(value) => Cell::Text(value.to_string()),
                    None => Cell::Null,
                })
                .collect()
        })
        .collect();

    let mut grid = Grid::new(columns, rows);
    coerce_date_columns(&mut grid, &config.date_columns);
    drop_all_null_columns(&grid)
}

/// Union of field names across records, in first-seen order. Fields no
/// record carries do not appear at all.
fn union_field_order(records: &[Record]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    for record in records {
        for (field, _) in record.iter() {
            if !order.iter().any(|f| f == field) {
                order.push(field.to_string());
            }
        }
    }
    order
}

/// Clean one column label.
///
/// The steps run in a fixed order: trim, strip embedded newlines, lowercase,
/// turn whitespace runs into underscores, collapse doubled underscores, map
/// `/` to underscore, drop `:`, and a final collapse of any remaining
/// underscore runs. Cleaning is idempotent.
pub(crate) fn clean_column_label(label: &str) -> String {
    let stripped: String = label.trim().chars().filter(|&c| c != '\n').collect();
    let lowered = stripped.to_lowercase();
    let underscored = lowered.split_whitespace().collect::<Vec<_>>().join("_");
    let collapsed = underscored.replace("__", "_");
    let slashed = collapsed.replace('/', "_");
    let cleaned = slashed.replace(':', "");
    UNDERSCORE_RUNS.replace_all(&cleaned, "_").into_owned()
}

/// Coerce every declared date column in place. Columns whose label is not in
/// `date_columns` are untouched; unknown names are skipped.
fn coerce_date_columns(grid: &mut Grid, date_columns: &[String]) {
    for name in date_columns {
        let Some(idx) = grid.column_index(name) else {
            continue;
        };
        for row in &mut grid.rows {
            row[idx] = match row[idx].trimmed().and_then(parse_date) {
                Some(parsed) => Cell::Date(parsed),
                None => Cell::Null,
            };
        }
    }
}

/// Parse a date value against the known format lists.
fn parse_date(value: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, format) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Drop every column whose cells are null in all rows.
fn drop_all_null_columns(grid: &Grid) -> Grid {
    let keep: Vec<usize> = (0..grid.column_count())
        .filter(|&idx| grid.rows.iter().any(|row| !row[idx].is_null()))
        .collect();

    let columns = keep.iter().map(|&i| grid.columns[i].clone()).collect();
    let rows = grid
        .rows
        .iter()
        .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
        .collect();
    Grid { columns, rows }
}
