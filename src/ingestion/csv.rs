//! Raw CSV grid loading.

use std::path::Path;

use crate::error::TransformResult;
use crate::types::{Cell, Grid};

/// Load a CSV file into a raw, untyped [`Grid`].
///
/// Rules:
///
/// - No header interpretation: every row, including the first, becomes a
///   data row, and columns get positional labels (`"0"`, `"1"`, ...).
/// - Empty fields become [`Cell::Null`]; everything else is kept verbatim as
///   [`Cell::Text`] (the scanner trims at match time).
/// - Ragged rows are accepted and padded with nulls to the widest row.
pub fn read_grid_from_path(path: impl AsRef<Path>) -> TransformResult<Grid> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    read_grid_from_reader(&mut rdr)
}

/// Load CSV data from an existing CSV reader into a raw [`Grid`].
pub fn read_grid_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> TransformResult<Grid> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(Cell::from_raw).collect());
    }
    Ok(Grid::from_rows(rows))
}
