#![cfg(feature = "excel")]

//! Raw Excel grid loading (feature `excel`).

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{TransformError, TransformResult};
use crate::types::{Cell, Grid};

/// Which sheet of a workbook to load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelection {
    /// The first sheet in workbook order (default).
    #[default]
    First,
    /// A single named sheet.
    Named(String),
}

/// Load one sheet of an Excel workbook (`.xlsx`, `.xls`, `.ods`, ...) into a
/// raw, untyped [`Grid`].
///
/// No header interpretation and no typing: every cell is stringified into
/// [`Cell::Text`] (`Data::Empty` becomes [`Cell::Null`]), columns get
/// positional labels, and rows are padded to the sheet width. Hierarchical
/// sheets are scanned as-is by the transformer afterwards.
pub fn read_grid_from_path(
    path: impl AsRef<Path>,
    selection: &SheetSelection,
) -> TransformResult<Grid> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match selection {
        SheetSelection::Named(name) => name.clone(),
        SheetSelection::First => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| TransformError::InvalidConfig {
                message: "workbook has no sheets".to_string(),
            })?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    Ok(Grid::from_rows(rows))
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Null,
        Data::String(s) => Cell::from_raw(s),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Cell::Text((*f as i64).to_string())
            } else {
                Cell::Text(f.to_string())
            }
        }
        Data::Int(i) => Cell::Text(i.to_string()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Text(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from_raw(s),
        Data::Error(e) => Cell::Text(format!("{e:?}")),
    }
}

#[cfg(test)]
mod tests {
    use calamine::Data;

    use super::cell_from_data;
    use crate::types::Cell;

    #[test]
    fn empty_cells_become_null() {
        assert_eq!(cell_from_data(&Data::Empty), Cell::Null);
        assert_eq!(cell_from_data(&Data::String(String::new())), Cell::Null);
    }

    #[test]
    fn whole_floats_stringify_without_fraction() {
        assert_eq!(
            cell_from_data(&Data::Float(12345.0)),
            Cell::Text("12345".to_string())
        );
        assert_eq!(
            cell_from_data(&Data::Float(0.5)),
            Cell::Text("0.5".to_string())
        );
    }
}
