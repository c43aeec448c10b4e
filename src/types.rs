//! Core data model types.
//!
//! This crate scans an in-memory [`Grid`] of loosely structured cells and
//! produces a normalized [`Grid`] whose columns are the extracted field names.
//! A [`Record`] is the intermediate shape: one insertion-ordered mapping of
//! field name to extracted value per identifier occurrence.

use chrono::NaiveDateTime;

/// A single cell in a [`Grid`].
///
/// Raw grids contain only `Null` and `Text` cells; `Date` cells are produced
/// by date-column coercion during assembly of the output table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing/empty value.
    Null,
    /// Raw textual value, stored untrimmed.
    Text(String),
    /// Parsed date value.
    Date(NaiveDateTime),
}

impl Cell {
    /// Build a cell from a raw string: empty input maps to `Null`.
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            Cell::Null
        } else {
            Cell::Text(raw.to_string())
        }
    }

    /// Whether this cell is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// The textual content of this cell, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Trimmed textual content, or `None` for null cells and cells that are
    /// whitespace only.
    pub fn trimmed(&self) -> Option<&str> {
        match self.as_text().map(str::trim) {
            Some("") | None => None,
            Some(s) => Some(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(raw: &str) -> Self {
        Cell::from_raw(raw)
    }
}

/// In-memory 2-D table with ordered column labels.
///
/// Rows are stored row-major as `Vec<Vec<Cell>>`. Every row has exactly
/// `columns.len()` cells; constructors pad short rows with [`Cell::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Ordered column labels.
    pub columns: Vec<String>,
    /// Row-major cell storage.
    pub rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create a grid from labels and rows, padding short rows with nulls.
    ///
    /// Rows longer than `columns` are truncated to the label count.
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        for row in &mut rows {
            row.resize(width, Cell::Null);
        }
        Self { columns, rows }
    }

    /// Create a grid from bare rows, labeling columns positionally
    /// (`"0"`, `"1"`, ...) like a headerless spreadsheet read.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let columns = (0..width).map(|i| i.to_string()).collect();
        Self::new(columns, rows)
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, col)`, if in bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Index of a column by label, if present.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// Iterate the cells of one column top to bottom.
    ///
    /// Returns an empty iterator when the label is unknown.
    pub fn column_cells<'a>(&'a self, label: &str) -> impl Iterator<Item = &'a Cell> {
        let idx = self.column_index(label);
        self.rows
            .iter()
            .filter_map(move |row| idx.and_then(|i| row.get(i)))
    }

    /// Create a new grid with the first `n` rows removed.
    ///
    /// Removing more rows than exist yields an empty grid with the same
    /// columns.
    pub fn skip_rows(&self, n: usize) -> Self {
        let rows = self.rows.iter().skip(n).cloned().collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Create a new grid without the columns at the given positions.
    ///
    /// Out-of-range positions are ignored.
    pub fn drop_columns(&self, positions: &[usize]) -> Self {
        let keep = |i: &usize| !positions.contains(i);
        let columns = self
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| keep(i))
            .map(|(_, c)| c.clone())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(i, _)| keep(i))
                    .map(|(_, c)| c.clone())
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }
}

/// One extracted record: field name → extracted value, in insertion order.
///
/// Insertion order matters downstream: output columns are the union of field
/// names across records in first-seen order. A field the scanner never found
/// is simply absent, never stored as an empty placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<(String, String)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field value. First insertion wins; the scanner never assigns
    /// the same field twice.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        if !self.contains(&field) {
            self.entries.push((field, value.into()));
        }
    }

    /// Value of a field, if extracted.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a field was extracted.
    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|(f, _)| f == field)
    }

    /// Whether no fields were extracted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of extracted fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate `(field, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, v)| (f.as_str(), v.as_str()))
    }
}
