//! Transformation configuration.
//!
//! A [`TransformConfig`] is a plain value object: callers build one in code
//! (builder-style methods) or deserialize one from a structured document via
//! serde. It is never read from files or the environment by this crate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

fn default_search_radius() -> usize {
    10
}

fn default_column_search_radius() -> usize {
    5
}

/// Scanning parameters for one transformation run.
///
/// `identifier_field` and `target_fields` are required; everything else has
/// a usable default. The radii bound the 2-D neighborhood search:
/// `search_radius` is the row window, `column_search_radius` the rightward
/// column window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Rows to discard from the top of the grid before scanning.
    #[serde(default)]
    pub skip_rows: usize,

    /// Column positions to discard before scanning.
    #[serde(default)]
    pub drop_columns: Vec<usize>,

    /// Output columns to coerce into date cells, named by their
    /// **post-cleaning** labels (e.g. `"order_date"`).
    #[serde(default)]
    pub date_columns: Vec<String>,

    /// Field whose appearance in a row marks the start of a new record.
    pub identifier_field: String,

    /// Fields to extract for each record, in output order.
    pub target_fields: Vec<String>,

    /// Alternative field spellings: alias → canonical field name.
    #[serde(default)]
    pub field_aliases: HashMap<String, String>,

    /// How many rows below a record start (or a field label) to search.
    #[serde(default = "default_search_radius")]
    pub search_radius: usize,

    /// How many columns right of a field label to search.
    #[serde(default = "default_column_search_radius")]
    pub column_search_radius: usize,
}

impl TransformConfig {
    /// Create a config with the required fields and default radii.
    pub fn new(
        identifier_field: impl Into<String>,
        target_fields: Vec<String>,
    ) -> Self {
        Self {
            skip_rows: 0,
            drop_columns: Vec::new(),
            date_columns: Vec::new(),
            identifier_field: identifier_field.into(),
            target_fields,
            field_aliases: HashMap::new(),
            search_radius: default_search_radius(),
            column_search_radius: default_column_search_radius(),
        }
    }

    /// Discard the first `n` rows before scanning.
    pub fn with_skip_rows(mut self, n: usize) -> Self {
        self.skip_rows = n;
        self
    }

    /// Discard the columns at `positions` before scanning.
    pub fn with_drop_columns(mut self, positions: Vec<usize>) -> Self {
        self.drop_columns = positions;
        self
    }

    /// Coerce the named output columns into dates.
    pub fn with_date_columns(mut self, columns: Vec<String>) -> Self {
        self.date_columns = columns;
        self
    }

    /// Register an alternative spelling for a canonical field name.
    pub fn with_alias(mut self, alias: impl Into<String>, field: impl Into<String>) -> Self {
        self.field_aliases.insert(alias.into(), field.into());
        self
    }

    /// Set the row search window.
    pub fn with_search_radius(mut self, radius: usize) -> Self {
        self.search_radius = radius;
        self
    }

    /// Set the rightward column search window.
    pub fn with_column_search_radius(mut self, radius: usize) -> Self {
        self.column_search_radius = radius;
        self
    }

    /// All spellings that resolve to `field`: the canonical name plus every
    /// alias mapping to it.
    pub(crate) fn alias_set<'a>(&'a self, field: &'a str) -> Vec<&'a str> {
        let mut names = vec![field];
        names.extend(
            self.field_aliases
                .iter()
                .filter(|(_, canonical)| canonical.as_str() == field)
                .map(|(alias, _)| alias.as_str()),
        );
        names
    }
}
