//! Declarative rule-based validation for grids.
//!
//! [`validate`] applies the rule categories present in a [`ValidationRules`]
//! to any [`Grid`] (raw input or transformed output) and returns a
//! [`ValidationResult`]. Rule violations are data, never errors: every
//! category present runs to completion and contributes independently.
//!
//! Category execution order is fixed: required columns, date formats,
//! numeric columns, minimum bounds, maximum bounds, uniqueness, custom
//! predicates.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::types::{Cell, Grid};

/// Outcome of one custom validation predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomOutcome {
    /// Whether the grid passed this predicate.
    pub valid: bool,
    /// Optional failure message; a default is used when absent.
    pub message: Option<String>,
}

impl CustomOutcome {
    /// A passing outcome.
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A failing outcome with a message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// A user-supplied predicate over the whole grid.
///
/// Implemented for any `Fn(&Grid) -> CustomOutcome`, so closures and
/// function pointers work directly; implement the trait on a type for
/// stateful rules.
pub trait CustomValidation: Send + Sync {
    /// Check the grid and report an outcome.
    fn check(&self, grid: &Grid) -> CustomOutcome;
}

impl<F> CustomValidation for F
where
    F: Fn(&Grid) -> CustomOutcome + Send + Sync,
{
    fn check(&self, grid: &Grid) -> CustomOutcome {
        self(grid)
    }
}

/// Declarative rule set. Every category is independently optional; absent
/// categories are skipped entirely.
#[derive(Default)]
pub struct ValidationRules {
    /// Columns that must exist.
    pub required_columns: Option<Vec<String>>,
    /// Column → chrono format string every non-null cell must parse under.
    pub date_format: Option<Vec<(String, String)>>,
    /// Columns whose non-null cells must be signed decimal numerals.
    pub numeric_columns: Option<Vec<String>>,
    /// Column → lower bound for numeric cells.
    pub min_value: Option<Vec<(String, f64)>>,
    /// Column → upper bound for numeric cells.
    pub max_value: Option<Vec<(String, f64)>>,
    /// Columns whose non-null values must not repeat.
    pub unique_columns: Option<Vec<String>>,
    /// Ordered predicates over the whole grid.
    pub custom_validations: Vec<Arc<dyn CustomValidation>>,
}

impl fmt::Debug for ValidationRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRules")
            .field("required_columns", &self.required_columns)
            .field("date_format", &self.date_format)
            .field("numeric_columns", &self.numeric_columns)
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .field("unique_columns", &self.unique_columns)
            .field("custom_validations_len", &self.custom_validations.len())
            .finish()
    }
}

impl ValidationRules {
    /// An empty rule set (validates everything as passing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the listed columns to exist.
    pub fn require_columns(mut self, columns: Vec<String>) -> Self {
        self.required_columns = Some(columns);
        self
    }

    /// Require every non-null cell of `column` to parse under `format`.
    pub fn with_date_format(
        mut self,
        column: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        self.date_format
            .get_or_insert_with(Vec::new)
            .push((column.into(), format.into()));
        self
    }

    /// Require the listed columns to hold only decimal numerals.
    pub fn with_numeric_columns(mut self, columns: Vec<String>) -> Self {
        self.numeric_columns = Some(columns);
        self
    }

    /// Require numeric cells of `column` to be at least `bound`.
    pub fn with_min_value(mut self, column: impl Into<String>, bound: f64) -> Self {
        self.min_value
            .get_or_insert_with(Vec::new)
            .push((column.into(), bound));
        self
    }

    /// Require numeric cells of `column` to be at most `bound`.
    pub fn with_max_value(mut self, column: impl Into<String>, bound: f64) -> Self {
        self.max_value
            .get_or_insert_with(Vec::new)
            .push((column.into(), bound));
        self
    }

    /// Require the listed columns to hold no duplicate values.
    pub fn with_unique_columns(mut self, columns: Vec<String>) -> Self {
        self.unique_columns = Some(columns);
        self
    }

    /// Append a custom predicate.
    pub fn with_custom(mut self, validation: impl CustomValidation + 'static) -> Self {
        self.custom_validations.push(Arc::new(validation));
        self
    }
}

/// Result of one [`validate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// True iff `errors` is empty.
    pub is_valid: bool,
    /// Aggregated rule violations, in category order.
    pub errors: Vec<String>,
    /// Non-fatal findings (e.g. a rule naming a column the grid lacks).
    pub warnings: Vec<String>,
}

/// Validate a grid against a rule set.
///
/// Stateless per call: accumulators are local, so concurrent validation of
/// distinct grids needs no coordination. Never fails; all findings are
/// returned in the result.
pub fn validate(grid: &Grid, rules: &ValidationRules) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if let Some(columns) = &rules.required_columns {
        check_required_columns(grid, columns, &mut errors);
    }
    if let Some(formats) = &rules.date_format {
        check_date_formats(grid, formats, &mut errors, &mut warnings);
    }
    if let Some(columns) = &rules.numeric_columns {
        check_numeric_columns(grid, columns, &mut errors, &mut warnings);
    }
    if let Some(bounds) = &rules.min_value {
        check_bounds(grid, bounds, Bound::Min, &mut errors, &mut warnings);
    }
    if let Some(bounds) = &rules.max_value {
        check_bounds(grid, bounds, Bound::Max, &mut errors, &mut warnings);
    }
    if let Some(columns) = &rules.unique_columns {
        check_unique_columns(grid, columns, &mut errors, &mut warnings);
    }
    for validation in &rules.custom_validations {
        let outcome = validation.check(grid);
        if !outcome.valid {
            errors.push(
                outcome
                    .message
                    .unwrap_or_else(|| "custom validation failed".to_string()),
            );
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn check_required_columns(grid: &Grid, required: &[String], errors: &mut Vec<String>) {
    let missing: Vec<&str> = required
        .iter()
        .filter(|col| grid.column_index(col).is_none())
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        errors.push(format!("missing required columns: {missing:?}"));
    }
}

fn check_date_formats(
    grid: &Grid,
    formats: &[(String, String)],
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    for (column, format) in formats {
        if grid.column_index(column).is_none() {
            push_missing_column_warning(warnings, column, "date_format");
            continue;
        }
        let mut invalid: Vec<String> = Vec::new();
        for (idx, cell) in grid.column_cells(column).enumerate() {
            match cell {
                Cell::Null | Cell::Date(_) => {}
                Cell::Text(value) => {
                    if !parses_with_format(value.trim(), format) {
                        invalid.push(format!("row {idx}: '{value}'"));
                    }
                }
            }
        }
        if !invalid.is_empty() {
            errors.push(format!(
                "invalid date format in column '{column}' (expected {format}): {}",
                invalid.join(", ")
            ));
        }
    }
}

/// A value parses when any of the chrono date/datetime/time interpretations
/// of `format` accepts it.
fn parses_with_format(value: &str, format: &str) -> bool {
    NaiveDateTime::parse_from_str(value, format).is_ok()
        || NaiveDate::parse_from_str(value, format).is_ok()
        || NaiveTime::parse_from_str(value, format).is_ok()
}

fn check_numeric_columns(
    grid: &Grid,
    columns: &[String],
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    for column in columns {
        if grid.column_index(column).is_none() {
            push_missing_column_warning(warnings, column, "numeric_columns");
            continue;
        }
        let rows: Vec<usize> = grid
            .column_cells(column)
            .enumerate()
            .filter(|(_, cell)| match cell {
                Cell::Null => false,
                Cell::Date(_) => true,
                Cell::Text(value) => !is_decimal_numeral(value.trim()),
            })
            .map(|(idx, _)| idx)
            .collect();
        if !rows.is_empty() {
            errors.push(format!(
                "non-numeric values in column '{column}' at rows: {rows:?}"
            ));
        }
    }
}

/// Signed decimal numeral: optional single leading `-`, at least one digit,
/// at most one `.`, nothing else.
fn is_decimal_numeral(value: &str) -> bool {
    let body = value.strip_prefix('-').unwrap_or(value);
    let mut digits = 0usize;
    let mut dots = 0usize;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => {
                dots += 1;
                if dots > 1 {
                    return false;
                }
            }
            _ => return false,
        }
    }
    digits > 0
}

#[derive(Clone, Copy)]
enum Bound {
    Min,
    Max,
}

fn check_bounds(
    grid: &Grid,
    bounds: &[(String, f64)],
    kind: Bound,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let category = match kind {
        Bound::Min => "min_value",
        Bound::Max => "max_value",
    };
    for (column, bound) in bounds {
        if grid.column_index(column).is_none() {
            push_missing_column_warning(warnings, column, category);
            continue;
        }
        let rows: Vec<usize> = grid
            .column_cells(column)
            .enumerate()
            .filter_map(|(idx, cell)| {
                let value = cell.trimmed()?.parse::<f64>().ok()?;
                let out_of_bounds = match kind {
                    Bound::Min => value < *bound,
                    Bound::Max => value > *bound,
                };
                out_of_bounds.then_some(idx)
            })
            .collect();
        if !rows.is_empty() {
            let description = match kind {
                Bound::Min => "below minimum",
                Bound::Max => "above maximum",
            };
            errors.push(format!(
                "values {description} ({bound}) in column '{column}' at rows: {rows:?}"
            ));
        }
    }
}

fn check_unique_columns(
    grid: &Grid,
    columns: &[String],
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    for column in columns {
        if grid.column_index(column).is_none() {
            push_missing_column_warning(warnings, column, "unique_columns");
            continue;
        }
        let mut seen: Vec<String> = Vec::new();
        let mut duplicates: Vec<usize> = Vec::new();
        for (idx, cell) in grid.column_cells(column).enumerate() {
            let key = match cell {
                Cell::Null => continue,
                Cell::Text(value) => value.clone(),
                Cell::Date(date) => date.to_string(),
            };
            if seen.contains(&key) {
                duplicates.push(idx);
            } else {
                seen.push(key);
            }
        }
        if !duplicates.is_empty() {
            errors.push(format!(
                "duplicate values in column '{column}' at rows: {duplicates:?}"
            ));
        }
    }
}

fn push_missing_column_warning(warnings: &mut Vec<String>, column: &str, category: &str) {
    warnings.push(format!(
        "column '{column}' named by {category} is not present; rule skipped"
    ));
}

#[cfg(test)]
mod tests {
    use super::{validate, CustomOutcome, ValidationRules};
    use crate::types::{Cell, Grid};

    fn orders_grid() -> Grid {
        Grid::new(
            vec!["id".to_string(), "amount".to_string(), "date".to_string()],
            vec![
                vec![Cell::from("1"), Cell::from("100"), Cell::from("2024-01-01")],
                vec![Cell::from("2"), Cell::from("200"), Cell::from("2024-01-02")],
                vec![Cell::from("3"), Cell::from("300"), Cell::from("2024-01-03")],
            ],
        )
    }

    #[test]
    fn empty_rules_pass_any_grid() {
        let result = validate(&orders_grid(), &ValidationRules::new());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn missing_required_column_is_one_aggregated_error() {
        let rules = ValidationRules::new()
            .require_columns(vec!["amount".to_string(), "carrier".to_string()]);
        let result = validate(&orders_grid(), &rules);

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("carrier"));
        assert!(!result.errors[0].contains("'amount'"));
    }

    #[test]
    fn numeric_rule_flags_offending_rows() {
        let mut grid = orders_grid();
        grid.rows[1][1] = Cell::from("twelve");
        let rules = ValidationRules::new().with_numeric_columns(vec!["amount".to_string()]);
        let result = validate(&grid, &rules);

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("'amount'"));
        assert!(result.errors[0].contains("[1]"));
    }

    #[test]
    fn decimal_numeral_grammar_is_strict() {
        use super::is_decimal_numeral;
        for ok in ["0", "42", "-7", "3.14", "-12.5", ".5", "5."] {
            assert!(is_decimal_numeral(ok), "{ok} should parse");
        }
        for bad in ["", "-", ".", "1.2.3", "--1", "1-2", "1e5", "+1", "12 "] {
            assert!(!is_decimal_numeral(bad), "{bad} should not parse");
        }
    }

    #[test]
    fn date_format_rule_reports_rows_and_values() {
        let mut grid = orders_grid();
        grid.rows[2][2] = Cell::from("not-a-date");
        let rules = ValidationRules::new().with_date_format("date", "%Y-%m-%d");
        let result = validate(&grid, &rules);

        assert!(!result.is_valid);
        assert!(result.errors[0].contains("row 2"));
        assert!(result.errors[0].contains("not-a-date"));
    }

    #[test]
    fn coerced_date_cells_pass_date_format_trivially() {
        let mut grid = orders_grid();
        grid.rows[0][2] = Cell::Date(
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        );
        let rules = ValidationRules::new().with_date_format("date", "%Y-%m-%d");
        assert!(validate(&grid, &rules).is_valid);
    }

    #[test]
    fn bounds_rules_flag_rows_outside_range() {
        let rules = ValidationRules::new()
            .with_min_value("amount", 150.0)
            .with_max_value("amount", 250.0);
        let result = validate(&orders_grid(), &rules);

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].contains("below minimum"));
        assert!(result.errors[0].contains("[0]"));
        assert!(result.errors[1].contains("above maximum"));
        assert!(result.errors[1].contains("[2]"));
    }

    #[test]
    fn unique_rule_flags_every_occurrence_after_the_first() {
        let mut grid = orders_grid();
        grid.rows[1][0] = Cell::from("1");
        grid.rows[2][0] = Cell::from("1");
        let rules = ValidationRules::new().with_unique_columns(vec!["id".to_string()]);
        let result = validate(&grid, &rules);

        assert!(!result.is_valid);
        assert!(result.errors[0].contains("[1, 2]"));
    }

    #[test]
    fn custom_predicates_run_in_order_and_use_default_message() {
        let rules = ValidationRules::new()
            .with_custom(|_: &Grid| CustomOutcome::fail("first failure"))
            .with_custom(|_: &Grid| CustomOutcome {
                valid: false,
                message: None,
            })
            .with_custom(|_: &Grid| CustomOutcome::pass());
        let result = validate(&orders_grid(), &rules);

        assert_eq!(
            result.errors,
            vec![
                "first failure".to_string(),
                "custom validation failed".to_string()
            ]
        );
    }

    #[test]
    fn all_categories_run_even_after_failures() {
        let mut grid = orders_grid();
        grid.rows[0][1] = Cell::from("oops");
        let rules = ValidationRules::new()
            .require_columns(vec!["missing".to_string()])
            .with_numeric_columns(vec!["amount".to_string()])
            .with_custom(|_: &Grid| CustomOutcome::fail("custom says no"));
        let result = validate(&grid, &rules);

        assert_eq!(result.errors.len(), 3);
        assert!(!result.is_valid);
    }

    #[test]
    fn rule_naming_absent_column_warns_but_does_not_error() {
        let rules = ValidationRules::new().with_numeric_columns(vec!["ghost".to_string()]);
        let result = validate(&orders_grid(), &rules);

        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("ghost"));
    }
}
