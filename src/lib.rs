//! `hierarchical-transform` is a small library for pulling structured records
//! out of hierarchically laid-out spreadsheet grids (sheets where one
//! logical record spans several rows and columns instead of occupying a
//! single row), and for validating tabular data against a declarative rule
//! set.
//!
//! The scan works positionally: a row containing the configured
//! `identifier_field` (or one of its aliases) starts a record, and each
//! target field's value is searched for in a bounded neighborhood, first
//! rightward in the row where the field's label appears, then downward in
//! the label's column. Records become rows of a normalized output
//! [`types::Grid`] with cleaned column labels, coerced date columns, and
//! fully-empty columns dropped.
//!
//! ## Quick example: transform a hierarchical grid
//!
//! ```rust
//! use hierarchical_transform::config::TransformConfig;
//! use hierarchical_transform::transform::Transformer;
//! use hierarchical_transform::types::{Cell, Grid};
//!
//! # fn main() -> Result<(), hierarchical_transform::TransformError> {
//! let grid = Grid::from_rows(vec![
//!     vec![Cell::from("Customer ID"), Cell::from("12345")],
//!     vec![Cell::from("Name"), Cell::from("John Doe")],
//!     vec![Cell::from("Total"), Cell::from("500.00")],
//! ]);
//!
//! let config = TransformConfig::new(
//!     "Customer ID",
//!     vec![
//!         "Customer ID".to_string(),
//!         "Name".to_string(),
//!         "Total".to_string(),
//!     ],
//! );
//!
//! let table = Transformer::new().transform(&grid, &config)?;
//! assert_eq!(table.row_count(), 1);
//! assert_eq!(table.columns, vec!["customer_id", "name", "total"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Quick example: validate a table
//!
//! ```rust
//! use hierarchical_transform::types::{Cell, Grid};
//! use hierarchical_transform::validation::{validate, ValidationRules};
//!
//! let table = Grid::new(
//!     vec!["name".to_string(), "amount".to_string()],
//!     vec![vec![Cell::from("Ada"), Cell::from("100")]],
//! );
//!
//! let rules = ValidationRules::new()
//!     .require_columns(vec!["amount".to_string()])
//!     .with_numeric_columns(vec!["amount".to_string()]);
//!
//! let result = validate(&table, &rules);
//! assert!(result.is_valid);
//! ```
//!
//! ## Modules
//!
//! - [`types`]: the in-memory grid, cells, and extracted records
//! - [`config`]: scanning parameters ([`config::TransformConfig`])
//! - [`transform`]: the transformation pipeline and record scanner
//! - [`validation`]: declarative rule-based validation
//! - [`ingestion`]: raw grid loading from CSV (and Excel with the `excel`
//!   feature)
//! - [`observability`]: injectable observer for pipeline progress
//! - [`error`]: error types used across the crate
//!
//! ## Failure model
//!
//! Hard failures (an unusable config or an empty input grid) come back as
//! [`TransformError`] before any scanning happens. Everything softer is
//! data: a target field missing from a record window is simply omitted, a
//! date cell that will not parse becomes a null, and rule violations are
//! collected into a [`validation::ValidationResult`] without ever raising.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod observability;
pub mod transform;
pub mod types;
pub mod validation;

pub use error::{TransformError, TransformResult};
