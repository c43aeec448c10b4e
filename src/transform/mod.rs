//! Transformation pipeline entrypoint.
//!
//! [`Transformer::transform`] runs the full pipeline over an in-memory grid:
//!
//! 1. configuration check (identifier/target fields present, radii non-zero)
//! 2. initial transforms (row skip, column drop)
//! 3. record extraction ([`scanner`], the core neighborhood search)
//! 4. assembly into the normalized output grid ([`assembler`])
//!
//! The transformer holds no state beyond an optional observer; concurrent
//! `transform` calls on distinct grids are safe.

mod assembler;
mod scanner;

use std::sync::Arc;

use crate::config::TransformConfig;
use crate::error::{TransformError, TransformResult};
use crate::observability::{TransformObserver, TransformStage, TransformStats};
use crate::types::Grid;

/// Transforms hierarchically laid-out grids into normalized tables.
#[derive(Default)]
pub struct Transformer {
    observer: Option<Arc<dyn TransformObserver>>,
}

impl Transformer {
    /// Create a transformer without an observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transformer that reports progress to `observer`.
    pub fn with_observer(observer: Arc<dyn TransformObserver>) -> Self {
        Self {
            observer: Some(observer),
        }
    }

    /// Transform a hierarchical grid into a normalized table.
    ///
    /// Fails with [`TransformError::InvalidConfig`] before touching the grid
    /// when the config is unusable, and with [`TransformError::EmptyInput`]
    /// when the grid has no rows. Otherwise always returns a table, possibly
    /// with zero rows when no identifier occurrence matched.
    pub fn transform(&self, grid: &Grid, config: &TransformConfig) -> TransformResult<Grid> {
        if let Err(error) = validate_config(config) {
            self.notify_error(&error);
            return Err(error);
        }
        if grid.is_empty() {
            let error = TransformError::EmptyInput;
            self.notify_error(&error);
            return Err(error);
        }

        self.notify_stage(
            TransformStage::InitialTransforms,
            &format!(
                "skip_rows={} drop_columns={:?}",
                config.skip_rows, config.drop_columns
            ),
        );
        let trimmed = apply_initial_transforms(grid, config);

        self.notify_stage(
            TransformStage::RecordExtraction,
            &format!("scanning {} rows", trimmed.row_count()),
        );
        let records = scanner::extract_records(&trimmed, config);

        self.notify_stage(
            TransformStage::Assembly,
            &format!("{} records extracted", records.len()),
        );
        let output = assembler::assemble(&records, config);

        if let Some(observer) = &self.observer {
            observer.on_complete(TransformStats {
                records: output.row_count(),
                columns: output.column_count(),
            });
        }
        Ok(output)
    }

    fn notify_stage(&self, stage: TransformStage, detail: &str) {
        if let Some(observer) = &self.observer {
            observer.on_stage(stage, detail);
        }
    }

    fn notify_error(&self, error: &TransformError) {
        if let Some(observer) = &self.observer {
            observer.on_error(error);
        }
    }
}

/// Reject configs the scanner cannot run with.
fn validate_config(config: &TransformConfig) -> TransformResult<()> {
    if config.identifier_field.trim().is_empty() {
        return Err(TransformError::InvalidConfig {
            message: "identifier_field must be specified".to_string(),
        });
    }
    if config.target_fields.is_empty() {
        return Err(TransformError::InvalidConfig {
            message: "target_fields must be specified".to_string(),
        });
    }
    if config.search_radius == 0 {
        return Err(TransformError::InvalidConfig {
            message: "search_radius must be greater than zero".to_string(),
        });
    }
    if config.column_search_radius == 0 {
        return Err(TransformError::InvalidConfig {
            message: "column_search_radius must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// Apply row skip and column drop to the raw grid.
fn apply_initial_transforms(grid: &Grid, config: &TransformConfig) -> Grid {
    let mut grid = grid.clone();
    if config.skip_rows > 0 {
        grid = grid.skip_rows(config.skip_rows);
    }
    if !config.drop_columns.is_empty() {
        grid = grid.drop_columns(&config.drop_columns);
    }
    grid
}
