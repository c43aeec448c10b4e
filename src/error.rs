use thiserror::Error;

/// Convenience result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Error type returned by transformation and grid-loading functions.
///
/// Hard failures only: configuration and input-shape problems, plus I/O and
/// parse errors surfaced while loading a grid. Rule violations found by
/// [`crate::validation::validate`] are reported as data, not as this error.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Excel grid-loading error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV grid-loading error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The transformation configuration is unusable (missing identifier
    /// field, no target fields, zero search radius, ...).
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The input grid has no rows at all.
    #[error("input grid is empty: no rows to scan")]
    EmptyInput,
}
