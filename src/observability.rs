//! Observability hooks for the transformation pipeline.
//!
//! There is no global logger: a [`TransformObserver`] is handed to the
//! [`crate::transform::Transformer`] explicitly and receives stage progress,
//! final stats, and hard failures. Implementors can forward events to any
//! logging or metrics backend.

use std::fmt;
use std::sync::Arc;

use crate::error::TransformError;

/// Pipeline stages reported to observers, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformStage {
    /// Row skip and column drop applied to the raw grid.
    InitialTransforms,
    /// Record-boundary scan and neighborhood field search.
    RecordExtraction,
    /// Column cleaning, date coercion, empty-column drop.
    Assembly,
}

/// Final stats reported on a successful transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformStats {
    /// Number of extracted records (= output rows).
    pub records: usize,
    /// Number of output columns after empty-column drop.
    pub columns: usize,
}

/// Observer interface for transformation runs.
///
/// All callbacks have empty defaults; implement only what you need.
pub trait TransformObserver: Send + Sync {
    /// Called as each pipeline stage begins. `detail` is a short
    /// human-readable note (e.g. rows skipped, records found so far).
    fn on_stage(&self, _stage: TransformStage, _detail: &str) {}

    /// Called once when a transformation completes successfully.
    fn on_complete(&self, _stats: TransformStats) {}

    /// Called when a transformation fails before producing a table.
    fn on_error(&self, _error: &TransformError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn TransformObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn TransformObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl TransformObserver for CompositeObserver {
    fn on_stage(&self, stage: TransformStage, detail: &str) {
        for o in &self.observers {
            o.on_stage(stage, detail);
        }
    }

    fn on_complete(&self, stats: TransformStats) {
        for o in &self.observers {
            o.on_complete(stats);
        }
    }

    fn on_error(&self, error: &TransformError) {
        for o in &self.observers {
            o.on_error(error);
        }
    }
}

/// Logs transformation events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl TransformObserver for StdErrObserver {
    fn on_stage(&self, stage: TransformStage, detail: &str) {
        eprintln!("[transform][{stage:?}] {detail}");
    }

    fn on_complete(&self, stats: TransformStats) {
        eprintln!(
            "[transform][done] records={} columns={}",
            stats.records, stats.columns
        );
    }

    fn on_error(&self, error: &TransformError) {
        eprintln!("[transform][error] {error}");
    }
}
