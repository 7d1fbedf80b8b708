//! Error type for harness runs.

use thiserror::Error;

/// Errors surfaced by the [`Harness`](crate::harness::Harness).
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The loaded total differs from `workers × increments_per_worker`.
    ///
    /// This means the counter lost (or invented) updates. It is a defect in
    /// the counter, not a transient condition, and is never retried.
    #[error("correctness violation: expected {expected} increments, observed {observed}")]
    CorrectnessViolation { expected: u64, observed: u64 },

    /// `workers × increments_per_worker` does not fit in a `u64`.
    #[error("{workers} workers × {increments} increments overflows u64")]
    Overflow { workers: usize, increments: u64 },

    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker: {0}")]
    Spawn(#[from] std::io::Error),

    /// A worker thread panicked before signalling completion.
    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    /// A worker task was cancelled or panicked.
    #[error("worker task failed: {0}")]
    TaskFailed(String),

    /// The async runtime could not be built.
    #[error("runtime error: {0}")]
    Runtime(std::io::Error),
}

/// Result type for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
