//! Execution store error types.

use flowsim_types::execution::ExecutionId;

/// Errors produced by [`ExecutionStore`](crate::ExecutionStore) operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An update referenced an execution that was never inserted.
    #[error("execution '{0}' not found")]
    ExecutionNotFound(ExecutionId),

    /// An insert reused an id that is already present.
    #[error("execution '{0}' already exists")]
    DuplicateExecution(ExecutionId),

    /// Internal mutex was poisoned by a panicked thread.
    #[error("execution store lock poisoned")]
    LockPoisoned,
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, StoreError>;
