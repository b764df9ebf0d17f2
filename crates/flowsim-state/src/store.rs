//! Execution store trait definition.
//!
//! [`ExecutionStore`] defines the registry contract for execution records.
//! Model types and the transition rules they obey live in
//! [`flowsim_types::execution`]; the store only applies them atomically.

use flowsim_types::execution::{ExecutionId, ExecutionUpdate, PipelineExecution};

use crate::error;

/// Registry contract for pipeline execution records.
///
/// Implementations must be `Send + Sync` for use behind
/// `Arc<dyn ExecutionStore>`.
pub trait ExecutionStore: Send + Sync {
    /// Register a freshly created execution.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateExecution`](crate::StoreError) if the
    /// id is already present.
    fn insert(&self, execution: PipelineExecution) -> error::Result<()>;

    /// Fetch a snapshot of an execution.
    ///
    /// Returns `Ok(None)` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`](crate::StoreError) on storage failure.
    fn get(&self, id: &ExecutionId) -> error::Result<Option<PipelineExecution>>;

    /// Apply a state transition and return the updated snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ExecutionNotFound`](crate::StoreError) when the
    /// id is unknown.
    fn update(
        &self,
        id: &ExecutionId,
        update: ExecutionUpdate,
    ) -> error::Result<PipelineExecution>;

    /// Number of registered executions.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`](crate::StoreError) on storage failure.
    fn len(&self) -> error::Result<usize>;

    /// Whether the registry is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`](crate::StoreError) on storage failure.
    fn is_empty(&self) -> error::Result<bool> {
        Ok(self.len()? == 0)
    }
}
