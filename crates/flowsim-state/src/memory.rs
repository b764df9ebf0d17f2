//! In-memory execution store.
//!
//! A keyed map behind a mutex. Step advancement within one execution is
//! strictly sequential, so the lock only arbitrates between independent
//! executions and readers; critical sections are short.

use std::collections::HashMap;
use std::sync::Mutex;

use flowsim_types::execution::{ExecutionId, ExecutionUpdate, PipelineExecution};

use crate::error::{Result, StoreError};
use crate::store::ExecutionStore;

/// Process-lifetime registry of execution records.
#[derive(Debug, Default)]
pub struct MemoryExecutionStore {
    executions: Mutex<HashMap<ExecutionId, PipelineExecution>>,
}

impl MemoryExecutionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<ExecutionId, PipelineExecution>>> {
        self.executions.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl ExecutionStore for MemoryExecutionStore {
    fn insert(&self, execution: PipelineExecution) -> Result<()> {
        let mut executions = self.lock()?;
        if executions.contains_key(&execution.id) {
            return Err(StoreError::DuplicateExecution(execution.id));
        }
        executions.insert(execution.id.clone(), execution);
        Ok(())
    }

    fn get(&self, id: &ExecutionId) -> Result<Option<PipelineExecution>> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn update(&self, id: &ExecutionId, update: ExecutionUpdate) -> Result<PipelineExecution> {
        let mut executions = self.lock()?;
        let execution = executions
            .get_mut(id)
            .ok_or_else(|| StoreError::ExecutionNotFound(id.clone()))?;
        execution.apply(update);
        Ok(execution.clone())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use flowsim_types::execution::{ExecutionStatus, StepKind, StepStatus};
    use serde_json::json;

    fn sample(id: &str) -> PipelineExecution {
        PipelineExecution::new(ExecutionId::new(id), "sales-data", json!({}))
    }

    #[test]
    fn insert_then_get_returns_snapshot() {
        let store = MemoryExecutionStore::new();
        store.insert(sample("exec-1")).unwrap();
        let loaded = store.get(&ExecutionId::new("exec-1")).unwrap().unwrap();
        assert_eq!(loaded.dataset_id, "sales-data");
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn get_unknown_id_is_none() {
        let store = MemoryExecutionStore::new();
        assert!(store.get(&ExecutionId::new("missing")).unwrap().is_none());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let store = MemoryExecutionStore::new();
        store.insert(sample("exec-1")).unwrap();
        let err = store.insert(sample("exec-1")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateExecution(_)));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn update_applies_transition_and_returns_snapshot() {
        let store = MemoryExecutionStore::new();
        store.insert(sample("exec-1")).unwrap();
        let snapshot = store
            .update(
                &ExecutionId::new("exec-1"),
                ExecutionUpdate::StepStarted {
                    step: StepKind::Extract,
                    at: Utc::now(),
                },
            )
            .unwrap();
        assert_eq!(snapshot.status, ExecutionStatus::Running);
        assert_eq!(snapshot.step(StepKind::Extract).status, StepStatus::Running);

        // The stored record was mutated in place, not just the returned copy.
        let loaded = store.get(&ExecutionId::new("exec-1")).unwrap().unwrap();
        assert_eq!(loaded.status, ExecutionStatus::Running);
    }

    #[test]
    fn update_unknown_id_fails() {
        let store = MemoryExecutionStore::new();
        let err = store
            .update(
                &ExecutionId::new("missing"),
                ExecutionUpdate::StepProgress {
                    step: StepKind::Load,
                    progress: 10,
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::ExecutionNotFound(_)));
    }

    #[test]
    fn failed_transition_is_expressible_at_store_level() {
        // The orchestrator never produces this transition; the registry
        // still has to represent it because the data model declares it.
        let store = MemoryExecutionStore::new();
        store.insert(sample("exec-1")).unwrap();
        let at = Utc::now();
        store
            .update(
                &ExecutionId::new("exec-1"),
                ExecutionUpdate::StepStarted {
                    step: StepKind::Extract,
                    at,
                },
            )
            .unwrap();
        let snapshot = store
            .update(
                &ExecutionId::new("exec-1"),
                ExecutionUpdate::StepFailed {
                    step: StepKind::Extract,
                    message: "injected".into(),
                    at,
                },
            )
            .unwrap();
        assert_eq!(snapshot.status, ExecutionStatus::Failed);
        assert_eq!(snapshot.step(StepKind::Load).status, StepStatus::Pending);
    }
}
