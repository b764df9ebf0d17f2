//! Engine error taxonomy.
//!
//! `DatasetNotFound` is the only error a caller can trigger; the simulator
//! performs no I/O, so everything else is internal (store lock poisoning,
//! payload serialization) and surfaces only through logs in the background
//! driver.

use flowsim_state::StoreError;

/// Errors produced by orchestrator operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The caller referenced a dataset id that is not in the catalog.
    #[error("unknown dataset '{0}'")]
    DatasetNotFound(String),

    /// Execution registry failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Synthetic payload could not be serialized.
    #[error("output payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_not_found_displays_the_id() {
        let err = EngineError::DatasetNotFound("does-not-exist".into());
        assert_eq!(err.to_string(), "unknown dataset 'does-not-exist'");
    }

    #[test]
    fn store_error_is_transparent() {
        let err = EngineError::from(StoreError::LockPoisoned);
        assert_eq!(err.to_string(), "execution store lock poisoned");
    }
}
