//! Pipeline orchestrator: validates the dataset, registers the execution,
//! and drives the three simulated steps sequentially in a background task.
//!
//! Per-execution ordering is strict by construction: the driver task awaits
//! each step before starting the next, so exactly one step is ever running.
//! Nothing prevents concurrent executions; their records are isolated by id
//! and no ordering holds across them. There is no cancellation: once
//! started, an execution runs all three steps to completion.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use flowsim_state::ExecutionStore;
use flowsim_types::catalog::DatasetCatalog;
use flowsim_types::event::PipelineEvent;
use flowsim_types::execution::{ExecutionId, ExecutionUpdate, PipelineExecution, StepKind};
use flowsim_types::output::ExecutionSummary;
use serde_json::Value;

use crate::errors::{EngineError, Result};
use crate::simulator;
use crate::sink::{publish_or_log, EventSink};

/// Nominal duration of each simulated step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub extract: Duration,
    pub load: Duration,
    pub transform: Duration,
}

impl Pacing {
    /// Same nominal duration for all three steps.
    #[must_use]
    pub fn uniform(duration: Duration) -> Self {
        Self {
            extract: duration,
            load: duration,
            transform: duration,
        }
    }

    /// Duration for one step kind.
    #[must_use]
    pub fn for_step(&self, kind: StepKind) -> Duration {
        match kind {
            StepKind::Extract => self.extract,
            StepKind::Load => self.load,
            StepKind::Transform => self.transform,
        }
    }

    /// Total nominal duration of a full execution.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.extract + self.load + self.transform
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            extract: Duration::from_secs(2),
            load: Duration::from_millis(1_500),
            transform: Duration::from_millis(2_500),
        }
    }
}

/// Sequences Extract -> Load -> Transform for each requested execution.
pub struct Orchestrator {
    catalog: DatasetCatalog,
    store: Arc<dyn ExecutionStore>,
    sink: Arc<dyn EventSink>,
    pacing: Pacing,
}

impl Orchestrator {
    /// Build an orchestrator over an injected store and sink.
    #[must_use]
    pub fn new(
        catalog: DatasetCatalog,
        store: Arc<dyn ExecutionStore>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            catalog,
            store,
            sink,
            pacing: Pacing::default(),
        }
    }

    /// Override the default step pacing.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// The dataset catalog this orchestrator validates against.
    #[must_use]
    pub fn catalog(&self) -> &DatasetCatalog {
        &self.catalog
    }

    /// Start a new execution against a catalog dataset.
    ///
    /// Returns immediately with the execution already running: the extract
    /// step is running at progress 0 and the remaining steps are pending. A
    /// spawned driver task finishes the rest; must be called within a Tokio
    /// runtime.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DatasetNotFound`] (without creating any
    /// record) when the dataset id is not in the catalog.
    pub fn start_execution(
        &self,
        dataset_id: &str,
        config: Option<Value>,
    ) -> Result<PipelineExecution> {
        if self.catalog.get(dataset_id).is_none() {
            return Err(EngineError::DatasetNotFound(dataset_id.to_string()));
        }

        let execution = PipelineExecution::new(
            ExecutionId::generate(),
            dataset_id,
            config.unwrap_or_else(|| serde_json::json!({})),
        );
        let id = execution.id.clone();
        self.store.insert(execution.clone())?;

        tracing::info!(execution = %id, dataset = dataset_id, "Starting pipeline execution");
        publish_or_log(
            self.sink.as_ref(),
            &PipelineEvent::PipelineStarted { execution },
        );

        let snapshot =
            simulator::start_step(self.store.as_ref(), self.sink.as_ref(), &id, StepKind::Extract)?;

        let store = Arc::clone(&self.store);
        let sink = Arc::clone(&self.sink);
        let pacing = self.pacing;
        tokio::spawn(async move {
            if let Err(error) = drive(store.as_ref(), sink.as_ref(), &id, pacing).await {
                tracing::error!(execution = %id, %error, "Pipeline driver aborted");
            }
        });

        Ok(snapshot)
    }

    /// Fetch the current snapshot of an execution.
    ///
    /// Returns `Ok(None)` for unknown ids.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] on registry failure.
    pub fn get_execution(&self, id: &ExecutionId) -> Result<Option<PipelineExecution>> {
        Ok(self.store.get(id)?)
    }
}

/// Finish the extract step, then run load and transform, then finalize.
///
/// The extract step was already started by `start_execution` so the caller
/// could observe it running in the returned snapshot.
async fn drive(
    store: &dyn ExecutionStore,
    sink: &dyn EventSink,
    id: &ExecutionId,
    pacing: Pacing,
) -> Result<()> {
    simulator::advance_step(store, sink, id, StepKind::Extract, pacing.extract).await?;
    simulator::complete_step(store, sink, id, StepKind::Extract)?;

    simulator::run_step(store, sink, id, StepKind::Load, pacing.load).await?;
    simulator::run_step(store, sink, id, StepKind::Transform, pacing.transform).await?;

    let summary = serde_json::to_value(ExecutionSummary::default())?;
    let snapshot = store.update(
        id,
        ExecutionUpdate::Completed {
            output: summary,
            at: Utc::now(),
        },
    )?;
    tracing::info!(
        execution = %id,
        dataset = snapshot.dataset_id,
        "Pipeline execution completed"
    );
    publish_or_log(
        sink,
        &PipelineEvent::PipelineCompleted {
            execution: snapshot,
        },
    );
    Ok(())
}
