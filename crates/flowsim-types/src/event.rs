//! Broadcast event model.
//!
//! Events pushed to the broadcast sink at each state transition. The wire
//! shape is a tagged object whose `type` field is one of `pipeline_started`,
//! `step_started`, `progress_update`, `step_completed` or
//! `pipeline_completed`; payloads carry shallow snapshots of the execution
//! and/or step at the moment of the transition. Delivery is fire-and-forget.

use serde::{Deserialize, Serialize};

use crate::execution::{ExecutionId, PipelineExecution, PipelineStep};

/// A push notification emitted during a pipeline execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// An execution was created; sent before the first step starts.
    PipelineStarted { execution: PipelineExecution },
    /// A step transitioned to running.
    StepStarted {
        execution_id: ExecutionId,
        step: PipelineStep,
    },
    /// A step's progress advanced by one tick.
    ProgressUpdate {
        execution_id: ExecutionId,
        step: PipelineStep,
    },
    /// A step transitioned to completed.
    StepCompleted {
        execution_id: ExecutionId,
        step: PipelineStep,
    },
    /// The whole execution finished; carries the final record.
    PipelineCompleted { execution: PipelineExecution },
}

impl PipelineEvent {
    /// The `type` tag this event serializes with.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PipelineStarted { .. } => "pipeline_started",
            Self::StepStarted { .. } => "step_started",
            Self::ProgressUpdate { .. } => "progress_update",
            Self::StepCompleted { .. } => "step_completed",
            Self::PipelineCompleted { .. } => "pipeline_completed",
        }
    }

    /// The execution this event belongs to.
    #[must_use]
    pub fn execution_id(&self) -> &ExecutionId {
        match self {
            Self::PipelineStarted { execution } | Self::PipelineCompleted { execution } => {
                &execution.id
            }
            Self::StepStarted { execution_id, .. }
            | Self::ProgressUpdate { execution_id, .. }
            | Self::StepCompleted { execution_id, .. } => execution_id,
        }
    }
}
