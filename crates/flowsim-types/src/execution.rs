//! Execution and step model types.
//!
//! Pure data types describing one simulated pipeline run. All state
//! transitions go through [`PipelineExecution::apply`] so the transition
//! rules live in exactly one place; the store and engine crates share this
//! model without depending on each other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Opaque execution identifier, unique per process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionId(String);

impl ExecutionId {
    /// Wrap an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier: epoch millis plus a random suffix.
    #[must_use]
    pub fn generate() -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self(format!(
            "exec-{}-{}",
            Utc::now().timestamp_millis(),
            &suffix[..8]
        ))
    }

    /// Borrow the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S: Into<String>> From<S> for ExecutionId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

// ---------------------------------------------------------------------------
// Step and execution status
// ---------------------------------------------------------------------------

/// The three pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Extract,
    Load,
    Transform,
}

impl StepKind {
    /// All step kinds in the order the orchestrator runs them.
    pub const ALL: [StepKind; 3] = [Self::Extract, Self::Load, Self::Transform];

    /// Wire-format identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Extract => "extract",
            Self::Load => "load",
            Self::Transform => "transform",
        }
    }

    /// Human-readable display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Extract => "Extract",
            Self::Load => "Load",
            Self::Transform => "Transform",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl StepStatus {
    /// Wire-format string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a whole execution.
///
/// `Failed` is part of the declared state space but the engine has no code
/// path that produces it; see the store-level transitions below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl ExecutionStatus {
    /// Wire-format string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Whether this status is terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Step and execution records
// ---------------------------------------------------------------------------

/// One stage of a pipeline execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStep {
    /// Which stage this is.
    pub kind: StepKind,
    /// Display name (fixed per kind).
    pub name: String,
    /// Current status.
    pub status: StepStatus,
    /// Progress percentage, 0–100. Monotonically non-decreasing while the
    /// step is running; exactly 100 once completed.
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Synthetic output payload, set on completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl PipelineStep {
    /// A fresh pending step for the given stage.
    #[must_use]
    pub fn new(kind: StepKind) -> Self {
        Self {
            kind,
            name: kind.display_name().to_string(),
            status: StepStatus::Pending,
            progress: 0,
            started_at: None,
            completed_at: None,
            output: None,
            error_message: None,
        }
    }
}

/// One simulated run of the three-step pipeline against a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineExecution {
    pub id: ExecutionId,
    /// Id of the catalog dataset this run references.
    pub dataset_id: String,
    pub status: ExecutionStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Exactly three steps: extract, load, transform, in that order.
    pub steps: Vec<PipelineStep>,
    /// Free-form configuration blob supplied by the caller.
    pub config: Value,
    /// Synthetic summary output, set when the execution completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl PipelineExecution {
    /// A fresh pending execution with three pending steps.
    #[must_use]
    pub fn new(id: ExecutionId, dataset_id: impl Into<String>, config: Value) -> Self {
        Self {
            id,
            dataset_id: dataset_id.into(),
            status: ExecutionStatus::Pending,
            started_at: Utc::now(),
            completed_at: None,
            steps: StepKind::ALL.iter().map(|k| PipelineStep::new(*k)).collect(),
            config,
            output: None,
            error_message: None,
        }
    }

    /// Borrow the step for a given stage.
    ///
    /// # Panics
    ///
    /// Never panics for executions built via [`PipelineExecution::new`],
    /// which always contain all three steps.
    #[must_use]
    pub fn step(&self, kind: StepKind) -> &PipelineStep {
        self.steps
            .iter()
            .find(|s| s.kind == kind)
            .unwrap_or_else(|| unreachable!("execution missing {kind} step"))
    }

    fn step_mut(&mut self, kind: StepKind) -> &mut PipelineStep {
        self.steps
            .iter_mut()
            .find(|s| s.kind == kind)
            .unwrap_or_else(|| unreachable!("execution missing step"))
    }

    /// Apply a state transition.
    ///
    /// Transitions are total: an update that does not apply to the current
    /// state (e.g. progress on a step that is not running) is ignored rather
    /// than panicking, keeping the record internally consistent.
    pub fn apply(&mut self, update: ExecutionUpdate) {
        match update {
            ExecutionUpdate::StepStarted { step, at } => {
                {
                    let s = self.step_mut(step);
                    if s.status != StepStatus::Pending {
                        return;
                    }
                    s.status = StepStatus::Running;
                    s.started_at = Some(at);
                    s.progress = 0;
                }
                if self.status == ExecutionStatus::Pending {
                    self.status = ExecutionStatus::Running;
                }
            }
            ExecutionUpdate::StepProgress { step, progress } => {
                let s = self.step_mut(step);
                if s.status == StepStatus::Running {
                    s.progress = s.progress.max(progress.min(100));
                }
            }
            ExecutionUpdate::StepCompleted { step, output, at } => {
                let s = self.step_mut(step);
                if s.status != StepStatus::Running {
                    return;
                }
                s.status = StepStatus::Completed;
                s.progress = 100;
                s.completed_at = Some(at);
                s.output = Some(output);
            }
            ExecutionUpdate::StepFailed { step, message, at } => {
                if self.status.is_terminal() {
                    return;
                }
                {
                    let s = self.step_mut(step);
                    s.status = StepStatus::Failed;
                    s.completed_at = Some(at);
                    s.error_message = Some(message.clone());
                }
                self.status = ExecutionStatus::Failed;
                self.completed_at = Some(at);
                self.error_message = Some(message);
            }
            ExecutionUpdate::Completed { output, at } => {
                if self.status.is_terminal() {
                    return;
                }
                self.status = ExecutionStatus::Completed;
                self.completed_at = Some(at);
                self.output = Some(output);
            }
        }
    }
}

/// A single state transition applied to an execution record.
///
/// `StepFailed` exists because the data model declares a failure state; no
/// engine code path currently produces it.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionUpdate {
    StepStarted {
        step: StepKind,
        at: DateTime<Utc>,
    },
    StepProgress {
        step: StepKind,
        progress: u8,
    },
    StepCompleted {
        step: StepKind,
        output: Value,
        at: DateTime<Utc>,
    },
    StepFailed {
        step: StepKind,
        message: String,
        at: DateTime<Utc>,
    },
    Completed {
        output: Value,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fresh() -> PipelineExecution {
        PipelineExecution::new(ExecutionId::generate(), "sales-data", json!({}))
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = ExecutionId::generate();
        let b = ExecutionId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("exec-"));
    }

    #[test]
    fn new_execution_has_three_pending_steps_in_order() {
        let exec = fresh();
        assert_eq!(exec.status, ExecutionStatus::Pending);
        let kinds: Vec<_> = exec.steps.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, StepKind::ALL);
        assert!(exec
            .steps
            .iter()
            .all(|s| s.status == StepStatus::Pending && s.progress == 0));
    }

    #[test]
    fn step_started_promotes_pending_execution_to_running() {
        let mut exec = fresh();
        exec.apply(ExecutionUpdate::StepStarted {
            step: StepKind::Extract,
            at: Utc::now(),
        });
        assert_eq!(exec.status, ExecutionStatus::Running);
        assert_eq!(exec.step(StepKind::Extract).status, StepStatus::Running);
        assert!(exec.step(StepKind::Extract).started_at.is_some());
        assert_eq!(exec.step(StepKind::Load).status, StepStatus::Pending);
    }

    #[test]
    fn progress_is_monotonic_and_clamped() {
        let mut exec = fresh();
        exec.apply(ExecutionUpdate::StepStarted {
            step: StepKind::Extract,
            at: Utc::now(),
        });
        exec.apply(ExecutionUpdate::StepProgress {
            step: StepKind::Extract,
            progress: 40,
        });
        exec.apply(ExecutionUpdate::StepProgress {
            step: StepKind::Extract,
            progress: 20,
        });
        assert_eq!(exec.step(StepKind::Extract).progress, 40);
        exec.apply(ExecutionUpdate::StepProgress {
            step: StepKind::Extract,
            progress: 250,
        });
        assert_eq!(exec.step(StepKind::Extract).progress, 100);
    }

    #[test]
    fn progress_on_pending_step_is_ignored() {
        let mut exec = fresh();
        exec.apply(ExecutionUpdate::StepProgress {
            step: StepKind::Load,
            progress: 50,
        });
        assert_eq!(exec.step(StepKind::Load).progress, 0);
    }

    #[test]
    fn completed_step_has_progress_100_and_output() {
        let mut exec = fresh();
        let at = Utc::now();
        exec.apply(ExecutionUpdate::StepStarted {
            step: StepKind::Extract,
            at,
        });
        exec.apply(ExecutionUpdate::StepCompleted {
            step: StepKind::Extract,
            output: json!({"records_extracted": 1000}),
            at,
        });
        let step = exec.step(StepKind::Extract);
        assert_eq!(step.status, StepStatus::Completed);
        assert_eq!(step.progress, 100);
        assert!(step.output.is_some());
        assert!(step.completed_at.is_some());
    }

    #[test]
    fn step_failed_cascades_to_execution() {
        let mut exec = fresh();
        let at = Utc::now();
        exec.apply(ExecutionUpdate::StepStarted {
            step: StepKind::Extract,
            at,
        });
        exec.apply(ExecutionUpdate::StepFailed {
            step: StepKind::Extract,
            message: "boom".into(),
            at,
        });
        assert_eq!(exec.status, ExecutionStatus::Failed);
        assert_eq!(exec.error_message.as_deref(), Some("boom"));
        assert_eq!(exec.step(StepKind::Extract).status, StepStatus::Failed);
    }

    #[test]
    fn completed_execution_is_terminal() {
        let mut exec = fresh();
        let at = Utc::now();
        exec.apply(ExecutionUpdate::Completed {
            output: json!({"records_processed": 1000}),
            at,
        });
        assert_eq!(exec.status, ExecutionStatus::Completed);
        assert!(exec.completed_at.is_some());
        // A second terminal transition is a no-op.
        exec.apply(ExecutionUpdate::StepFailed {
            step: StepKind::Load,
            message: "late".into(),
            at,
        });
        assert_eq!(exec.status, ExecutionStatus::Completed);
    }

    #[test]
    fn execution_serde_roundtrip() {
        let exec = fresh();
        let json = serde_json::to_string(&exec).unwrap();
        let back: PipelineExecution = serde_json::from_str(&json).unwrap();
        assert_eq!(exec, back);
    }

    #[test]
    fn status_strings_match_wire_format() {
        assert_eq!(StepStatus::Running.as_str(), "running");
        assert_eq!(ExecutionStatus::Failed.as_str(), "failed");
        assert_eq!(StepKind::Transform.as_str(), "transform");
        let json = serde_json::to_string(&StepKind::Extract).unwrap();
        assert_eq!(json, "\"extract\"");
    }
}
