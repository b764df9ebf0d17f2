//! Step simulator.
//!
//! Advances one step from 0% to 100% in ten-point increments over a nominal
//! duration, then fabricates the step's output payload. This is a
//! simulation: no data is read, moved or transformed, and every count and
//! label in the outputs is a constant from [`flowsim_types::output`].

use std::time::Duration;

use chrono::Utc;
use flowsim_state::ExecutionStore;
use flowsim_types::event::PipelineEvent;
use flowsim_types::execution::{ExecutionId, ExecutionUpdate, PipelineExecution, StepKind};
use flowsim_types::output::{ExtractOutput, LoadOutput, TransformOutput};
use serde_json::Value;

use crate::errors::Result;
use crate::sink::{publish_or_log, EventSink};

/// Progress ticks per step: 0%, 10%, ..., 100%.
///
/// Eleven ticks over ten sleep intervals, so a step's elapsed time is the
/// nominal duration. Subscribers depend on seeing all eleven values; the
/// tick count is a fixed observable contract, not a tunable.
const TICKS_PER_STEP: u8 = 11;

/// Mark a step running and announce it. Returns the updated snapshot.
pub(crate) fn start_step(
    store: &dyn ExecutionStore,
    sink: &dyn EventSink,
    id: &ExecutionId,
    kind: StepKind,
) -> Result<PipelineExecution> {
    let snapshot = store.update(
        id,
        ExecutionUpdate::StepStarted {
            step: kind,
            at: Utc::now(),
        },
    )?;
    tracing::info!(execution = %id, step = %kind, "Step started");
    publish_or_log(
        sink,
        &PipelineEvent::StepStarted {
            execution_id: id.clone(),
            step: snapshot.step(kind).clone(),
        },
    );
    Ok(snapshot)
}

/// Drive a running step through its eleven progress ticks.
pub(crate) async fn advance_step(
    store: &dyn ExecutionStore,
    sink: &dyn EventSink,
    id: &ExecutionId,
    kind: StepKind,
    duration: Duration,
) -> Result<()> {
    let interval = duration / u32::from(TICKS_PER_STEP - 1);
    for tick in 0..TICKS_PER_STEP {
        if tick > 0 {
            tokio::time::sleep(interval).await;
        }
        let progress = tick * 10;
        let snapshot = store.update(
            id,
            ExecutionUpdate::StepProgress {
                step: kind,
                progress,
            },
        )?;
        publish_or_log(
            sink,
            &PipelineEvent::ProgressUpdate {
                execution_id: id.clone(),
                step: snapshot.step(kind).clone(),
            },
        );
    }
    Ok(())
}

/// Mark a step completed with its fabricated output and announce it.
pub(crate) fn complete_step(
    store: &dyn ExecutionStore,
    sink: &dyn EventSink,
    id: &ExecutionId,
    kind: StepKind,
) -> Result<()> {
    let output = step_output(kind)?;
    let snapshot = store.update(
        id,
        ExecutionUpdate::StepCompleted {
            step: kind,
            output,
            at: Utc::now(),
        },
    )?;
    tracing::info!(execution = %id, step = %kind, "Step completed");
    publish_or_log(
        sink,
        &PipelineEvent::StepCompleted {
            execution_id: id.clone(),
            step: snapshot.step(kind).clone(),
        },
    );
    Ok(())
}

/// Run one step start-to-finish.
pub(crate) async fn run_step(
    store: &dyn ExecutionStore,
    sink: &dyn EventSink,
    id: &ExecutionId,
    kind: StepKind,
    duration: Duration,
) -> Result<()> {
    start_step(store, sink, id, kind)?;
    advance_step(store, sink, id, kind, duration).await?;
    complete_step(store, sink, id, kind)
}

/// The fixed output payload for a step kind.
fn step_output(kind: StepKind) -> Result<Value> {
    let value = match kind {
        StepKind::Extract => serde_json::to_value(ExtractOutput::default())?,
        StepKind::Load => serde_json::to_value(LoadOutput::default())?,
        StepKind::Transform => serde_json::to_value(TransformOutput::default())?,
    };
    Ok(value)
}
