use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::RecvError;

use flowsim_engine::{BroadcastSink, Orchestrator, Pacing};
use flowsim_state::MemoryExecutionStore;
use flowsim_types::catalog::DatasetCatalog;
use flowsim_types::event::PipelineEvent;
use flowsim_types::output::ExecutionSummary;

/// Execute the `run` command: start one execution and stream its progress.
pub async fn execute(dataset: &str, step_millis: Option<u64>, config: Option<&str>) -> Result<()> {
    let config = config
        .map(serde_json::from_str)
        .transpose()
        .context("Failed to parse --config as JSON")?;

    let store = Arc::new(MemoryExecutionStore::new());
    let sink = BroadcastSink::default();
    let mut events = sink.subscribe();

    let mut orchestrator =
        Orchestrator::new(DatasetCatalog::builtin(), store, Arc::new(sink));
    if let Some(millis) = step_millis {
        orchestrator = orchestrator.with_pacing(Pacing::uniform(Duration::from_millis(millis)));
    }

    let execution = orchestrator.start_execution(dataset, config)?;
    println!("Execution {} started for dataset '{}'.", execution.id, dataset);

    loop {
        match events.recv().await {
            Ok(PipelineEvent::PipelineStarted { .. }) => {}
            Ok(PipelineEvent::StepStarted { step, .. }) => {
                println!("  {} started", step.name);
            }
            Ok(PipelineEvent::ProgressUpdate { step, .. }) => {
                println!("  {} {:>3}%", step.name, step.progress);
            }
            Ok(PipelineEvent::StepCompleted { step, .. }) => {
                println!("  {} completed", step.name);
            }
            Ok(PipelineEvent::PipelineCompleted { execution }) => {
                let summary: ExecutionSummary = execution
                    .output
                    .map(serde_json::from_value)
                    .transpose()
                    .context("Malformed execution summary")?
                    .context("Completed execution carried no summary")?;

                println!("Pipeline for '{}' completed successfully.", dataset);
                println!("  Records processed:       {}", summary.records_processed);
                println!("  Transformations applied: {}", summary.transformations_applied);
                println!("  Output format:           {}", summary.output_format);
                if let Some(completed_at) = execution.completed_at {
                    let elapsed = completed_at - execution.started_at;
                    println!(
                        "  Duration:                {:.2}s",
                        elapsed.num_milliseconds() as f64 / 1_000.0
                    );
                }
                return Ok(());
            }
            Err(RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "Event stream lagged, progress lines were dropped");
            }
            Err(RecvError::Closed) => {
                anyhow::bail!("event stream closed before the pipeline completed");
            }
        }
    }
}
