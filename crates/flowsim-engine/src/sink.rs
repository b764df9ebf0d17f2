//! Event sink trait and the broadcast implementation.
//!
//! The orchestrator pushes a [`PipelineEvent`] at every state transition.
//! Delivery is fire-and-forget: no acknowledgement, no delivery guarantee,
//! and a failing sink must never abort an in-flight step, so all publish
//! errors are logged and swallowed at the call sites via
//! [`publish_or_log`].

use flowsim_types::event::PipelineEvent;
use tokio::sync::broadcast;

/// Outbound notification channel the orchestrator depends on.
///
/// Implementations must be `Send + Sync` for use behind
/// `Arc<dyn EventSink>`.
pub trait EventSink: Send + Sync {
    /// Push one event to downstream consumers.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport rejects the event. Callers inside
    /// the engine treat this as log-and-continue.
    fn publish(&self, event: &PipelineEvent) -> anyhow::Result<()>;
}

/// Publish an event, logging instead of propagating sink failures.
pub(crate) fn publish_or_log(sink: &dyn EventSink, event: &PipelineEvent) {
    if let Err(error) = sink.publish(event) {
        tracing::warn!(
            event = event.kind(),
            execution = %event.execution_id(),
            %error,
            "event sink publish failed, continuing"
        );
    }
}

/// Fan-out sink over a `tokio::sync::broadcast` channel.
///
/// Subscribers that fall behind miss events (broadcast lag) rather than
/// exerting backpressure on the orchestrator.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    tx: broadcast::Sender<PipelineEvent>,
}

impl BroadcastSink {
    /// Create a sink whose channel buffers up to `capacity` events per
    /// subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastSink {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventSink for BroadcastSink {
    fn publish(&self, event: &PipelineEvent) -> anyhow::Result<()> {
        // A send error only means there are no subscribers right now, which
        // is fine for a fire-and-forget channel.
        let _ = self.tx.send(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowsim_types::execution::{ExecutionId, PipelineStep, StepKind};

    fn sample_event() -> PipelineEvent {
        PipelineEvent::StepStarted {
            execution_id: ExecutionId::new("exec-1"),
            step: PipelineStep::new(StepKind::Extract),
        }
    }

    #[test]
    fn publish_without_subscribers_is_ok() {
        let sink = BroadcastSink::new(8);
        assert_eq!(sink.receiver_count(), 0);
        sink.publish(&sample_event()).unwrap();
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let sink = BroadcastSink::new(8);
        let mut rx = sink.subscribe();
        sink.publish(&sample_event()).unwrap();
        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind(), "step_started");
    }

    #[test]
    fn trait_is_object_safe() {
        fn _assert_object_safe(_: &dyn EventSink) {}
    }
}
