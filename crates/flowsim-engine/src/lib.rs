//! Orchestration crate for simulated Flowsim pipeline execution.
//!
//! The [`Orchestrator`] sequences the three pipeline stages against an
//! injected [`ExecutionStore`](flowsim_state::ExecutionStore) and pushes
//! progress events to an injected [`EventSink`]. Everything the "pipeline"
//! does is timer-paced simulation; no data moves anywhere.

pub mod errors;
pub mod orchestrator;
pub(crate) mod simulator;
pub mod sink;

// Re-export public API for convenience
pub use errors::EngineError;
pub use orchestrator::{Orchestrator, Pacing};
pub use sink::{BroadcastSink, EventSink};
