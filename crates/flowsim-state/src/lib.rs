//! Execution registry for the Flowsim engine.
//!
//! Provides the [`ExecutionStore`] trait and a [`MemoryExecutionStore`]
//! implementation. Records are retained for the lifetime of the process;
//! there is deliberately no eviction and no persistence.

#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::MemoryExecutionStore;
pub use store::ExecutionStore;
