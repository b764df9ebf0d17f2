//! Shared model types for the Flowsim simulated ELT engine.
//!
//! This crate is dependency-boundary-safe for both the engine and the
//! execution store; neither depends on the other, both depend on this.

pub mod catalog;
pub mod event;
pub mod execution;
pub mod output;
