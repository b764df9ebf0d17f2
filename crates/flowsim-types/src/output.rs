//! Synthetic output payloads fabricated by the step simulator.
//!
//! Everything here is a constant: no data is read, moved or transformed
//! anywhere in this engine. The shapes are fixed per step kind so
//! downstream consumers can rely on them.

use serde::{Deserialize, Serialize};

use crate::catalog::DataFormat;

/// Record count reported by every simulated step and the final summary.
pub const SIMULATED_RECORD_COUNT: u64 = 1_000;

/// Source label reported by the extract step.
pub const SIMULATED_SOURCE: &str = "sample-database";

/// Destination label reported by the load step.
pub const SIMULATED_DESTINATION: &str = "demo-warehouse";

/// Transformations reported by the transform step.
pub const SIMULATED_TRANSFORMATIONS: [&str; 3] = ["normalize", "deduplicate", "aggregate"];

/// Output of a completed extract step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOutput {
    pub records_extracted: u64,
    pub source: String,
}

impl Default for ExtractOutput {
    fn default() -> Self {
        Self {
            records_extracted: SIMULATED_RECORD_COUNT,
            source: SIMULATED_SOURCE.to_string(),
        }
    }
}

/// Output of a completed load step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOutput {
    pub records_loaded: u64,
    pub destination: String,
}

impl Default for LoadOutput {
    fn default() -> Self {
        Self {
            records_loaded: SIMULATED_RECORD_COUNT,
            destination: SIMULATED_DESTINATION.to_string(),
        }
    }
}

/// Output of a completed transform step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOutput {
    pub records_transformed: u64,
    pub transformations: Vec<String>,
}

impl Default for TransformOutput {
    fn default() -> Self {
        Self {
            records_transformed: SIMULATED_RECORD_COUNT,
            transformations: SIMULATED_TRANSFORMATIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Final summary attached to a completed execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub records_processed: u64,
    pub transformations_applied: usize,
    pub output_format: DataFormat,
    pub message: String,
}

impl Default for ExecutionSummary {
    fn default() -> Self {
        Self {
            records_processed: SIMULATED_RECORD_COUNT,
            transformations_applied: SIMULATED_TRANSFORMATIONS.len(),
            output_format: DataFormat::Parquet,
            message: "Pipeline completed successfully".to_string(),
        }
    }
}
