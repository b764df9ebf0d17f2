//! Dataset catalog and schema types.
//!
//! A [`DatasetCatalog`] is the static set of sample [`Dataset`]s the engine
//! can run a simulated pipeline against. Each dataset carries an ordered
//! schema of [`FieldSchema`] entries. The catalog is fixed at process start;
//! nothing is ever read from these datasets.

use serde::{Deserialize, Serialize};

/// Serialization format a dataset is (nominally) stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
    Csv,
    Json,
    Parquet,
}

impl DataFormat {
    /// Wire-format string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Parquet => "parquet",
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared logical type of a dataset field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Integer,
    Float,
    Text,
    Boolean,
    Timestamp,
}

impl FieldType {
    /// Wire-format string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field definition within a dataset schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name.
    pub name: String,
    /// Declared logical type.
    pub field_type: FieldType,
}

impl FieldSchema {
    /// Convenience constructor used when building the static catalog.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// A named sample dataset an execution can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Stable identifier callers reference (e.g. `"sales-data"`).
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Short description shown in listings.
    pub description: String,
    /// Rough row count, for display only.
    pub estimated_rows: u64,
    /// Nominal storage format.
    pub format: DataFormat,
    /// Ordered field schema.
    pub schema: Vec<FieldSchema>,
}

/// Immutable collection of the datasets known to this process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetCatalog {
    datasets: Vec<Dataset>,
}

impl DatasetCatalog {
    /// Build a catalog from an explicit dataset list.
    #[must_use]
    pub fn new(datasets: Vec<Dataset>) -> Self {
        Self { datasets }
    }

    /// The built-in sample catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            Dataset {
                id: "sales-data".into(),
                name: "Sales Data".into(),
                description: "Monthly sales transactions with regional breakdowns".into(),
                estimated_rows: 1_000,
                format: DataFormat::Csv,
                schema: vec![
                    FieldSchema::new("order_id", FieldType::Integer),
                    FieldSchema::new("region", FieldType::Text),
                    FieldSchema::new("amount", FieldType::Float),
                    FieldSchema::new("sold_at", FieldType::Timestamp),
                ],
            },
            Dataset {
                id: "user-events".into(),
                name: "User Events".into(),
                description: "Clickstream events from the demo web application".into(),
                estimated_rows: 5_000,
                format: DataFormat::Json,
                schema: vec![
                    FieldSchema::new("event_id", FieldType::Integer),
                    FieldSchema::new("user_id", FieldType::Integer),
                    FieldSchema::new("event_type", FieldType::Text),
                    FieldSchema::new("occurred_at", FieldType::Timestamp),
                ],
            },
            Dataset {
                id: "inventory-snapshots".into(),
                name: "Inventory Snapshots".into(),
                description: "Daily warehouse inventory levels per SKU".into(),
                estimated_rows: 2_500,
                format: DataFormat::Parquet,
                schema: vec![
                    FieldSchema::new("sku", FieldType::Text),
                    FieldSchema::new("quantity", FieldType::Integer),
                    FieldSchema::new("in_stock", FieldType::Boolean),
                    FieldSchema::new("snapshot_date", FieldType::Timestamp),
                ],
            },
        ])
    }

    /// Look up a dataset by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.id == id)
    }

    /// All datasets, in catalog order.
    #[must_use]
    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }
}

impl Default for DatasetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
