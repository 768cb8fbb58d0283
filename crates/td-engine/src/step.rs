//! Transformation step descriptions

use serde::{Deserialize, Serialize};
use td_core::CellValue;
use uuid::Uuid;

/// Sort direction for the SORT step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// How FILL_MISSING derives its fill value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    /// Fill with 0
    Zero,
    /// Arithmetic mean of the column's coercible non-missing values
    Mean,
    /// Sorted middle (average of two middles for even counts)
    Median,
    /// Most frequent raw value, first-encountered wins on ties
    Mode,
    /// A caller-supplied constant
    Constant,
}

/// Aggregate function for the GROUP_BY step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

impl Aggregation {
    /// Label used to name the derived aggregate column
    pub fn label(&self) -> &'static str {
        match self {
            Aggregation::Sum => "SUM",
            Aggregation::Avg => "AVG",
            Aggregation::Count => "COUNT",
            Aggregation::Min => "MIN",
            Aggregation::Max => "MAX",
        }
    }
}

/// Step-specific configuration, tagged by step kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepConfig {
    /// Drop a row when any targeted cell is missing.
    /// An empty column list targets every column.
    DropMissing {
        #[serde(default)]
        columns: Vec<String>,
    },

    /// Overwrite missing cells in one column with a derived fill value
    FillMissing {
        column: String,
        strategy: FillStrategy,
        /// Only consulted by [`FillStrategy::Constant`]
        #[serde(default)]
        value: Option<CellValue>,
    },

    /// Keep the first occurrence of every distinct projected key.
    /// An empty column list keys on the whole row.
    RemoveDuplicates {
        #[serde(default)]
        columns: Vec<String>,
    },

    /// Stable sort by one column
    Sort {
        column: String,
        direction: SortDirection,
    },

    /// Collapse the table to one row per distinct group key
    GroupBy {
        group_column: String,
        agg_column: String,
        agg: Aggregation,
    },
}

/// One entry of the user-edited pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformStep {
    /// Unique id, used for removal from the pipeline
    pub id: Uuid,

    /// What the step does
    pub config: StepConfig,
}

impl TransformStep {
    /// Create a step with a fresh id
    pub fn new(config: StepConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_get_unique_ids() {
        let a = TransformStep::new(StepConfig::DropMissing { columns: vec![] });
        let b = TransformStep::new(StepConfig::DropMissing { columns: vec![] });
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_config_round_trips_as_json() {
        let step = TransformStep::new(StepConfig::GroupBy {
            group_column: "region".to_string(),
            agg_column: "sales".to_string(),
            agg: Aggregation::Sum,
        });
        let json = serde_json::to_string(&step).unwrap();
        let back: TransformStep = serde_json::from_str(&json).unwrap();
        assert_eq!(step, back);
    }

    #[test]
    fn test_tagged_representation() {
        let config = StepConfig::Sort {
            column: "x".to_string(),
            direction: SortDirection::Descending,
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "sort");
        assert_eq!(json["direction"], "descending");
    }
}
